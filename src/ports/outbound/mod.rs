/// Outbound ports (Driven ports) - Collaborator interfaces
///
/// These ports define the interfaces the registry core uses to reach
/// the dependency graph, model sources, classpath machinery and the workspace.
pub mod classpath_manager;
pub mod dependency_graph;
pub mod model_listener;
pub mod model_provider;
pub mod output_presenter;
pub mod project_workspace;
pub mod report_formatter;
pub mod search_index;
pub mod snapshot_reader;

pub use classpath_manager::ClasspathManager;
pub use dependency_graph::DependencyGraph;
pub use model_listener::ModelChangeListener;
pub use model_provider::ModelProvider;
pub use output_presenter::OutputPresenter;
pub use project_workspace::ProjectWorkspace;
pub use report_formatter::ReportFormatter;
pub use search_index::SearchIndex;
pub use snapshot_reader::SnapshotReader;
