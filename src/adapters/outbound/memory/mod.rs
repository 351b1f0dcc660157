/// In-memory adapters for the dependency graph, model sources, workspace
/// projects and classpath containers
mod closure_classpath;
mod in_memory_graph;
mod in_memory_workspace;
mod static_model_provider;

pub use closure_classpath::ClosureClasspathManager;
pub use in_memory_graph::InMemoryDependencyGraph;
pub use in_memory_workspace::InMemoryWorkspace;
pub use static_model_provider::StaticModelProvider;
