/// Mock implementations for testing
mod mock_classpath_manager;
mod mock_model_provider;
mod mock_project_workspace;
mod mock_search_index;
mod recording_listener;

pub use mock_classpath_manager::MockClasspathManager;
pub use mock_model_provider::MockModelProvider;
pub use mock_project_workspace::MockProjectWorkspace;
pub use mock_search_index::MockSearchIndex;
pub use recording_listener::RecordingListener;
