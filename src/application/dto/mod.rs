/// Data Transfer Objects for application layer
///
/// DTOs carry requests, responses and settings between the application layer
/// and adapters, keeping the domain layer isolated.
mod closure_request;
mod closure_response;
mod output_format;
mod provider_event;
mod registry_settings;
mod workspace_snapshot;

pub use closure_request::ClosureRequest;
pub use closure_response::ClosureResponse;
pub use output_format::OutputFormat;
pub use provider_event::ProviderEvent;
pub use registry_settings::RegistrySettings;
pub use workspace_snapshot::{WorkspaceProject, WorkspaceSnapshot};
