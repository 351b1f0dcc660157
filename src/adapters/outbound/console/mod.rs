/// Console adapters writing reports to stdout and events to the log
mod stdout_presenter;
mod tracing_search_index;

pub use stdout_presenter::StdoutPresenter;
pub use tracing_search_index::TracingSearchIndex;
