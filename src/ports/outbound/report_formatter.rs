use crate::application::dto::ClosureResponse;
use crate::model_management::domain::{AffectedSet, ModelVariant};
use crate::shared::Result;

/// ReportFormatter port for rendering query results
pub trait ReportFormatter {
    /// Renders a dependency closure
    fn format_closure(&self, response: &ClosureResponse) -> Result<String>;

    /// Renders the projects whose classpath container was reinstalled
    fn format_affected(&self, affected: &AffectedSet) -> Result<String>;

    /// Renders a list of models
    fn format_models(&self, models: &[ModelVariant]) -> Result<String>;
}
