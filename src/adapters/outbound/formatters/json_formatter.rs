use crate::application::dto::ClosureResponse;
use crate::model_management::domain::{AffectedSet, ModelVariant};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ClosureReport<'a> {
    seeds: Vec<&'a str>,
    bundles: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct AffectedReport<'a> {
    project: &'a str,
    bundle: &'a str,
    entries: &'a [String],
}

#[derive(Debug, Serialize)]
struct ModelReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    source: String,
    location: String,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
    fragment: bool,
}

/// JsonFormatter adapter producing pretty-printed JSON reports
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_closure(&self, response: &ClosureResponse) -> Result<String> {
        let report = ClosureReport {
            seeds: response.seeds.iter().map(|s| s.as_str()).collect(),
            bundles: response.bundles.iter().map(|b| b.as_str()).collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn format_affected(&self, affected: &AffectedSet) -> Result<String> {
        let report: Vec<AffectedReport> = affected
            .iter()
            .map(|(project, container)| AffectedReport {
                project: project.name(),
                bundle: container.bundle().as_str(),
                entries: container.entries(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn format_models(&self, models: &[ModelVariant]) -> Result<String> {
        let report: Vec<ModelReport> = models
            .iter()
            .map(|model| ModelReport {
                id: model.id().map(|id| id.as_str()),
                source: model.source().to_string(),
                location: model.location().display().to_string(),
                enabled: model.is_enabled(),
                project: model.project().map(|p| p.name()),
                fragment: model.is_fragment(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
