use crate::application::dto::ClosureResponse;
use crate::model_management::domain::{AffectedSet, ModelVariant};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// TextFormatter adapter producing plain, line-oriented reports
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format_closure(&self, response: &ClosureResponse) -> Result<String> {
        let seeds: Vec<&str> = response.seeds.iter().map(|s| s.as_str()).collect();
        let mut out = format!(
            "Dependency closure of {} ({} bundle(s))\n",
            seeds.join(", "),
            response.bundles.len()
        );
        for bundle in &response.bundles {
            writeln!(out, "  {}", bundle)?;
        }
        Ok(out)
    }

    fn format_affected(&self, affected: &AffectedSet) -> Result<String> {
        if affected.is_empty() {
            return Ok("No classpath containers were reinstalled\n".to_string());
        }
        let mut out = format!("Reinstalled classpath containers ({}):\n", affected.len());
        for (project, container) in affected.iter() {
            writeln!(
                out,
                "  {} [{}]: {} entr{}",
                project,
                container.bundle(),
                container.entries().len(),
                if container.entries().len() == 1 { "y" } else { "ies" }
            )?;
        }
        Ok(out)
    }

    fn format_models(&self, models: &[ModelVariant]) -> Result<String> {
        let mut out = format!("{} model(s)\n", models.len());
        for model in models {
            let id = model.id().map(|id| id.as_str()).unwrap_or("<no id>");
            write!(out, "  {} ({}", id, model.source())?;
            if let Some(project) = model.project() {
                write!(out, ", project {}", project)?;
            }
            if !model.is_enabled() {
                write!(out, ", disabled")?;
            }
            writeln!(out, ")")?;
        }
        Ok(out)
    }
}
