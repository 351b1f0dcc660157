mod cli;

use bundle_model::adapters::outbound::console::{StdoutPresenter, TracingSearchIndex};
use bundle_model::adapters::outbound::filesystem::FileSystemSnapshotReader;
use bundle_model::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use bundle_model::adapters::outbound::memory::{
    ClosureClasspathManager, InMemoryDependencyGraph, InMemoryWorkspace, StaticModelProvider,
};
use bundle_model::application::dto::{
    ClosureRequest, OutputFormat, ProviderEvent, RegistrySettings,
};
use bundle_model::application::use_cases::{ComputeClosureUseCase, ModelRegistry};
use bundle_model::config::{discover_config, load_config_from_path};
use bundle_model::model_management::services::DependencyClosureResolver;
use bundle_model::ports::outbound::{OutputPresenter, ReportFormatter, SnapshotReader};
use bundle_model::shared::error::{ExitCode, ModelError};
use bundle_model::shared::Result;
use clap::error::ErrorKind;
use cli::{Args, Command};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::InvalidArguments,
            };
            // Printing only fails when stdout/stderr are gone
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args.snapshot, args.config.as_deref())?;
    let snapshot = FileSystemSnapshotReader::new().read_snapshot(&args.snapshot)?;

    // Create adapters (Dependency Injection)
    let graph = Arc::new(InMemoryDependencyGraph::new());
    let classpath = ClosureClasspathManager::new(
        Arc::clone(&graph),
        DependencyClosureResolver::from_settings(&settings),
    )
    .with_implicit(settings.implicit_dependencies.clone());
    let registry = ModelRegistry::new(
        StaticModelProvider::new(snapshot.workspace),
        StaticModelProvider::new(snapshot.external),
        Arc::clone(&graph),
        classpath.clone(),
        InMemoryWorkspace::new(snapshot.projects),
        TracingSearchIndex::new(),
        settings.clone(),
    );

    let formatter: Box<dyn ReportFormatter> = match args.format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    };

    let output = match args.command {
        Command::Closure { ids, exclude_self } => {
            let use_case = ComputeClosureUseCase::new(&registry, graph, &settings);
            let response = use_case.execute(ClosureRequest::new(ids, exclude_self))?;
            formatter.format_closure(&response)?
        }
        Command::Affected { ids } => {
            let changed = ids
                .iter()
                .map(|id| {
                    registry
                        .find_model(id)
                        .ok_or_else(|| ModelError::UnknownBundle { id: id.clone() })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let delta = registry.apply_provider_event(ProviderEvent::changed(changed));
            debug!(changes = delta.len(), "replayed change event");
            formatter.format_affected(&classpath.last_batch())?
        }
        Command::List { include_disabled } => {
            formatter.format_models(&registry.all_active_models(include_disabled))?
        }
    };

    StdoutPresenter::new().present(&output)
}

/// Explicit `--config` wins; otherwise a config file next to the snapshot is used when present.
fn load_settings(snapshot: &Path, config: Option<&Path>) -> Result<RegistrySettings> {
    let file = match config {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let dir = snapshot
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            discover_config(dir)?
        }
    };

    match file {
        Some(file) => file.into_settings(),
        None => Ok(RegistrySettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_model::config::CONFIG_FILENAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_settings_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join("ws.json"), None).unwrap();
        assert_eq!(settings, RegistrySettings::default());
    }

    #[test]
    fn test_load_settings_discovers_config_next_to_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "include_optional: false\n").unwrap();

        let settings = load_settings(&dir.path().join("ws.json"), None).unwrap();
        assert!(!settings.include_optional);
    }

    #[test]
    fn test_load_settings_explicit_config_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_settings(
            &dir.path().join("ws.json"),
            Some(&dir.path().join("missing.yml")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
