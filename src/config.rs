//! Configuration file support for bundle-model.
//!
//! Provides YAML-based configuration through `bundle-model.config.yml` files,
//! including data structures, file loading, validation and conversion into
//! [`RegistrySettings`].

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::application::dto::RegistrySettings;
use crate::model_management::domain::BundleId;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bundle-model.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Id that the `system.bundle` alias resolves to
    pub system_bundle: Option<String>,
    pub project_nature: Option<String>,
    pub excluded_fragments: Option<Vec<String>>,
    pub implicit_dependencies: Option<Vec<String>>,
    pub include_optional: Option<bool>,
    /// Bundles that start as members of the Java search scope
    pub java_search: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Converts the file into registry settings, keeping defaults for absent keys.
    pub fn into_settings(self) -> Result<RegistrySettings> {
        let mut settings = RegistrySettings::default();

        if let Some(system_bundle) = self.system_bundle {
            settings.system_bundle_id = BundleId::new(system_bundle)?;
        }
        if let Some(nature) = self.project_nature {
            settings.project_nature = nature;
        }
        if let Some(include_optional) = self.include_optional {
            settings.include_optional = include_optional;
        }
        settings.excluded_fragments = parse_ids(self.excluded_fragments)?;
        settings.implicit_dependencies = parse_ids(self.implicit_dependencies)?;
        settings.java_search = parse_ids(self.java_search)?;

        Ok(settings)
    }
}

fn parse_ids(ids: Option<Vec<String>>) -> Result<Vec<BundleId>> {
    ids.unwrap_or_default()
        .into_iter()
        .map(BundleId::new)
        .collect()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref nature) = config.project_nature {
        if nature.trim().is_empty() {
            bail!(
                "Invalid config: project_nature must not be empty.\n\n\
                 💡 Hint: Omit the key to use the default nature (e.g., \"org.eclipse.pde.PluginNature\")."
            );
        }
    }

    if let Some(ref system_bundle) = config.system_bundle {
        if BundleId::new(system_bundle.as_str()).is_err() {
            bail!(
                "Invalid config: system_bundle '{}' is not a valid bundle id.\n\n\
                 💡 Hint: Bundle ids may only contain alphanumerics, '.', '-' and '_'.",
                system_bundle
            );
        }
    }

    let lists = [
        ("excluded_fragments", &config.excluded_fragments),
        ("implicit_dependencies", &config.implicit_dependencies),
        ("java_search", &config.java_search),
    ];
    for (key, ids) in lists {
        for (i, id) in ids.iter().flatten().enumerate() {
            if BundleId::new(id.as_str()).is_err() {
                bail!(
                    "Invalid config: {}[{}] '{}' is not a valid bundle id.\n\n\
                     💡 Hint: Bundle ids may only contain alphanumerics, '.', '-' and '_'.",
                    key,
                    i,
                    id
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
    }
}
