use crate::application::dto::{WorkspaceProject, WorkspaceSnapshot};
use crate::model_management::domain::{
    BundleId, BundleManifest, ModelSource, ModelVariant, ProjectRef,
};
use crate::ports::outbound::SnapshotReader;
use crate::shared::error::ModelError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    #[serde(default)]
    workspace: Vec<BundleRecord>,
    #[serde(default)]
    external: Vec<BundleRecord>,
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleRecord {
    /// Absent for malformed bundles, which the registry ignores
    id: Option<String>,
    location: PathBuf,
    /// Workspace bundles only
    project: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    requires: Vec<RequireRecord>,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    exports: Vec<String>,
    host: Option<String>,
    #[serde(default)]
    extensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequireRecord {
    id: String,
    #[serde(default)]
    optional: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectRecord {
    name: String,
    #[serde(default = "default_enabled")]
    open: bool,
    #[serde(default)]
    natures: Vec<String>,
    #[serde(default)]
    references: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

/// Snapshot encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapshotEncoding {
    Json,
    Toml,
}

impl SnapshotEncoding {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// FileSystemSnapshotReader adapter for reading snapshot files
///
/// Symbolic links, non-regular files and oversized files are rejected
/// before anything is read.
pub struct FileSystemSnapshotReader;

impl FileSystemSnapshotReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &str) -> Result<SnapshotFile> {
        let parse_error = |details: String| -> anyhow::Error {
            ModelError::SnapshotParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        match SnapshotEncoding::from_path(path) {
            Some(SnapshotEncoding::Json) => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            Some(SnapshotEncoding::Toml) => {
                toml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            None => Err(parse_error("unsupported file extension".to_string())),
        }
    }
}

impl Default for FileSystemSnapshotReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader for FileSystemSnapshotReader {
    fn read_snapshot(&self, path: &Path) -> Result<WorkspaceSnapshot> {
        let read_error = |details: String| -> anyhow::Error {
            ModelError::SnapshotReadError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        };

        if !path.exists() {
            return Err(read_error("file does not exist".to_string()));
        }
        let size = validate_regular_file(path, "snapshot file")?;
        validate_file_size(size, path, MAX_FILE_SIZE)?;

        let content = fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
        let file = self.parse(path, &content)?;

        let snapshot = into_snapshot(file);
        debug!(
            path = %path.display(),
            workspace = snapshot.workspace.len(),
            external = snapshot.external.len(),
            projects = snapshot.projects.len(),
            "loaded workspace snapshot"
        );
        Ok(snapshot)
    }
}

fn into_snapshot(file: SnapshotFile) -> WorkspaceSnapshot {
    WorkspaceSnapshot {
        workspace: file
            .workspace
            .into_iter()
            .map(|record| into_variant(record, true))
            .collect(),
        external: file
            .external
            .into_iter()
            .map(|record| into_variant(record, false))
            .collect(),
        projects: file.projects.into_iter().map(into_project).collect(),
    }
}

/// Malformed ids are logged and dropped; a bundle without a valid id is
/// still returned so the registry can ignore it like any other anonymous model.
fn parse_id(raw: String, location: &Path, field: &str) -> Option<BundleId> {
    match BundleId::new(raw.as_str()) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(
                location = %location.display(),
                field,
                id = %raw,
                error = %e,
                "skipping malformed bundle id"
            );
            None
        }
    }
}

fn into_variant(record: BundleRecord, workspace: bool) -> ModelVariant {
    let location = record.location.as_path();
    let id = record.id.and_then(|raw| parse_id(raw, location, "id"));

    let mut manifest = BundleManifest::new();
    for require in record.requires {
        let Some(required) = parse_id(require.id, location, "requires") else {
            continue;
        };
        manifest = if require.optional {
            manifest.require_optional(required)
        } else {
            manifest.require(required)
        };
    }
    for package in record.imports {
        manifest = manifest.import_package(package);
    }
    for package in record.exports {
        manifest = manifest.export_package(package);
    }
    if let Some(host) = record.host.and_then(|raw| parse_id(raw, location, "host")) {
        manifest = manifest.with_host(host);
    }
    for point in record.extensions {
        manifest = manifest.contribute_extension(point);
    }

    let variant = if workspace {
        match record.project {
            Some(project) => ModelVariant::workspace(id, ProjectRef::new(project), record.location),
            None => ModelVariant::new(ModelSource::Workspace, id, record.location),
        }
    } else {
        ModelVariant::external(id, record.location)
    };

    variant.with_manifest(manifest).with_enabled(record.enabled)
}

fn into_project(record: ProjectRecord) -> WorkspaceProject {
    let mut project = WorkspaceProject::new(record.name);
    project.open = record.open;
    project.natures = record.natures;
    project.references = record.references.into_iter().map(ProjectRef::new).collect();
    project
}
