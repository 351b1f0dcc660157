use super::{BundleId, NodeId, ProjectRef};
use std::path::{Path, PathBuf};

/// Where a model variant comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSource {
    /// Developed in a workspace project
    Workspace,
    /// Installed in the external bundle set (target platform)
    External,
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Workspace => write!(f, "workspace"),
            ModelSource::External => write!(f, "external"),
        }
    }
}

/// A required-bundle declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredBundle {
    id: BundleId,
    optional: bool,
}

impl RequiredBundle {
    pub fn new(id: BundleId, optional: bool) -> Self {
        Self { id, optional }
    }

    pub fn id(&self) -> &BundleId {
        &self.id
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// What a bundle declares about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleManifest {
    required: Vec<RequiredBundle>,
    imported_packages: Vec<String>,
    exported_packages: Vec<String>,
    host: Option<BundleId>,
    extensions: Vec<String>,
}

impl BundleManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, id: BundleId) -> Self {
        self.required.push(RequiredBundle::new(id, false));
        self
    }

    pub fn require_optional(mut self, id: BundleId) -> Self {
        self.required.push(RequiredBundle::new(id, true));
        self
    }

    pub fn import_package(mut self, package: impl Into<String>) -> Self {
        self.imported_packages.push(package.into());
        self
    }

    pub fn export_package(mut self, package: impl Into<String>) -> Self {
        self.exported_packages.push(package.into());
        self
    }

    /// Declares this bundle a fragment of `host`
    pub fn with_host(mut self, host: BundleId) -> Self {
        self.host = Some(host);
        self
    }

    /// Records a contribution to the extension point `point_id`
    pub fn contribute_extension(mut self, point_id: impl Into<String>) -> Self {
        self.extensions.push(point_id.into());
        self
    }

    pub fn required(&self) -> &[RequiredBundle] {
        &self.required
    }

    pub fn imported_packages(&self) -> &[String] {
        &self.imported_packages
    }

    pub fn exported_packages(&self) -> &[String] {
        &self.exported_packages
    }

    pub fn host(&self) -> Option<&BundleId> {
        self.host.as_ref()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_fragment(&self) -> bool {
        self.host.is_some()
    }
}

/// One concrete representation of a bundle from a single source
///
/// The variant's identity is its source plus its location; the id may change
/// between events when the bundle's manifest is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVariant {
    id: Option<BundleId>,
    source: ModelSource,
    location: PathBuf,
    enabled: bool,
    graph_node: Option<NodeId>,
    project: Option<ProjectRef>,
    manifest: BundleManifest,
}

impl ModelVariant {
    pub fn new(source: ModelSource, id: Option<BundleId>, location: impl Into<PathBuf>) -> Self {
        Self {
            id,
            source,
            location: location.into(),
            enabled: true,
            graph_node: None,
            project: None,
            manifest: BundleManifest::default(),
        }
    }

    /// A workspace variant living in `project`
    pub fn workspace(id: Option<BundleId>, project: ProjectRef, location: impl Into<PathBuf>) -> Self {
        Self::new(ModelSource::Workspace, id, location).with_project(project)
    }

    /// An externally installed variant
    pub fn external(id: Option<BundleId>, location: impl Into<PathBuf>) -> Self {
        Self::new(ModelSource::External, id, location)
    }

    pub fn with_project(mut self, project: ProjectRef) -> Self {
        self.project = Some(project);
        self
    }

    pub fn without_project(mut self) -> Self {
        self.project = None;
        self
    }

    pub fn with_manifest(mut self, manifest: BundleManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_id(mut self, id: Option<BundleId>) -> Self {
        self.id = id;
        self
    }

    pub fn with_graph_node(mut self, node: Option<NodeId>) -> Self {
        self.graph_node = node;
        self
    }

    pub fn id(&self) -> Option<&BundleId> {
        self.id.as_ref()
    }

    pub fn source(&self) -> ModelSource {
        self.source
    }

    pub fn is_workspace(&self) -> bool {
        self.source == ModelSource::Workspace
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn graph_node(&self) -> Option<NodeId> {
        self.graph_node
    }

    pub fn set_graph_node(&mut self, node: Option<NodeId>) {
        self.graph_node = node;
    }

    /// The underlying workspace resource, only ever present on workspace variants
    pub fn project(&self) -> Option<&ProjectRef> {
        match self.source {
            ModelSource::Workspace => self.project.as_ref(),
            ModelSource::External => None,
        }
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    pub fn is_fragment(&self) -> bool {
        self.manifest.is_fragment()
    }

    /// Whether `other` is the same variant, possibly with edited content
    pub fn same_identity(&self, other: &ModelVariant) -> bool {
        self.source == other.source && self.location == other.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(id: &str) -> BundleId {
        BundleId::new(id).unwrap()
    }

    #[test]
    fn test_workspace_variant_has_project() {
        let variant = ModelVariant::workspace(
            Some(bid("com.example.core")),
            ProjectRef::new("core"),
            "/ws/core",
        );
        assert!(variant.is_workspace());
        assert_eq!(variant.project().unwrap().name(), "core");
        assert!(variant.is_enabled());
        assert!(variant.graph_node().is_none());
    }

    #[test]
    fn test_external_variant_never_reports_project() {
        let variant = ModelVariant::external(Some(bid("org.eclipse.osgi")), "/target/osgi.jar")
            .with_project(ProjectRef::new("ignored"));
        assert_eq!(variant.source(), ModelSource::External);
        assert!(variant.project().is_none());
    }

    #[test]
    fn test_manifest_builder() {
        let manifest = BundleManifest::new()
            .require(bid("org.eclipse.core.runtime"))
            .require_optional(bid("org.eclipse.ui"))
            .import_package("org.osgi.framework")
            .export_package("com.example.api")
            .contribute_extension("org.eclipse.ui.views");

        assert_eq!(manifest.required().len(), 2);
        assert!(!manifest.required()[0].is_optional());
        assert!(manifest.required()[1].is_optional());
        assert_eq!(manifest.imported_packages(), ["org.osgi.framework"]);
        assert_eq!(manifest.exported_packages(), ["com.example.api"]);
        assert_eq!(manifest.extensions(), ["org.eclipse.ui.views"]);
        assert!(!manifest.is_fragment());
    }

    #[test]
    fn test_fragment_manifest() {
        let manifest = BundleManifest::new().with_host(bid("com.example.core"));
        assert!(manifest.is_fragment());
        assert_eq!(manifest.host().unwrap().as_str(), "com.example.core");
    }

    #[test]
    fn test_same_identity_ignores_id() {
        let before = ModelVariant::workspace(Some(bid("old.id")), ProjectRef::new("p"), "/ws/p");
        let after = before.clone().with_id(Some(bid("new.id")));
        assert!(before.same_identity(&after));

        let elsewhere = ModelVariant::workspace(Some(bid("old.id")), ProjectRef::new("q"), "/ws/q");
        assert!(!before.same_identity(&elsewhere));
    }

    #[test]
    fn test_model_source_display() {
        assert_eq!(ModelSource::Workspace.to_string(), "workspace");
        assert_eq!(ModelSource::External.to_string(), "external");
    }
}
