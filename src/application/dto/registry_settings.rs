use crate::model_management::domain::BundleId;
use crate::model_management::policies::{DEFAULT_PROJECT_NATURE, DEFAULT_SYSTEM_BUNDLE_ID};

/// RegistrySettings - Tunables shared by the registry, the closure resolver
/// and the propagator
///
/// Built from the configuration file, or from defaults when none is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Bundle the `system.bundle` alias resolves to
    pub system_bundle_id: BundleId,
    /// Nature a project must carry to take part in reverse propagation
    pub project_nature: String,
    /// Fragments skipped in closures, in addition to the legacy one
    pub excluded_fragments: Vec<BundleId>,
    /// Bundles every closure query includes
    pub implicit_dependencies: Vec<BundleId>,
    /// Whether optional required-bundle edges are followed
    pub include_optional: bool,
    /// Initial members of the combined search set
    pub java_search: Vec<BundleId>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            system_bundle_id: BundleId::from_static(DEFAULT_SYSTEM_BUNDLE_ID),
            project_nature: DEFAULT_PROJECT_NATURE.to_string(),
            excluded_fragments: Vec::new(),
            implicit_dependencies: Vec::new(),
            include_optional: true,
            java_search: Vec::new(),
        }
    }
}
