use crate::model_management::domain::BundleId;
use std::collections::BTreeSet;

/// Reserved identifier that always means "the base runtime bundle"
pub const SYSTEM_BUNDLE_ALIAS: &str = "system.bundle";

/// Bundle the alias resolves to unless configured otherwise
pub const DEFAULT_SYSTEM_BUNDLE_ID: &str = "org.eclipse.osgi";

/// Legacy compatibility fragment that is never part of a dependency closure
pub const LEGACY_COMPATIBILITY_FRAGMENT: &str = "org.eclipse.ui.workbench.compatibility";

/// Nature a project must carry to take part in classpath propagation
pub const DEFAULT_PROJECT_NATURE: &str = "org.eclipse.pde.PluginNature";

/// Maps the reserved alias to the concrete system bundle id
///
/// Any other identifier is returned unchanged.
pub fn canonical_bundle_id<'a>(id: &'a str, system_bundle_id: &'a str) -> &'a str {
    if id == SYSTEM_BUNDLE_ALIAS {
        system_bundle_id
    } else {
        id
    }
}

/// Fragments skipped when walking attached-fragment edges
///
/// The legacy compatibility fragment is always excluded; configuration can
/// only add to the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentExclusion {
    additional: BTreeSet<BundleId>,
}

impl FragmentExclusion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_additional(ids: impl IntoIterator<Item = BundleId>) -> Self {
        Self {
            additional: ids.into_iter().collect(),
        }
    }

    pub fn is_excluded(&self, fragment: &BundleId) -> bool {
        fragment.as_str() == LEGACY_COMPATIBILITY_FRAGMENT || self.additional.contains(fragment)
    }
}
