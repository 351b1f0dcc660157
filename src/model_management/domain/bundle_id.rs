use crate::shared::error::ModelError;
use crate::shared::Result;

/// Maximum length for bundle identifiers (security limit)
const MAX_BUNDLE_ID_LENGTH: usize = 255;

/// NewType wrapper for a bundle's symbolic name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleId(String);

impl BundleId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            return Err(invalid(&id, "identifier is empty"));
        }

        if id.len() > MAX_BUNDLE_ID_LENGTH {
            return Err(invalid(
                &id,
                &format!(
                    "identifier is too long ({} bytes, maximum {})",
                    id.len(),
                    MAX_BUNDLE_ID_LENGTH
                ),
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            return Err(invalid(&id, "identifier contains invalid characters"));
        }

        Ok(Self(id))
    }

    /// Wraps a built-in identifier constant without re-validating it
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(Self::new(id).is_ok(), "invalid built-in bundle id {id}");
        Self(id.to_string())
    }

    /// Derives the bundle defining an extension point from the point's
    /// fully-qualified id by truncating at the last `.`.
    ///
    /// `org.eclipse.ui.views` is defined by `org.eclipse.ui`.
    pub fn extension_point_owner(point_id: &str) -> Option<Self> {
        let (owner, _) = point_id.rsplit_once('.')?;
        Self::new(owner).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(id: &str, reason: &str) -> anyhow::Error {
    ModelError::InvalidBundleId {
        id: id.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BundleId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Identity of a build unit: the workspace project a bundle is developed in
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectRef(String);

impl ProjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
