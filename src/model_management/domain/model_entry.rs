use super::{BundleId, ModelSource, ModelVariant, ProjectRef};
use crate::shared::error::ModelError;
use std::collections::BTreeMap;

/// Identifier table owned by the registry
pub type EntryTable = BTreeMap<BundleId, ModelEntry>;

/// All known variants of one bundle identifier
///
/// An entry holds at most one workspace and at most one external variant.
/// The registry removes entries as soon as both slots are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    id: BundleId,
    workspace: Option<ModelVariant>,
    external: Option<ModelVariant>,
    in_java_search: bool,
    changed_in_last_delta: bool,
    classpath_scheduled: bool,
}

impl ModelEntry {
    pub fn new(id: BundleId) -> Self {
        Self {
            id,
            workspace: None,
            external: None,
            in_java_search: false,
            changed_in_last_delta: false,
            classpath_scheduled: false,
        }
    }

    pub fn id(&self) -> &BundleId {
        &self.id
    }

    pub fn set_workspace_variant(&mut self, variant: Option<ModelVariant>) {
        self.workspace = variant;
    }

    pub fn set_external_variant(&mut self, variant: Option<ModelVariant>) {
        self.external = variant;
    }

    /// Stores `variant` in the slot matching its source
    pub fn set_variant(&mut self, variant: ModelVariant) {
        match variant.source() {
            ModelSource::Workspace => self.workspace = Some(variant),
            ModelSource::External => self.external = Some(variant),
        }
    }

    pub fn take_variant(&mut self, source: ModelSource) -> Option<ModelVariant> {
        match source {
            ModelSource::Workspace => self.workspace.take(),
            ModelSource::External => self.external.take(),
        }
    }

    pub fn variant(&self, source: ModelSource) -> Option<&ModelVariant> {
        match source {
            ModelSource::Workspace => self.workspace.as_ref(),
            ModelSource::External => self.external.as_ref(),
        }
    }

    pub fn variant_mut(&mut self, source: ModelSource) -> Option<&mut ModelVariant> {
        match source {
            ModelSource::Workspace => self.workspace.as_mut(),
            ModelSource::External => self.external.as_mut(),
        }
    }

    pub fn workspace_model(&self) -> Option<&ModelVariant> {
        self.workspace.as_ref()
    }

    pub fn external_model(&self) -> Option<&ModelVariant> {
        self.external.as_ref()
    }

    pub fn has_workspace_model(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn has_external_model(&self) -> bool {
        self.external.is_some()
    }

    /// Workspace variant if present, else the external one
    pub fn active_model(&self) -> Option<&ModelVariant> {
        self.workspace.as_ref().or(self.external.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.workspace.is_none() && self.external.is_none()
    }

    /// Project of the workspace variant, if the bundle is developed in the workspace
    pub fn project(&self) -> Option<&ProjectRef> {
        self.workspace.as_ref().and_then(ModelVariant::project)
    }

    pub fn in_java_search(&self) -> bool {
        self.in_java_search
    }

    pub fn set_in_java_search(&mut self, value: bool) {
        self.in_java_search = value;
    }

    pub fn is_changed_in_last_delta(&self) -> bool {
        self.changed_in_last_delta
    }

    pub fn mark_changed_in_last_delta(&mut self, changed: bool) {
        self.changed_in_last_delta = changed;
    }

    pub fn mark_classpath_scheduled(&mut self) {
        self.classpath_scheduled = true;
    }

    pub fn reset_classpath_schedule(&mut self) {
        self.classpath_scheduled = false;
    }

    /// Whether this entry's classpath container needs recomputing in the current pass
    ///
    /// # Errors
    /// `ModelError::MissingProject` when the active workspace variant has no project.
    pub fn should_recompute_classpath(&self, force: bool) -> Result<bool, ModelError> {
        let Some(active) = self.active_model() else {
            return Ok(false);
        };
        if !active.is_workspace() {
            return Ok(false);
        }
        if active.project().is_none() {
            return Err(ModelError::MissingProject {
                id: self.id.to_string(),
            });
        }
        if self.classpath_scheduled {
            return Ok(false);
        }
        Ok(force || self.changed_in_last_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(id: &str) -> BundleId {
        BundleId::new(id).unwrap()
    }

    fn workspace(id: &str) -> ModelVariant {
        ModelVariant::workspace(Some(bid(id)), ProjectRef::new(id), format!("/ws/{}", id))
    }

    fn external(id: &str) -> ModelVariant {
        ModelVariant::external(Some(bid(id)), format!("/target/{}.jar", id))
    }

    #[test]
    fn test_active_model_prefers_workspace() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_external_variant(Some(external("a")));
        entry.set_workspace_variant(Some(workspace("a")));

        assert!(entry.active_model().unwrap().is_workspace());
    }

    #[test]
    fn test_active_model_falls_back_to_external() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(workspace("a"));
        entry.set_variant(external("a"));

        entry.take_variant(ModelSource::Workspace);

        let active = entry.active_model().unwrap();
        assert_eq!(active.source(), ModelSource::External);
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_is_empty() {
        let mut entry = ModelEntry::new(bid("a"));
        assert!(entry.is_empty());
        assert!(entry.active_model().is_none());

        entry.set_external_variant(Some(external("a")));
        assert!(!entry.is_empty());

        entry.set_external_variant(None);
        assert!(entry.is_empty());
    }

    #[test]
    fn test_should_recompute_external_entry() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(external("a"));
        assert!(!entry.should_recompute_classpath(true).unwrap());
    }

    #[test]
    fn test_should_recompute_forced_workspace_entry() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(workspace("a"));
        assert!(entry.should_recompute_classpath(true).unwrap());
        assert!(!entry.should_recompute_classpath(false).unwrap());
    }

    #[test]
    fn test_should_recompute_when_changed_in_last_delta() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(workspace("a"));
        entry.mark_changed_in_last_delta(true);
        assert!(entry.should_recompute_classpath(false).unwrap());
    }

    #[test]
    fn test_should_recompute_once_per_pass() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(workspace("a"));
        entry.mark_classpath_scheduled();
        assert!(!entry.should_recompute_classpath(true).unwrap());

        entry.reset_classpath_schedule();
        assert!(entry.should_recompute_classpath(true).unwrap());
    }

    #[test]
    fn test_should_recompute_without_project_fails() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(workspace("a").without_project());

        let err = entry.should_recompute_classpath(true).unwrap_err();
        assert!(matches!(err, ModelError::MissingProject { .. }));
    }

    #[test]
    fn test_project_comes_from_workspace_variant() {
        let mut entry = ModelEntry::new(bid("a"));
        entry.set_variant(external("a"));
        assert!(entry.project().is_none());

        entry.set_variant(workspace("a"));
        assert_eq!(entry.project().unwrap().name(), "a");
    }
}
