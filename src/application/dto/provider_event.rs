use crate::model_management::domain::ModelVariant;

/// ProviderEvent - One batch of variant changes from a model source
///
/// Within one event, removals are applied before additions, and additions
/// before changes.
#[derive(Debug, Clone, Default)]
pub struct ProviderEvent {
    pub removed: Vec<ModelVariant>,
    pub added: Vec<ModelVariant>,
    pub changed: Vec<ModelVariant>,
    /// The target platform changed; every classpath is recomputed
    pub target_changed_only: bool,
}

impl ProviderEvent {
    pub fn new(
        removed: Vec<ModelVariant>,
        added: Vec<ModelVariant>,
        changed: Vec<ModelVariant>,
    ) -> Self {
        Self {
            removed,
            added,
            changed,
            target_changed_only: false,
        }
    }

    pub fn added(variants: Vec<ModelVariant>) -> Self {
        Self {
            added: variants,
            ..Self::default()
        }
    }

    pub fn removed(variants: Vec<ModelVariant>) -> Self {
        Self {
            removed: variants,
            ..Self::default()
        }
    }

    pub fn changed(variants: Vec<ModelVariant>) -> Self {
        Self {
            changed: variants,
            ..Self::default()
        }
    }

    pub fn target_changed(changed: Vec<ModelVariant>) -> Self {
        Self {
            changed,
            target_changed_only: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}
