use crate::model_management::domain::{ModelEntry, ModelVariant};

/// ModelQueryPort - Inbound port for reading the model registry
///
/// Lookups return snapshots; holding one never pins the registry's table.
pub trait ModelQueryPort {
    /// Exact lookup; the reserved `system.bundle` alias is honored
    fn find_entry(&self, id: &str) -> Option<ModelEntry>;

    /// Active model of the entry for `id`
    fn find_model(&self, id: &str) -> Option<ModelVariant>;

    /// Active model of every entry, optionally skipping disabled ones
    fn all_active_models(&self, include_disabled: bool) -> Vec<ModelVariant>;
}

impl<T: ModelQueryPort + ?Sized> ModelQueryPort for &T {
    fn find_entry(&self, id: &str) -> Option<ModelEntry> {
        (**self).find_entry(id)
    }

    fn find_model(&self, id: &str) -> Option<ModelVariant> {
        (**self).find_model(id)
    }

    fn all_active_models(&self, include_disabled: bool) -> Vec<ModelVariant> {
        (**self).all_active_models(include_disabled)
    }
}
