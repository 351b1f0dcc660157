use crate::model_management::domain::ModelVariant;

/// ModelProvider port for one source of bundle models
///
/// The registry holds one provider for the workspace and one for the
/// external bundle set, and scans both when it builds its table.
pub trait ModelProvider {
    /// Every variant this source currently knows about
    fn models(&self) -> Vec<ModelVariant>;
}
