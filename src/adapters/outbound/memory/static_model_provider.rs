use crate::model_management::domain::ModelVariant;
use crate::ports::outbound::ModelProvider;

/// StaticModelProvider adapter serving a fixed list of variants
#[derive(Debug, Clone, Default)]
pub struct StaticModelProvider {
    models: Vec<ModelVariant>,
}

impl StaticModelProvider {
    pub fn new(models: Vec<ModelVariant>) -> Self {
        Self { models }
    }
}

impl ModelProvider for StaticModelProvider {
    fn models(&self) -> Vec<ModelVariant> {
        self.models.clone()
    }
}
