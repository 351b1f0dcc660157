use crate::model_management::domain::{AffectedSet, ClasspathContainer, ModelVariant};
use crate::shared::Result;

/// ClasspathManager port for computing and installing classpath containers
pub trait ClasspathManager {
    /// Computes the container for a workspace model
    ///
    /// # Errors
    /// Any failure omits this one unit from the batch being built.
    fn build_container(&self, model: &ModelVariant) -> Result<ClasspathContainer>;

    /// Installs every container of a propagation pass in one batched call
    fn install_containers(&self, affected: AffectedSet) -> Result<()>;
}
