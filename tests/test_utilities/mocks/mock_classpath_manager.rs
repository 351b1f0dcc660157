use bundle_model::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock ClasspathManager for testing
///
/// Containers list the bundle's required ids. Every built bundle and every
/// installed batch is captured.
#[derive(Default, Clone)]
pub struct MockClasspathManager {
    pub built: Arc<Mutex<Vec<BundleId>>>,
    pub batches: Arc<Mutex<Vec<AffectedSet>>>,
    pub failing: Arc<Mutex<HashSet<String>>>,
}

impl MockClasspathManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `build_container` fail for the given bundle id
    pub fn with_failure(self, id: &str) -> Self {
        self.failing.lock().unwrap().insert(id.to_string());
        self
    }

    pub fn built(&self) -> Vec<BundleId> {
        self.built.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<AffectedSet> {
        self.batches.lock().unwrap().clone()
    }

    pub fn last_batch(&self) -> Option<AffectedSet> {
        self.batches.lock().unwrap().last().cloned()
    }
}

impl ClasspathManager for MockClasspathManager {
    fn build_container(&self, model: &ModelVariant) -> Result<ClasspathContainer> {
        let Some(id) = model.id() else {
            anyhow::bail!("Mock classpath failure: model without id");
        };
        if self.failing.lock().unwrap().contains(id.as_str()) {
            anyhow::bail!("Mock classpath failure for {}", id);
        }
        self.built.lock().unwrap().push(id.clone());
        let entries = model
            .manifest()
            .required()
            .iter()
            .map(|required| required.id().to_string())
            .collect();
        Ok(ClasspathContainer::new(id.clone(), entries))
    }

    fn install_containers(&self, affected: AffectedSet) -> Result<()> {
        self.batches.lock().unwrap().push(affected);
        Ok(())
    }
}
