use bundle_model::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ModelProvider for testing that counts how often it is scanned
#[derive(Default, Clone)]
pub struct MockModelProvider {
    pub models: Arc<Mutex<Vec<ModelVariant>>>,
    pub scans: Arc<Mutex<usize>>,
}

impl MockModelProvider {
    pub fn new(models: Vec<ModelVariant>) -> Self {
        Self {
            models: Arc::new(Mutex::new(models)),
            scans: Arc::new(Mutex::new(0)),
        }
    }

    pub fn scan_count(&self) -> usize {
        *self.scans.lock().unwrap()
    }
}

impl ModelProvider for MockModelProvider {
    fn models(&self) -> Vec<ModelVariant> {
        *self.scans.lock().unwrap() += 1;
        self.models.lock().unwrap().clone()
    }
}
