use bundle_model::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock SearchIndex for testing that counts refreshes
#[derive(Default, Clone)]
pub struct MockSearchIndex {
    pub refreshes: Arc<Mutex<usize>>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_count(&self) -> usize {
        *self.refreshes.lock().unwrap()
    }
}

impl SearchIndex for MockSearchIndex {
    fn refresh_container(&self) {
        *self.refreshes.lock().unwrap() += 1;
    }
}
