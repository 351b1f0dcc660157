use bundle_model::prelude::*;
use std::sync::{Arc, Mutex};

/// ModelChangeListener for testing that captures every dispatched delta
#[derive(Default, Clone)]
pub struct RecordingListener {
    pub deltas: Arc<Mutex<Vec<ChangeDelta>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deltas(&self) -> Vec<ChangeDelta> {
        self.deltas.lock().unwrap().clone()
    }

    pub fn delta_count(&self) -> usize {
        self.deltas.lock().unwrap().len()
    }
}

impl ModelChangeListener for RecordingListener {
    fn models_changed(&self, delta: &ChangeDelta) {
        self.deltas.lock().unwrap().push(delta.clone());
    }
}
