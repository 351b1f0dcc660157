use crate::ports::outbound::SearchIndex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// TracingSearchIndex adapter that logs container refreshes
///
/// There is no real search container behind it; it counts refreshes so the
/// once-per-event contract can be observed. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct TracingSearchIndex {
    refreshes: Arc<AtomicUsize>,
}

impl TracingSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl SearchIndex for TracingSearchIndex {
    fn refresh_container(&self) {
        let count = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        info!(refresh = count, "refreshed search container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_count_shared_between_clones() {
        let index = TracingSearchIndex::new();
        let observer = index.clone();

        index.refresh_container();
        index.refresh_container();

        assert_eq!(observer.refresh_count(), 2);
    }
}
