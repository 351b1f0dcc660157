use crate::model_management::domain::BundleId;
use std::collections::BTreeSet;

/// ClosureResponse - Response DTO for the closure use case
///
/// Both lists are sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureResponse {
    pub seeds: Vec<BundleId>,
    pub bundles: Vec<BundleId>,
}

impl ClosureResponse {
    pub fn new(seeds: BTreeSet<BundleId>, bundles: BTreeSet<BundleId>) -> Self {
        Self {
            seeds: seeds.into_iter().collect(),
            bundles: bundles.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bundles.iter().any(|b| b.as_str() == id)
    }
}
