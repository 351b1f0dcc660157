use super::{BundleId, ModelEntry};

/// What happened to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    Added,
    Removed,
    Changed,
}

impl std::fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeltaKind::Added => write!(f, "added"),
            DeltaKind::Removed => write!(f, "removed"),
            DeltaKind::Changed => write!(f, "changed"),
        }
    }
}

/// An entry snapshot and what happened to it
#[derive(Debug, Clone, PartialEq)]
pub struct ModelChange {
    entry: ModelEntry,
    kind: DeltaKind,
}

impl ModelChange {
    pub fn new(entry: ModelEntry, kind: DeltaKind) -> Self {
        Self { entry, kind }
    }

    pub fn entry(&self) -> &ModelEntry {
        &self.entry
    }

    pub fn kind(&self) -> DeltaKind {
        self.kind
    }
}

/// Ordered set of (entry, kind) pairs produced by one registry mutation
///
/// A pair is recorded at most once; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeDelta {
    changes: Vec<ModelChange>,
}

impl ChangeDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `kind` for `entry`; a repeated pair refreshes the stored snapshot
    pub fn record(&mut self, entry: ModelEntry, kind: DeltaKind) {
        match self
            .changes
            .iter_mut()
            .find(|c| c.kind == kind && c.entry.id() == entry.id())
        {
            Some(existing) => existing.entry = entry,
            None => self.changes.push(ModelChange::new(entry, kind)),
        }
    }

    pub fn changes(&self) -> &[ModelChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn contains(&self, id: &BundleId, kind: DeltaKind) -> bool {
        self.changes
            .iter()
            .any(|c| c.kind == kind && c.entry.id() == id)
    }

    pub fn entries_of(&self, kind: DeltaKind) -> impl Iterator<Item = &ModelEntry> {
        self.changes
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| &c.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> ModelEntry {
        ModelEntry::new(BundleId::new(id).unwrap())
    }

    #[test]
    fn test_record_preserves_order() {
        let mut delta = ChangeDelta::new();
        delta.record(entry("b"), DeltaKind::Removed);
        delta.record(entry("a"), DeltaKind::Added);

        assert_eq!(delta.len(), 2);
        assert_eq!(delta.changes()[0].entry().id().as_str(), "b");
        assert_eq!(delta.changes()[1].kind(), DeltaKind::Added);
    }

    #[test]
    fn test_record_deduplicates_pairs() {
        let mut delta = ChangeDelta::new();
        delta.record(entry("a"), DeltaKind::Changed);
        delta.record(entry("a"), DeltaKind::Changed);
        delta.record(entry("a"), DeltaKind::Added);

        assert_eq!(delta.len(), 2);
        let id = BundleId::new("a").unwrap();
        assert!(delta.contains(&id, DeltaKind::Changed));
        assert!(delta.contains(&id, DeltaKind::Added));
        assert!(!delta.contains(&id, DeltaKind::Removed));
    }

    #[test]
    fn test_entries_of_kind() {
        let mut delta = ChangeDelta::new();
        delta.record(entry("a"), DeltaKind::Changed);
        delta.record(entry("b"), DeltaKind::Added);
        delta.record(entry("c"), DeltaKind::Changed);

        let changed: Vec<&str> = delta
            .entries_of(DeltaKind::Changed)
            .map(|e| e.id().as_str())
            .collect();
        assert_eq!(changed, ["a", "c"]);
    }

    #[test]
    fn test_empty_delta() {
        assert!(ChangeDelta::new().is_empty());
    }
}
