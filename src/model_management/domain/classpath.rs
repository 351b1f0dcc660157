use super::{BundleId, ProjectRef};
use std::collections::BTreeMap;

/// Classpath container value computed for one workspace bundle
///
/// The registry treats the entries as opaque; only the classpath manager
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathContainer {
    bundle: BundleId,
    entries: Vec<String>,
}

impl ClasspathContainer {
    pub fn new(bundle: BundleId, entries: Vec<String>) -> Self {
        Self { bundle, entries }
    }

    pub fn bundle(&self) -> &BundleId {
        &self.bundle
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Build units whose classpath container must be reinstalled, with the new value
///
/// First writer wins: a unit that is already present is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedSet {
    containers: BTreeMap<ProjectRef, ClasspathContainer>,
}

impl AffectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `project` was already present
    pub fn insert_if_absent(&mut self, project: ProjectRef, container: ClasspathContainer) -> bool {
        if self.containers.contains_key(&project) {
            return false;
        }
        self.containers.insert(project, container);
        true
    }

    pub fn contains(&self, project: &ProjectRef) -> bool {
        self.containers.contains_key(project)
    }

    pub fn get(&self, project: &ProjectRef) -> Option<&ClasspathContainer> {
        self.containers.get(project)
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectRef> {
        self.containers.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectRef, &ClasspathContainer)> {
        self.containers.iter()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<ProjectRef, ClasspathContainer> {
        self.containers
    }
}
