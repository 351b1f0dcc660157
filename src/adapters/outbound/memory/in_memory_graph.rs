use crate::model_management::domain::{
    BundleId, BundleManifest, DeltaKind, DependencyGraphNode, GraphChange, GraphDelta, ImportEdge,
    ModelVariant, NodeId, RequiredEdge,
};
use crate::ports::outbound::DependencyGraph;
use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// What the graph knows about one inserted bundle
#[derive(Debug, Clone)]
struct GraphEntry {
    id: BundleId,
    external: bool,
    manifest: BundleManifest,
}

/// InMemoryDependencyGraph adapter resolving bundles by name matching
///
/// Every requirement is satisfied by any node carrying the required id; there
/// is no version matching. When several nodes share an id, the workspace node
/// wins over the external one, then the oldest handle.
pub struct InMemoryDependencyGraph {
    nodes: DashMap<NodeId, GraphEntry>,
    next_handle: AtomicU64,
    pending: Mutex<Vec<GraphChange>>,
    last_resolution: Mutex<HashMap<NodeId, DependencyGraphNode>>,
}

impl InMemoryDependencyGraph {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            next_handle: AtomicU64::new(1),
            pending: Mutex::new(Vec::new()),
            last_resolution: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes sorted by handle, copied out so no shard lock is held while
    /// edges are computed
    fn snapshot(&self) -> Vec<(NodeId, GraphEntry)> {
        let mut entries: Vec<(NodeId, GraphEntry)> = self
            .nodes
            .iter()
            .map(|item| (*item.key(), item.value().clone()))
            .collect();
        entries.sort_by_key(|(handle, _)| *handle);
        entries
    }

    fn record(&self, id: BundleId, kind: DeltaKind) {
        lock(&self.pending).push(GraphChange::new(id, kind));
    }
}

impl Default for InMemoryDependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The node representing `id`: workspace before external, then oldest
fn preferred<'a>(
    entries: &'a [(NodeId, GraphEntry)],
    id: &BundleId,
) -> Option<&'a (NodeId, GraphEntry)> {
    entries
        .iter()
        .filter(|(_, entry)| &entry.id == id)
        .min_by_key(|(handle, entry)| (entry.external, *handle))
}

fn exporter_of<'a>(entries: &'a [(NodeId, GraphEntry)], package: &str) -> Option<&'a BundleId> {
    entries
        .iter()
        .filter(|(_, entry)| {
            entry
                .manifest
                .exported_packages()
                .iter()
                .any(|p| p == package)
        })
        .min_by_key(|(handle, entry)| (entry.external, *handle))
        .map(|(_, entry)| &entry.id)
}

fn build_node(entries: &[(NodeId, GraphEntry)], handle: NodeId, entry: &GraphEntry) -> DependencyGraphNode {
    let mut node = DependencyGraphNode::new(handle, entry.id.clone(), entry.external);
    let mut resolved = true;

    for required in entry.manifest.required() {
        let supplier = preferred(entries, required.id()).map(|(_, e)| e.id.clone());
        if supplier.is_none() && !required.is_optional() {
            resolved = false;
        }
        node = node.with_required(RequiredEdge::new(
            required.id().clone(),
            required.is_optional(),
            supplier,
        ));
    }

    for package in entry.manifest.imported_packages() {
        let exporter = exporter_of(entries, package).cloned();
        if exporter.is_none() {
            resolved = false;
        }
        node = node.with_import(ImportEdge::new(package.clone(), exporter));
    }

    if let Some(host) = entry.manifest.host() {
        if preferred(entries, host).is_none() {
            resolved = false;
        }
        node = node.with_host(host.clone());
    }

    let is_preferred = preferred(entries, &entry.id).map(|(h, _)| *h) == Some(handle);
    if is_preferred {
        let fragments: BTreeSet<&BundleId> = entries
            .iter()
            .filter(|(_, e)| e.manifest.host() == Some(&entry.id))
            .map(|(_, e)| &e.id)
            .collect();
        for fragment in fragments {
            node = node.with_fragment(fragment.clone());
        }
    }

    node.with_resolved(resolved)
}

impl DependencyGraph for InMemoryDependencyGraph {
    fn resolve(&self, incremental: bool) -> GraphDelta {
        let entries = self.snapshot();
        let current: HashMap<NodeId, DependencyGraphNode> = entries
            .iter()
            .map(|(handle, entry)| (*handle, build_node(&entries, *handle, entry)))
            .collect();

        let mut changes: Vec<GraphChange> = std::mem::take(&mut *lock(&self.pending));
        let mut last = lock(&self.last_resolution);

        for (handle, _) in &entries {
            let Some(node) = current.get(handle) else {
                continue;
            };
            let report = if incremental {
                last.get(handle).is_some_and(|previous| previous != node)
            } else {
                true
            };
            if report {
                changes.push(GraphChange::new(node.id().clone(), DeltaKind::Changed));
            }
        }
        *last = current;

        let mut seen = HashSet::new();
        changes.retain(|change| seen.insert((change.id().clone(), change.kind())));

        debug!(
            incremental,
            nodes = entries.len(),
            changes = changes.len(),
            "resolved dependency graph"
        );
        GraphDelta::new(changes)
    }

    fn bundle(&self, id: &BundleId) -> Option<DependencyGraphNode> {
        let entries = self.snapshot();
        let (handle, entry) = preferred(&entries, id)?;
        Some(build_node(&entries, *handle, entry))
    }

    fn node(&self, handle: NodeId) -> Option<DependencyGraphNode> {
        let entries = self.snapshot();
        let (handle, entry) = entries.iter().find(|(h, _)| *h == handle)?;
        Some(build_node(&entries, *handle, entry))
    }

    fn add_bundle(&self, variant: &ModelVariant, is_external: bool) -> Option<NodeId> {
        let id = variant.id()?.clone();
        let entry = GraphEntry {
            id: id.clone(),
            external: is_external,
            manifest: variant.manifest().clone(),
        };

        if let Some(handle) = variant.graph_node() {
            let previous = self
                .nodes
                .get_mut(&handle)
                .map(|mut existing| std::mem::replace(&mut *existing, entry.clone()));
            if let Some(previous) = previous {
                if previous.id == id {
                    self.record(id, DeltaKind::Changed);
                } else {
                    self.record(previous.id, DeltaKind::Removed);
                    self.record(id, DeltaKind::Added);
                }
                return Some(handle);
            }
        }

        let handle = NodeId::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.nodes.insert(handle, entry);
        self.record(id, DeltaKind::Added);
        Some(handle)
    }

    fn remove_bundle_node(&self, handle: NodeId) {
        if let Some((_, entry)) = self.nodes.remove(&handle) {
            self.record(entry.id, DeltaKind::Removed);
        }
    }
}
