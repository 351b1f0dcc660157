use super::{BundleId, DeltaKind};

/// Opaque handle of a node inside the external dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A required-bundle edge and the bundle that satisfied it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredEdge {
    name: BundleId,
    optional: bool,
    supplier: Option<BundleId>,
}

impl RequiredEdge {
    pub fn new(name: BundleId, optional: bool, supplier: Option<BundleId>) -> Self {
        Self {
            name,
            optional,
            supplier,
        }
    }

    pub fn name(&self) -> &BundleId {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn supplier(&self) -> Option<&BundleId> {
        self.supplier.as_ref()
    }
}

/// A package import and the bundle exporting it, if resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    package: String,
    exporter: Option<BundleId>,
}

impl ImportEdge {
    pub fn new(package: impl Into<String>, exporter: Option<BundleId>) -> Self {
        Self {
            package: package.into(),
            exporter,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn exporter(&self) -> Option<&BundleId> {
        self.exporter.as_ref()
    }
}

/// A resolved view of one bundle in the dependency graph
///
/// Nodes are values handed out by the graph; holding one does not keep the
/// graph's internal state alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraphNode {
    handle: NodeId,
    id: BundleId,
    external: bool,
    required: Vec<RequiredEdge>,
    imports: Vec<ImportEdge>,
    fragments: Vec<BundleId>,
    host: Option<BundleId>,
    resolved: bool,
}

impl DependencyGraphNode {
    pub fn new(handle: NodeId, id: BundleId, external: bool) -> Self {
        Self {
            handle,
            id,
            external,
            required: Vec::new(),
            imports: Vec::new(),
            fragments: Vec::new(),
            host: None,
            resolved: true,
        }
    }

    pub fn with_required(mut self, edge: RequiredEdge) -> Self {
        self.required.push(edge);
        self
    }

    pub fn with_import(mut self, edge: ImportEdge) -> Self {
        self.imports.push(edge);
        self
    }

    pub fn with_fragment(mut self, fragment: BundleId) -> Self {
        self.fragments.push(fragment);
        self
    }

    pub fn with_host(mut self, host: BundleId) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    pub fn handle(&self) -> NodeId {
        self.handle
    }

    pub fn id(&self) -> &BundleId {
        &self.id
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn required(&self) -> &[RequiredEdge] {
        &self.required
    }

    pub fn imports(&self) -> &[ImportEdge] {
        &self.imports
    }

    /// Fragments attached to this node
    pub fn fragments(&self) -> &[BundleId] {
        &self.fragments
    }

    pub fn host(&self) -> Option<&BundleId> {
        self.host.as_ref()
    }

    pub fn is_fragment(&self) -> bool {
        self.host.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// One bundle reported by a graph resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphChange {
    id: BundleId,
    kind: DeltaKind,
}

impl GraphChange {
    pub fn new(id: BundleId, kind: DeltaKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> &BundleId {
        &self.id
    }

    pub fn kind(&self) -> DeltaKind {
        self.kind
    }
}

/// Change set produced by resolving the dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDelta {
    changes: Vec<GraphChange>,
}

impl GraphDelta {
    pub fn new(changes: Vec<GraphChange>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[GraphChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}
