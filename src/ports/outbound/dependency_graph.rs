use crate::model_management::domain::{
    BundleId, DependencyGraphNode, GraphDelta, ModelVariant, NodeId,
};

/// DependencyGraph port for the externally resolved bundle graph
///
/// The graph is consumed, not owned: version matching and constraint solving
/// happen behind this port. Methods take `&self`; implementations manage their
/// own interior mutability.
pub trait DependencyGraph {
    /// Resolves pending changes and reports the bundles whose resolution changed
    ///
    /// # Arguments
    /// * `incremental` - When false, everything is re-resolved and reported
    fn resolve(&self, incremental: bool) -> GraphDelta;

    /// The node currently representing `id`, if any
    fn bundle(&self, id: &BundleId) -> Option<DependencyGraphNode>;

    /// The node behind a handle previously returned by `add_bundle`
    fn node(&self, handle: NodeId) -> Option<DependencyGraphNode>;

    /// Inserts a node for `variant`, or refreshes it in place when the variant
    /// already carries a handle known to the graph
    ///
    /// # Returns
    /// The node's handle, or None when the variant has no identifier
    fn add_bundle(&self, variant: &ModelVariant, is_external: bool) -> Option<NodeId>;

    /// Detaches a node from the graph; unknown handles are ignored
    fn remove_bundle_node(&self, handle: NodeId);
}
