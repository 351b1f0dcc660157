use crate::application::dto::RegistrySettings;
use crate::model_management::domain::{BundleId, DependencyGraphNode, ModelVariant};
use crate::model_management::policies::FragmentExclusion;
use crate::ports::outbound::DependencyGraph;
use std::collections::BTreeSet;

/// DependencyClosureResolver service for computing transitive bundle closures
///
/// This service contains pure graph logic. It follows required-bundle,
/// package-import, attached-fragment and fragment-host edges, and treats the
/// bundle defining an extension point as a dependency of every contributor.
#[derive(Debug, Clone)]
pub struct DependencyClosureResolver {
    exclusion: FragmentExclusion,
    include_optional: bool,
}

impl Default for DependencyClosureResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyClosureResolver {
    pub fn new() -> Self {
        Self {
            exclusion: FragmentExclusion::new(),
            include_optional: true,
        }
    }

    pub fn from_settings(settings: &RegistrySettings) -> Self {
        Self {
            exclusion: FragmentExclusion::with_additional(settings.excluded_fragments.clone()),
            include_optional: settings.include_optional,
        }
    }

    pub fn with_excluded_fragments(mut self, ids: impl IntoIterator<Item = BundleId>) -> Self {
        self.exclusion = FragmentExclusion::with_additional(ids);
        self
    }

    /// Whether optional required-bundle edges are followed
    pub fn with_optional(mut self, include_optional: bool) -> Self {
        self.include_optional = include_optional;
        self
    }

    /// Computes the set of bundles reachable from `seeds` and `implicit`
    ///
    /// # Arguments
    /// * `seeds` - Models whose dependencies are requested
    /// * `implicit` - Bundles added unconditionally, walked like seeds
    /// * `graph` - The resolved dependency graph
    /// * `remove_seeds` - Drop the seeds' own ids from the result
    ///
    /// # Returns
    /// The closure; membership does not depend on traversal order
    pub fn closure<G>(
        &self,
        seeds: &[ModelVariant],
        implicit: &[BundleId],
        graph: &G,
        remove_seeds: bool,
    ) -> BTreeSet<BundleId>
    where
        G: DependencyGraph + ?Sized,
    {
        let mut result = BTreeSet::new();

        for seed in seeds {
            let node = seed
                .graph_node()
                .and_then(|handle| graph.node(handle))
                .or_else(|| seed.id().and_then(|id| graph.bundle(id)));
            self.add_closure(node, graph, &mut result);

            for point in seed.manifest().extensions() {
                if let Some(owner) = BundleId::extension_point_owner(point) {
                    self.add_closure(graph.bundle(&owner), graph, &mut result);
                }
            }
        }

        for id in implicit {
            self.add_closure(graph.bundle(id), graph, &mut result);
        }

        if remove_seeds {
            for id in seeds.iter().filter_map(ModelVariant::id) {
                result.remove(id);
            }
        }

        result
    }

    /// Walks everything reachable from `start`; the result set doubles as the visited set
    fn add_closure<G>(
        &self,
        start: Option<DependencyGraphNode>,
        graph: &G,
        result: &mut BTreeSet<BundleId>,
    ) where
        G: DependencyGraph + ?Sized,
    {
        let mut pending: Vec<DependencyGraphNode> = start.into_iter().collect();

        while let Some(node) = pending.pop() {
            if !result.insert(node.id().clone()) {
                continue;
            }

            let visit = |id: &BundleId, pending: &mut Vec<DependencyGraphNode>| {
                if !result.contains(id) {
                    pending.extend(graph.bundle(id));
                }
            };

            for edge in node.required() {
                if edge.is_optional() && !self.include_optional {
                    continue;
                }
                if let Some(supplier) = edge.supplier() {
                    visit(supplier, &mut pending);
                }
            }

            for import in node.imports() {
                if let Some(exporter) = import.exporter() {
                    visit(exporter, &mut pending);
                }
            }

            for fragment in node.fragments() {
                if self.exclusion.is_excluded(fragment) || result.contains(fragment) {
                    continue;
                }
                if let Some(fragment_node) = graph.bundle(fragment) {
                    if fragment_node.is_resolved() {
                        pending.push(fragment_node);
                    }
                }
            }

            if let Some(host) = node.host() {
                visit(host, &mut pending);
            }
        }
    }
}
