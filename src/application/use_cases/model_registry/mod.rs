use crate::application::dto::{ProviderEvent, RegistrySettings};
use crate::model_management::domain::{
    BundleId, ChangeDelta, DeltaKind, EntryTable, GraphDelta, ModelEntry, ModelSource,
    ModelVariant, NodeId, ProjectRef,
};
use crate::model_management::policies::canonical_bundle_id;
use crate::model_management::services::AffectedUnitsPropagator;
use crate::ports::inbound::ModelQueryPort;
use crate::ports::outbound::{
    ClasspathManager, DependencyGraph, ModelChangeListener, ModelProvider, ProjectWorkspace,
    SearchIndex,
};
use std::collections::btree_map::Entry;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, info, warn};

/// Identifier table plus the sticky search membership set
///
/// Membership is kept outside the entries so it survives an entry being
/// destroyed and created again.
#[derive(Debug, Default)]
struct RegistryState {
    entries: EntryTable,
    java_search: BTreeSet<BundleId>,
}

/// Accumulates the outcome of one registry mutation
#[derive(Default)]
struct EventPass {
    delta: ChangeDelta,
    search_affected: bool,
}

impl EventPass {
    fn touch(&mut self, variant: &ModelVariant, entry: &ModelEntry) {
        self.search_affected |= variant.is_workspace() || entry.in_java_search();
    }
}

/// ModelRegistry - Live registry of bundle models from two sources
///
/// Owns the identifier table, mirrors workspace variants into the dependency
/// graph, and turns provider events into change deltas, classpath updates
/// and listener notifications.
///
/// # Type Parameters
/// * `WS` - ModelProvider for the workspace
/// * `ES` - ModelProvider for the externally installed bundles
/// * `G` - DependencyGraph implementation, shared with closure queries
/// * `C` - ClasspathManager implementation
/// * `P` - ProjectWorkspace implementation
/// * `S` - SearchIndex implementation
pub struct ModelRegistry<WS, ES, G, C, P, S> {
    workspace_provider: WS,
    external_provider: ES,
    graph: Arc<G>,
    classpath: C,
    projects: P,
    search_index: S,
    settings: RegistrySettings,
    state: OnceLock<Mutex<RegistryState>>,
    /// Held for a whole event pass so graph resolution and propagation of
    /// one event never observe another event's changes
    events: Mutex<()>,
    listeners: Mutex<Vec<Arc<dyn ModelChangeListener>>>,
}

impl<WS, ES, G, C, P, S> ModelRegistry<WS, ES, G, C, P, S>
where
    WS: ModelProvider,
    ES: ModelProvider,
    G: DependencyGraph,
    C: ClasspathManager,
    P: ProjectWorkspace,
    S: SearchIndex,
{
    /// Creates a registry; the table is built on first access
    pub fn new(
        workspace_provider: WS,
        external_provider: ES,
        graph: Arc<G>,
        classpath: C,
        projects: P,
        search_index: S,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            workspace_provider,
            external_provider,
            graph,
            classpath,
            projects,
            search_index,
            settings,
            state: OnceLock::new(),
            events: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// The dependency graph the registry keeps in sync
    pub fn graph(&self) -> &Arc<G> {
        &self.graph
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Exact lookup; `system.bundle` resolves to the configured system bundle
    pub fn find_entry(&self, id: &str) -> Option<ModelEntry> {
        let id = self.lookup_id(id)?;
        self.lock().entries.get(&id).cloned()
    }

    /// Active model of the entry for `id`
    pub fn find_model(&self, id: &str) -> Option<ModelVariant> {
        self.find_entry(id)
            .and_then(|entry| entry.active_model().cloned())
    }

    /// Workspace variant living in `project`
    pub fn find_model_by_project(&self, project: &ProjectRef) -> Option<ModelVariant> {
        self.lock()
            .entries
            .values()
            .filter_map(ModelEntry::workspace_model)
            .find(|model| model.project() == Some(project))
            .cloned()
    }

    /// Snapshot of every entry's active model, sorted by identifier
    pub fn all_active_models(&self, include_disabled: bool) -> Vec<ModelVariant> {
        self.lock()
            .entries
            .values()
            .filter_map(ModelEntry::active_model)
            .filter(|model| include_disabled || model.is_enabled())
            .cloned()
            .collect()
    }

    pub fn workspace_models(&self) -> Vec<ModelVariant> {
        self.models_of(ModelSource::Workspace)
    }

    pub fn external_models(&self) -> Vec<ModelVariant> {
        self.models_of(ModelSource::External)
    }

    /// Sorted snapshot of the combined-search membership set
    pub fn java_search_members(&self) -> Vec<BundleId> {
        self.lock().java_search.iter().cloned().collect()
    }

    /// Registers a listener; registering the same listener twice has no effect
    pub fn add_listener(&self, listener: Arc<dyn ModelChangeListener>) {
        let mut listeners = self.lock_listeners();
        if !listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    pub fn remove_listener(&self, listener: &Arc<dyn ModelChangeListener>) {
        self.lock_listeners().retain(|l| !Arc::ptr_eq(l, listener));
    }

    /// Toggles the sticky combined-search flag of the given bundles
    ///
    /// Only entries whose flag actually flips are reported. A non-empty delta
    /// refreshes the search container once and is dispatched to listeners.
    pub fn set_java_search_membership(&self, ids: &[BundleId], value: bool) -> ChangeDelta {
        let mut delta = ChangeDelta::new();
        let serial = self.lock_events();
        {
            let mut state = self.lock();
            let RegistryState {
                entries,
                java_search,
            } = &mut *state;

            for id in ids {
                if value {
                    java_search.insert(id.clone());
                } else {
                    java_search.remove(id);
                }
                if let Some(entry) = entries.get_mut(id) {
                    if entry.in_java_search() != value {
                        entry.set_in_java_search(value);
                        delta.record(entry.clone(), DeltaKind::Changed);
                    }
                }
            }
        }

        if !delta.is_empty() {
            self.search_index.refresh_container();
        }
        drop(serial);

        if !delta.is_empty() {
            self.dispatch(&delta);
        }
        delta
    }

    /// Applies one batch of provider changes
    ///
    /// Removals run before additions, additions before changes. After the
    /// table and graph are updated, the graph is resolved, affected classpath
    /// containers are installed in one batch, the search container is
    /// refreshed at most once, and the delta is dispatched once.
    ///
    /// # Returns
    /// The delta dispatched to listeners
    ///
    /// Concurrent events are applied one after another. Listeners are
    /// notified after the pass is released, so they may apply events themselves.
    pub fn apply_provider_event(&self, event: ProviderEvent) -> ChangeDelta {
        let mut pass = EventPass::default();
        let serial = self.lock_events();

        let mut snapshot = {
            let mut state = self.lock();
            for entry in state.entries.values_mut() {
                entry.mark_changed_in_last_delta(false);
            }

            for variant in &event.removed {
                match variant.id().cloned() {
                    Some(id) => self.remove_model(&mut state, variant, &id, &mut pass),
                    None => debug!(location = %variant.location().display(), "ignoring removed model without id"),
                }
            }
            for variant in &event.added {
                match variant.id().cloned() {
                    Some(id) => self.add_model(&mut state, variant, &id, &mut pass),
                    None => debug!(location = %variant.location().display(), "ignoring added model without id"),
                }
            }
            for variant in &event.changed {
                self.change_model(&mut state, variant, &mut pass);
            }

            let changed: Vec<BundleId> = pass
                .delta
                .entries_of(DeltaKind::Changed)
                .map(|entry| entry.id().clone())
                .collect();
            for id in &changed {
                if let Some(entry) = state.entries.get_mut(id) {
                    entry.mark_changed_in_last_delta(true);
                }
            }

            state.entries.clone()
        };

        if event.target_changed_only {
            self.graph.resolve(false);
            self.install(None, &mut snapshot);
        } else if !pass.delta.is_empty() {
            let graph_delta = self.graph.resolve(true);
            self.install(Some(&graph_delta), &mut snapshot);
        }

        if pass.search_affected {
            self.search_index.refresh_container();
        }

        info!(
            changes = pass.delta.len(),
            removed = event.removed.len(),
            added = event.added.len(),
            changed = event.changed.len(),
            "applied provider event"
        );

        drop(serial);

        if !pass.delta.is_empty() {
            self.dispatch(&pass.delta);
        }
        pass.delta
    }

    fn install(&self, graph_delta: Option<&GraphDelta>, snapshot: &mut EntryTable) {
        let propagator = AffectedUnitsPropagator::new(
            &self.classpath,
            &self.projects,
            &self.settings.project_nature,
        );
        let affected = propagator.propagate(graph_delta, snapshot, true);
        if affected.is_empty() {
            return;
        }
        if let Err(e) = self.classpath.install_containers(affected) {
            warn!(error = %e, "failed to install classpath containers");
        }
    }

    fn remove_model(
        &self,
        state: &mut RegistryState,
        variant: &ModelVariant,
        id: &BundleId,
        pass: &mut EventPass,
    ) {
        let Some(entry) = state.entries.get_mut(id) else {
            debug!(bundle = %id, "removed model has no entry");
            return;
        };

        let detached = entry.take_variant(variant.source());
        let node = detached
            .as_ref()
            .and_then(ModelVariant::graph_node)
            .or(variant.graph_node());
        if let Some(node) = node {
            self.graph.remove_bundle_node(node);
        }

        if variant.is_workspace() {
            if let Some(external) = entry.variant_mut(ModelSource::External) {
                let node = self.graph.add_bundle(external, true);
                external.set_graph_node(node);
                debug!(bundle = %id, "reinstated external model in dependency graph");
            }
        }

        pass.touch(variant, entry);
        if entry.is_empty() {
            if let Some(entry) = state.entries.remove(id) {
                pass.delta.record(entry, DeltaKind::Removed);
            }
        } else {
            pass.delta.record(entry.clone(), DeltaKind::Changed);
        }
    }

    fn add_model(
        &self,
        state: &mut RegistryState,
        variant: &ModelVariant,
        id: &BundleId,
        pass: &mut EventPass,
    ) {
        let RegistryState {
            entries,
            java_search,
        } = state;

        let (entry, created) = match entries.entry(id.clone()) {
            Entry::Occupied(occupied) => (occupied.into_mut(), false),
            Entry::Vacant(vacant) => {
                let mut entry = ModelEntry::new(id.clone());
                entry.set_in_java_search(java_search.contains(id));
                (vacant.insert(entry), true)
            }
        };

        let mut variant = variant.clone();
        if let Some(old) = entry
            .variant(variant.source())
            .and_then(ModelVariant::graph_node)
        {
            self.graph.remove_bundle_node(old);
        }

        if variant.is_workspace() {
            if let Some(external) = entry.variant_mut(ModelSource::External) {
                if let Some(node) = external.graph_node() {
                    self.graph.remove_bundle_node(node);
                    external.set_graph_node(None);
                }
            }
            variant.set_graph_node(None);
            let node = self.graph.add_bundle(&variant, false);
            variant.set_graph_node(node);
        } else if !entry.has_workspace_model() {
            variant.set_graph_node(None);
            let node = self.graph.add_bundle(&variant, true);
            variant.set_graph_node(node);
        } else {
            variant.set_graph_node(None);
        }

        pass.touch(&variant, entry);
        entry.set_variant(variant);
        let kind = if created {
            DeltaKind::Added
        } else {
            DeltaKind::Changed
        };
        pass.delta.record(entry.clone(), kind);
    }

    fn change_model(&self, state: &mut RegistryState, variant: &ModelVariant, pass: &mut EventPass) {
        let stored = stored_counterpart(&state.entries, variant);
        let handle = variant
            .graph_node()
            .or_else(|| stored.as_ref().and_then(|(_, node)| *node));
        let old_id = handle
            .and_then(|node| self.graph.node(node))
            .map(|node| node.id().clone())
            .or_else(|| stored.map(|(id, _)| id));
        let new_id = variant.id().cloned();

        if let Some(new_id) = &new_id {
            if variant.is_workspace() && variant.project().is_none() {
                self.detach_stale_duplicate(state, new_id);
            }
        }

        match (old_id, new_id) {
            (None, None) => {
                debug!(location = %variant.location().display(), "ignoring changed model without id");
            }
            (None, Some(new_id)) => self.add_model(state, variant, &new_id, pass),
            (Some(old_id), None) => {
                self.remove_model(state, variant, &old_id, pass);
                if let Some(node) = handle {
                    self.graph.remove_bundle_node(node);
                }
            }
            (Some(old_id), Some(new_id)) if old_id == new_id => {
                self.refresh_model(state, variant, &new_id, handle, pass);
            }
            (Some(old_id), Some(new_id)) => {
                debug!(from = %old_id, to = %new_id, "bundle id changed");
                let renamed = variant.clone().with_graph_node(handle);
                self.remove_model(state, &renamed, &old_id, pass);
                self.add_model(state, variant, &new_id, pass);
            }
        }
    }

    /// Drops the graph node of the stored workspace variant for `id`
    fn detach_stale_duplicate(&self, state: &mut RegistryState, id: &BundleId) {
        let Some(stored) = state
            .entries
            .get_mut(id)
            .and_then(|entry| entry.variant_mut(ModelSource::Workspace))
        else {
            return;
        };
        if let Some(node) = stored.graph_node() {
            debug!(bundle = %id, "removing stale workspace node");
            self.graph.remove_bundle_node(node);
            stored.set_graph_node(None);
        }
    }

    fn refresh_model(
        &self,
        state: &mut RegistryState,
        variant: &ModelVariant,
        id: &BundleId,
        handle: Option<NodeId>,
        pass: &mut EventPass,
    ) {
        if !state.entries.contains_key(id) {
            self.add_model(state, variant, id, pass);
            return;
        }
        let Some(entry) = state.entries.get_mut(id) else {
            return;
        };

        let mut variant = variant.clone().with_graph_node(handle);
        if variant.is_workspace() || !entry.has_workspace_model() {
            let node = self.graph.add_bundle(&variant, !variant.is_workspace());
            variant.set_graph_node(node);
        } else {
            variant.set_graph_node(None);
        }

        pass.touch(&variant, entry);
        entry.set_variant(variant);
        pass.delta.record(entry.clone(), DeltaKind::Changed);
    }

    fn models_of(&self, source: ModelSource) -> Vec<ModelVariant> {
        self.lock()
            .entries
            .values()
            .filter_map(|entry| entry.variant(source))
            .cloned()
            .collect()
    }

    fn lookup_id(&self, id: &str) -> Option<BundleId> {
        let canonical = canonical_bundle_id(id, self.settings.system_bundle_id.as_str());
        BundleId::new(canonical).ok()
    }

    /// Sends `delta` to a point-in-time copy of the listener list
    fn dispatch(&self, delta: &ChangeDelta) {
        let snapshot: Vec<Arc<dyn ModelChangeListener>> = self.lock_listeners().clone();
        debug!(listeners = snapshot.len(), changes = delta.len(), "dispatching model delta");
        for listener in snapshot {
            listener.models_changed(delta);
        }
    }

    fn lock_events(&self) -> MutexGuard<'_, ()> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<Arc<dyn ModelChangeListener>>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the table, building it first if this is the first access
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state
            .get_or_init(|| Mutex::new(self.build_state()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn build_state(&self) -> RegistryState {
        let mut entries = EntryTable::new();

        for mut variant in self.workspace_provider.models() {
            let Some(id) = variant.id().cloned() else {
                debug!(location = %variant.location().display(), "skipping workspace model without id");
                continue;
            };
            let entry = entries
                .entry(id.clone())
                .or_insert_with(|| ModelEntry::new(id));
            if let Some(duplicate) = entry.take_variant(ModelSource::Workspace) {
                warn!(bundle = %entry.id(), location = %duplicate.location().display(), "duplicate workspace model replaced");
                if let Some(node) = duplicate.graph_node() {
                    self.graph.remove_bundle_node(node);
                }
            }
            let node = self.graph.add_bundle(&variant, false);
            variant.set_graph_node(node);
            entry.set_variant(variant);
        }

        for mut variant in self.external_provider.models() {
            let Some(id) = variant.id().cloned() else {
                debug!(location = %variant.location().display(), "skipping external model without id");
                continue;
            };
            let entry = entries
                .entry(id.clone())
                .or_insert_with(|| ModelEntry::new(id));
            if !entry.has_workspace_model() {
                let node = self.graph.add_bundle(&variant, true);
                variant.set_graph_node(node);
            }
            entry.set_variant(variant);
        }

        let java_search: BTreeSet<BundleId> = self.settings.java_search.iter().cloned().collect();
        for id in &java_search {
            if let Some(entry) = entries.get_mut(id) {
                entry.set_in_java_search(true);
            }
        }

        self.graph.resolve(false);
        info!(entries = entries.len(), "model registry initialized");

        RegistryState {
            entries,
            java_search,
        }
    }
}

/// Identifier and graph handle of the stored variant that `variant` replaces
fn stored_counterpart(
    entries: &EntryTable,
    variant: &ModelVariant,
) -> Option<(BundleId, Option<NodeId>)> {
    entries.values().find_map(|entry| {
        entry
            .variant(variant.source())
            .filter(|stored| stored.same_identity(variant))
            .map(|stored| (entry.id().clone(), stored.graph_node()))
    })
}

impl<WS, ES, G, C, P, S> ModelQueryPort for ModelRegistry<WS, ES, G, C, P, S>
where
    WS: ModelProvider,
    ES: ModelProvider,
    G: DependencyGraph,
    C: ClasspathManager,
    P: ProjectWorkspace,
    S: SearchIndex,
{
    fn find_entry(&self, id: &str) -> Option<ModelEntry> {
        ModelRegistry::find_entry(self, id)
    }

    fn find_model(&self, id: &str) -> Option<ModelVariant> {
        ModelRegistry::find_model(self, id)
    }

    fn all_active_models(&self, include_disabled: bool) -> Vec<ModelVariant> {
        ModelRegistry::all_active_models(self, include_disabled)
    }
}
