use crate::model_management::domain::{
    AffectedSet, BundleId, EntryTable, GraphDelta, ModelEntry, ProjectRef,
};
use crate::ports::outbound::{ClasspathManager, ProjectWorkspace};
use std::collections::HashMap;
use tracing::{debug, warn};

/// AffectedUnitsPropagator service for classpath change propagation
///
/// Computes every build unit whose classpath container must be regenerated
/// after a dependency change, including projects that reach a changed project
/// only through their own build path.
pub struct AffectedUnitsPropagator<'a, C, P> {
    classpath: &'a C,
    projects: &'a P,
    nature: &'a str,
}

impl<'a, C, P> AffectedUnitsPropagator<'a, C, P>
where
    C: ClasspathManager,
    P: ProjectWorkspace,
{
    /// # Arguments
    /// * `classpath` - Computes containers for the entries that need one
    /// * `projects` - Workspace inspection for reverse propagation
    /// * `nature` - Nature a project must carry to be considered
    pub fn new(classpath: &'a C, projects: &'a P, nature: &'a str) -> Self {
        Self {
            classpath,
            projects,
            nature,
        }
    }

    /// Computes the affected build units and their new containers
    ///
    /// # Arguments
    /// * `delta` - Graph change set, or None to recompute every entry
    /// * `entries` - Entry snapshot for this pass; schedule marks are written here
    /// * `force` - Recompute even entries not marked changed in the last delta
    ///
    /// # Returns
    /// The batch to install; units whose container failed are absent
    pub fn propagate(
        &self,
        delta: Option<&GraphDelta>,
        entries: &mut EntryTable,
        force: bool,
    ) -> AffectedSet {
        let mut affected = AffectedSet::new();

        match delta {
            None => {
                for entry in entries.values_mut() {
                    self.schedule(entry, force, &mut affected);
                }
            }
            Some(delta) => {
                for change in delta.changes() {
                    if let Some(entry) = entries.get_mut(change.id()) {
                        self.schedule(entry, force, &mut affected);
                    }
                }
                self.add_additional_dependency_projects(entries, force, &mut affected);
            }
        }

        debug!(units = affected.len(), "classpath propagation complete");
        affected
    }

    /// Adds projects that declare an affected project on their build path,
    /// transitively, regardless of the bundle dependency graph
    fn add_additional_dependency_projects(
        &self,
        entries: &mut EntryTable,
        force: bool,
        affected: &mut AffectedSet,
    ) {
        let mut stack: Vec<ProjectRef> = affected.projects().cloned().collect();

        let by_project: HashMap<ProjectRef, BundleId> = entries
            .values()
            .filter_map(|e| e.project().map(|p| (p.clone(), e.id().clone())))
            .collect();

        let mut candidates: Vec<(ProjectRef, Vec<ProjectRef>)> = Vec::new();
        for project in self.projects.open_projects() {
            if stack.contains(&project) {
                continue;
            }
            match self.projects.has_nature(&project, self.nature) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(project = %project, error = %e, "skipping project with unreadable nature");
                    continue;
                }
            }
            match self.projects.build_path_references(&project) {
                Ok(references) => candidates.push((project, references)),
                Err(e) => {
                    warn!(project = %project, error = %e, "skipping project with inaccessible build path");
                }
            }
        }

        while let Some(changed) = stack.pop() {
            let snapshot = candidates.clone();
            for (candidate, references) in snapshot {
                if !references.contains(&changed) {
                    continue;
                }
                candidates.retain(|(p, _)| p != &candidate);
                debug!(project = %candidate, via = %changed, "project references changed project");

                if let Some(entry) = by_project.get(&candidate).and_then(|id| entries.get_mut(id)) {
                    self.schedule(entry, force, affected);
                }
                stack.push(candidate);
            }
        }
    }

    /// Computes and records the entry's container if it needs one this pass
    fn schedule(&self, entry: &mut ModelEntry, force: bool, affected: &mut AffectedSet) {
        match entry.should_recompute_classpath(force) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                warn!(bundle = %entry.id(), error = %e, "skipping classpath recomputation");
                return;
            }
        }

        let (Some(project), Some(model)) = (entry.project().cloned(), entry.active_model()) else {
            return;
        };
        if affected.contains(&project) {
            entry.mark_classpath_scheduled();
            return;
        }

        match self.classpath.build_container(model) {
            Ok(container) => {
                affected.insert_if_absent(project, container);
            }
            Err(e) => {
                warn!(bundle = %entry.id(), error = %e, "failed to compute classpath container");
            }
        }
        entry.mark_classpath_scheduled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_management::domain::{ClasspathContainer, DeltaKind, GraphChange, ModelVariant};
    use crate::shared::Result;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct CountingClasspath {
        built: RefCell<Vec<String>>,
        failing: Vec<String>,
    }

    impl CountingClasspath {
        fn new() -> Self {
            Self {
                built: RefCell::new(Vec::new()),
                failing: Vec::new(),
            }
        }

        fn failing_for(id: &str) -> Self {
            Self {
                built: RefCell::new(Vec::new()),
                failing: vec![id.to_string()],
            }
        }
    }

    impl ClasspathManager for CountingClasspath {
        fn build_container(&self, model: &ModelVariant) -> Result<ClasspathContainer> {
            let id = model.id().unwrap().clone();
            if self.failing.contains(&id.to_string()) {
                anyhow::bail!("classpath of {} is inaccessible", id);
            }
            self.built.borrow_mut().push(id.to_string());
            Ok(ClasspathContainer::new(id, vec![]))
        }

        fn install_containers(&self, _affected: AffectedSet) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FixedWorkspace {
        projects: Vec<(ProjectRef, bool, Vec<ProjectRef>)>,
    }

    impl FixedWorkspace {
        fn project(mut self, name: &str, plugin: bool, references: &[&str]) -> Self {
            self.projects.push((
                ProjectRef::new(name),
                plugin,
                references.iter().map(|r| ProjectRef::new(*r)).collect(),
            ));
            self
        }
    }

    impl ProjectWorkspace for FixedWorkspace {
        fn open_projects(&self) -> Vec<ProjectRef> {
            self.projects.iter().map(|(p, _, _)| p.clone()).collect()
        }

        fn has_nature(&self, project: &ProjectRef, _nature: &str) -> Result<bool> {
            Ok(self
                .projects
                .iter()
                .any(|(p, plugin, _)| p == project && *plugin))
        }

        fn build_path_references(&self, project: &ProjectRef) -> Result<Vec<ProjectRef>> {
            self.projects
                .iter()
                .find(|(p, _, _)| p == project)
                .map(|(_, _, refs)| refs.clone())
                .ok_or_else(|| anyhow::anyhow!("no project {}", project))
        }
    }

    fn bid(id: &str) -> BundleId {
        BundleId::new(id).unwrap()
    }

    fn table(ids: &[&str]) -> EntryTable {
        let mut table = EntryTable::new();
        for id in ids {
            let mut entry = ModelEntry::new(bid(id));
            entry.set_variant(ModelVariant::workspace(
                Some(bid(id)),
                ProjectRef::new(*id),
                format!("/ws/{}", id),
            ));
            table.insert(bid(id), entry);
        }
        table
    }

    fn changed(ids: &[&str]) -> GraphDelta {
        GraphDelta::new(
            ids.iter()
                .map(|id| GraphChange::new(bid(id), DeltaKind::Changed))
                .collect(),
        )
    }

    fn projects(affected: &AffectedSet) -> Vec<&str> {
        affected.projects().map(ProjectRef::name).collect()
    }

    #[test]
    fn test_full_recompute_covers_workspace_entries() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default();
        let mut entries = table(&["a", "b"]);
        let mut external = ModelEntry::new(bid("ext"));
        external.set_variant(ModelVariant::external(Some(bid("ext")), "/target/ext.jar"));
        entries.insert(bid("ext"), external);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(None, &mut entries, true);

        assert_eq!(projects(&affected), ["a", "b"]);
    }

    #[test]
    fn test_incremental_only_changed_entries() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("a", true, &[])
            .project("b", true, &[]);
        let mut entries = table(&["a", "b"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["a", "unknown"])), &mut entries, true);

        assert_eq!(projects(&affected), ["a"]);
    }

    #[test]
    fn test_reverse_propagation_reaches_referencing_project() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("p1", true, &[])
            .project("p2", true, &["p1"])
            .project("p3", true, &["p2"])
            .project("unrelated", true, &[]);
        let mut entries = table(&["p1", "p2", "p3", "unrelated"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["p1"])), &mut entries, true);

        assert_eq!(projects(&affected), ["p1", "p2", "p3"]);
    }

    #[test]
    fn test_reverse_propagation_through_project_without_entry() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("p1", true, &[])
            .project("plain", true, &["p1"])
            .project("p3", true, &["plain"]);
        let mut entries = table(&["p1", "p3"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["p1"])), &mut entries, true);

        assert_eq!(projects(&affected), ["p1", "p3"]);
    }

    #[test]
    fn test_reverse_propagation_ignores_other_natures() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("p1", true, &[])
            .project("java-only", false, &["p1"]);
        let mut entries = table(&["p1", "java-only"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["p1"])), &mut entries, true);

        assert_eq!(projects(&affected), ["p1"]);
    }

    #[test]
    fn test_diamond_computes_each_unit_once() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("base", true, &[])
            .project("left", true, &["base"])
            .project("right", true, &["base"])
            .project("top", true, &["left", "right"]);
        let mut entries = table(&["base", "left", "right", "top"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected =
            propagator.propagate(Some(&changed(&["base", "base"])), &mut entries, true);

        assert_eq!(projects(&affected), ["base", "left", "right", "top"]);
        let built = classpath.built.borrow();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in built.iter() {
            *counts.entry(id.as_str()).or_default() += 1;
        }
        assert!(counts.values().all(|c| *c == 1));
        assert_eq!(built.len(), 4);
    }

    #[test]
    fn test_reference_cycle_terminates() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default()
            .project("a", true, &["b"])
            .project("b", true, &["a"]);
        let mut entries = table(&["a", "b"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["a"])), &mut entries, true);

        assert_eq!(projects(&affected), ["a", "b"]);
    }

    #[test]
    fn test_failed_container_is_omitted() {
        let classpath = CountingClasspath::failing_for("p2");
        let workspace = FixedWorkspace::default()
            .project("p1", true, &[])
            .project("p2", true, &["p1"])
            .project("p3", true, &["p2"]);
        let mut entries = table(&["p1", "p2", "p3"]);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(Some(&changed(&["p1"])), &mut entries, true);

        assert_eq!(projects(&affected), ["p1", "p3"]);
    }

    #[test]
    fn test_entry_without_project_is_skipped() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default();
        let mut entries = table(&["a"]);
        let mut broken = ModelEntry::new(bid("broken"));
        broken.set_variant(
            ModelVariant::workspace(Some(bid("broken")), ProjectRef::new("x"), "/ws/broken")
                .without_project(),
        );
        entries.insert(bid("broken"), broken);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(None, &mut entries, true);

        assert_eq!(projects(&affected), ["a"]);
    }

    #[test]
    fn test_unforced_pass_uses_last_delta_marks() {
        let classpath = CountingClasspath::new();
        let workspace = FixedWorkspace::default();
        let mut entries = table(&["a", "b"]);
        entries.get_mut(&bid("b")).unwrap().mark_changed_in_last_delta(true);

        let propagator = AffectedUnitsPropagator::new(&classpath, &workspace, "nature");
        let affected = propagator.propagate(None, &mut entries, false);

        assert_eq!(projects(&affected), ["b"]);
    }
}
