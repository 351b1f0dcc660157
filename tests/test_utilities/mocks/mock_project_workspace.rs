use bundle_model::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock ProjectWorkspace for testing
///
/// Projects registered with `with_broken_build_path` fail when their build
/// path is inspected.
#[derive(Default, Clone)]
pub struct MockProjectWorkspace {
    pub projects: Arc<Mutex<BTreeMap<ProjectRef, WorkspaceProject>>>,
    pub broken: Arc<Mutex<HashSet<ProjectRef>>>,
}

impl MockProjectWorkspace {
    pub fn new(projects: Vec<WorkspaceProject>) -> Self {
        let projects = projects
            .into_iter()
            .map(|project| (project.name.clone(), project))
            .collect();
        Self {
            projects: Arc::new(Mutex::new(projects)),
            broken: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with_broken_build_path(self, name: &str) -> Self {
        self.broken.lock().unwrap().insert(ProjectRef::new(name));
        self
    }
}

impl ProjectWorkspace for MockProjectWorkspace {
    fn open_projects(&self) -> Vec<ProjectRef> {
        self.projects
            .lock()
            .unwrap()
            .values()
            .filter(|project| project.open)
            .map(|project| project.name.clone())
            .collect()
    }

    fn has_nature(&self, project: &ProjectRef, nature: &str) -> Result<bool> {
        let projects = self.projects.lock().unwrap();
        match projects.get(project) {
            Some(p) => Ok(p.natures.iter().any(|n| n == nature)),
            None => anyhow::bail!("Mock project not found: {}", project),
        }
    }

    fn build_path_references(&self, project: &ProjectRef) -> Result<Vec<ProjectRef>> {
        if self.broken.lock().unwrap().contains(project) {
            anyhow::bail!("Mock build path failure for {}", project);
        }
        let projects = self.projects.lock().unwrap();
        match projects.get(project) {
            Some(p) => Ok(p.references.clone()),
            None => anyhow::bail!("Mock project not found: {}", project),
        }
    }
}
