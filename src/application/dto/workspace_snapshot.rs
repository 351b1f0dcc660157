use crate::model_management::domain::{ModelVariant, ProjectRef};

/// One project as the workspace sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceProject {
    pub name: ProjectRef,
    pub open: bool,
    pub natures: Vec<String>,
    /// Projects declared on this project's build path
    pub references: Vec<ProjectRef>,
}

impl WorkspaceProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: ProjectRef::new(name),
            open: true,
            natures: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_nature(mut self, nature: impl Into<String>) -> Self {
        self.natures.push(nature.into());
        self
    }

    pub fn with_reference(mut self, project: impl Into<String>) -> Self {
        self.references.push(ProjectRef::new(project));
        self
    }

    pub fn closed(mut self) -> Self {
        self.open = false;
        self
    }
}

/// WorkspaceSnapshot - Everything needed to populate a registry offline
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    pub workspace: Vec<ModelVariant>,
    pub external: Vec<ModelVariant>,
    pub projects: Vec<WorkspaceProject>,
}
