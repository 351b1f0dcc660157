use crate::application::dto::WorkspaceProject;
use crate::model_management::domain::ProjectRef;
use crate::ports::outbound::ProjectWorkspace;
use crate::shared::error::ModelError;
use crate::shared::Result;

/// InMemoryWorkspace adapter over a fixed project list
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspace {
    projects: Vec<WorkspaceProject>,
}

impl InMemoryWorkspace {
    pub fn new(projects: Vec<WorkspaceProject>) -> Self {
        Self { projects }
    }

    fn project(&self, project: &ProjectRef) -> Result<&WorkspaceProject> {
        self.projects
            .iter()
            .find(|p| &p.name == project)
            .ok_or_else(|| {
                ModelError::ProjectNotFound {
                    name: project.to_string(),
                }
                .into()
            })
    }
}

impl ProjectWorkspace for InMemoryWorkspace {
    fn open_projects(&self) -> Vec<ProjectRef> {
        self.projects
            .iter()
            .filter(|p| p.open)
            .map(|p| p.name.clone())
            .collect()
    }

    fn has_nature(&self, project: &ProjectRef, nature: &str) -> Result<bool> {
        Ok(self.project(project)?.natures.iter().any(|n| n == nature))
    }

    fn build_path_references(&self, project: &ProjectRef) -> Result<Vec<ProjectRef>> {
        Ok(self.project(project)?.references.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> InMemoryWorkspace {
        InMemoryWorkspace::new(vec![
            WorkspaceProject::new("core").with_nature("plugin"),
            WorkspaceProject::new("ui")
                .with_nature("plugin")
                .with_reference("core"),
            WorkspaceProject::new("archived").closed(),
        ])
    }

    #[test]
    fn test_open_projects_skips_closed() {
        let names: Vec<String> = workspace()
            .open_projects()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(names, ["core", "ui"]);
    }

    #[test]
    fn test_nature_and_references() {
        let ws = workspace();
        assert!(ws.has_nature(&ProjectRef::new("ui"), "plugin").unwrap());
        assert!(!ws.has_nature(&ProjectRef::new("archived"), "plugin").unwrap());
        assert_eq!(
            ws.build_path_references(&ProjectRef::new("ui")).unwrap(),
            [ProjectRef::new("core")]
        );
    }

    #[test]
    fn test_unknown_project_is_an_error() {
        let err = workspace()
            .build_path_references(&ProjectRef::new("ghost"))
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
