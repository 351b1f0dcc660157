use crate::model_management::domain::ProjectRef;
use crate::shared::Result;

/// ProjectWorkspace port for inspecting workspace projects
///
/// Reverse propagation uses it to find projects that reference a changed
/// project directly on their build path.
pub trait ProjectWorkspace {
    /// Every open project in the workspace
    fn open_projects(&self) -> Vec<ProjectRef>;

    /// Whether `project` carries the given nature
    ///
    /// # Errors
    /// Returns an error if the project cannot be inspected
    fn has_nature(&self, project: &ProjectRef, nature: &str) -> Result<bool>;

    /// Projects that `project` declares on its build path
    ///
    /// # Errors
    /// Returns an error if the project's build path is inaccessible
    fn build_path_references(&self, project: &ProjectRef) -> Result<Vec<ProjectRef>>;
}
