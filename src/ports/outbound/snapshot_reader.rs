use crate::application::dto::WorkspaceSnapshot;
use crate::shared::Result;
use std::path::Path;

/// SnapshotReader port for loading a workspace snapshot
pub trait SnapshotReader {
    /// Reads and validates the snapshot at `path`
    ///
    /// # Errors
    /// Returns an error if the file is unreadable, unsafe to read, or malformed
    fn read_snapshot(&self, path: &Path) -> Result<WorkspaceSnapshot>;
}
