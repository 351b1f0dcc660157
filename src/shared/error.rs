use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish usage mistakes from
/// failures while loading or querying the workspace snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable snapshot, unknown bundle, bad config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the bundle model.
///
/// Registry-wide operations never surface these to their caller: they are
/// caught per unit and logged. They reach the user only through explicit
/// queries (closure requests, snapshot loading, configuration).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid bundle identifier '{id}'\nReason: {reason}\n\n💡 Hint: Bundle identifiers may only contain alphanumerics, '.', '-' and '_'")]
    InvalidBundleId { id: String, reason: String },

    #[error("Unknown bundle: {id}\n\n💡 Hint: Check that the bundle is part of the workspace or the external bundle set")]
    UnknownBundle { id: String },

    #[error("Cannot get project for workspace bundle '{id}'\n\n💡 Hint: The bundle's underlying project is missing or closed")]
    MissingProject { id: String },

    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    #[error("Failed to read snapshot file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    SnapshotReadError { path: PathBuf, details: String },

    #[error("Failed to parse snapshot file: {path}\nDetails: {details}\n\n💡 Hint: Snapshots must be JSON (.json) or TOML (.toml)")]
    SnapshotParseError { path: PathBuf, details: String },

    /// Validation error for builder patterns and configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_invalid_bundle_id_display() {
        let error = ModelError::InvalidBundleId {
            id: "bad id".to_string(),
            reason: "contains whitespace".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid bundle identifier 'bad id'"));
        assert!(display.contains("contains whitespace"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_unknown_bundle_display() {
        let error = ModelError::UnknownBundle {
            id: "com.example.missing".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown bundle: com.example.missing"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_missing_project_display() {
        let error = ModelError::MissingProject {
            id: "com.example.core".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Cannot get project"));
        assert!(display.contains("com.example.core"));
    }

    #[test]
    fn test_snapshot_parse_error_display() {
        let error = ModelError::SnapshotParseError {
            path: PathBuf::from("/test/workspace.json"),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse snapshot file"));
        assert!(display.contains("/test/workspace.json"));
        assert!(display.contains("expected value at line 1"));
    }

    #[test]
    fn test_security_error_display() {
        let error = ModelError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
