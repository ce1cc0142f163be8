//! Error types and handling for `bug_rust`.
//!
//! Store and resolver failures come from `bug_lib` and are wrapped as
//! [`AppError::Store`]. VCS failures are surfaced as diagnostics; "nothing
//! to commit" is not an error at all (see [`crate::vcs::CommitOutcome`]).

use std::path::PathBuf;
use thiserror::Error;

pub use bug_lib::BugError;

/// Primary error type for the `bug` binary.
#[derive(Error, Debug)]
pub enum AppError {
    // === Store Errors ===
    /// Issue store or resolver error.
    #[error(transparent)]
    Store(#[from] BugError),

    // === Workspace Errors ===
    /// No `issues` directory could be located.
    #[error(
        "Could not find issues directory. Set PMIT or create an `issues` directory in a parent of the working directory"
    )]
    NotInitialized,

    // === VCS Errors ===
    /// No supported version-control system around the issues directory.
    #[error("No supported VCS found (purge and commit commands unavailable)")]
    VcsUnavailable,

    /// A VCS child process exited unsuccessfully.
    #[error("{operation} failed: {detail}")]
    VcsOperationFailed { operation: String, detail: String },

    // === Usage Errors ===
    /// Usage error detected after argument parsing.
    #[error("{0}")]
    Usage(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File missing at a path the user supplied.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Wrapped errors ===
    /// Process glue (editor invocation and the like).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    #[must_use]
    pub fn vcs_failed(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::VcsOperationFailed {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    /// True when a token did not resolve to an issue.
    #[must_use]
    pub const fn is_resolution_miss(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_resolution_miss())
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotInitialized => 2,
            Self::Store(e) if e.is_resolution_miss() => 3,
            Self::Usage(_) => 64,
            _ => 1,
        }
    }
}

/// Result type using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(AppError::NotInitialized.exit_code(), 2);
        assert_eq!(AppError::from(BugError::not_found("x")).exit_code(), 3);
        assert_eq!(AppError::VcsUnavailable.exit_code(), 1);
        assert_eq!(AppError::Usage("bad".into()).exit_code(), 64);
    }

    #[test]
    fn store_errors_are_transparent() {
        let err = AppError::from(BugError::not_found("abc"));
        assert_eq!(err.to_string(), "Not found abc");
        assert!(err.is_resolution_miss());
    }

    #[test]
    fn vcs_failure_message() {
        let err = AppError::vcs_failed("git add", "fatal: not a git repository");
        assert_eq!(err.to_string(), "git add failed: fatal: not a git repository");
    }
}
