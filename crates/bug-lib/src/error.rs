//! Error types for `bug-lib`.
//!
//! Resolution misses (`NotFound`, `InvalidIndex`) are ordinary outcomes for
//! callers that fall back to other lookups, so they are cheap to match on.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for bug-lib operations.
#[derive(Error, Debug)]
pub enum BugError {
    // === Resolution Errors ===
    /// No issue matches the supplied token.
    #[error("Not found {token}")]
    NotFound { token: String },

    /// Numeric token outside `1..=count`.
    #[error("Invalid issue index {index} (have {count} issues)")]
    InvalidIndex { index: i64, count: usize },

    // === Issue Errors ===
    /// The issue has no description file.
    #[error("No description: {}", path.display())]
    NoDescription { path: PathBuf },

    /// Creating or relabeling would clobber an existing issue directory.
    #[error("Issue already exists: {directory}")]
    AlreadyExists { directory: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BugError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_found(token: impl Into<String>) -> Self {
        Self::NotFound {
            token: token.into(),
        }
    }

    /// True when a token failed to resolve to an issue.
    #[must_use]
    pub const fn is_resolution_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidIndex { .. })
    }
}

/// Result type using `BugError`.
pub type Result<T> = std::result::Result<T, BugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_misses_are_distinguishable() {
        assert!(BugError::not_found("x").is_resolution_miss());
        assert!(
            BugError::InvalidIndex {
                index: 9,
                count: 2
            }
            .is_resolution_miss()
        );
        assert!(!BugError::validation("title", "empty").is_resolution_miss());
    }

    #[test]
    fn not_found_message_names_token() {
        assert_eq!(BugError::not_found("abc").to_string(), "Not found abc");
    }
}
