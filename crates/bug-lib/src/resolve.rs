//! Heuristic resolution of a user-supplied token to one issue.
//!
//! Precedence:
//! 1. An integer token is a 1-based position in scan order.
//! 2. The first issue whose identifier equals the token.
//! 3. Otherwise the first issue whose identifier contains the token.
//!
//! An exact identifier match always wins over a substring match, even one
//! that appears earlier in scan order.

use crate::error::{BugError, Result};
use crate::model::Issue;
use crate::store::IssueStore;

/// Resolve `token` against `store`.
///
/// # Errors
///
/// Returns `InvalidIndex` for an out-of-range integer token and `NotFound`
/// when no identifier matches. Both satisfy
/// [`BugError::is_resolution_miss`].
pub fn resolve(store: &IssueStore, token: &str) -> Result<Issue> {
    let token = token.trim();
    if token.is_empty() {
        return Err(BugError::not_found(token));
    }

    if let Ok(index) = token.parse::<i64>() {
        return store.by_index(index);
    }

    let mut candidate: Option<Issue> = None;
    for issue in store.all_issues() {
        let Some(identifier) = issue.identifier() else {
            continue;
        };
        if identifier == token {
            tracing::debug!(token, issue = %issue.directory_name(), "Exact identifier match");
            return Ok(issue);
        }
        if candidate.is_none() && identifier.contains(token) {
            candidate = Some(issue);
        }
    }

    match candidate {
        Some(issue) => {
            tracing::debug!(token, issue = %issue.directory_name(), "Substring identifier match");
            Ok(issue)
        }
        None => Err(BugError::not_found(token)),
    }
}

impl IssueStore {
    /// Convenience wrapper around [`resolve`].
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve(&self, token: &str) -> Result<Issue> {
        resolve(self, token)
    }
}
