//! Command implementations.
//!
//! Every command loads configuration itself (so `dir`, `env` and `version`
//! stay cheap) and prints either text or JSON.

pub mod close;
pub mod commit;
pub mod create;
pub mod dir;
pub mod edit;
pub mod env;
pub mod field;
pub mod find;
pub mod identifier;
pub mod list;
pub mod purge;
pub mod relabel;
pub mod roadmap;
pub mod tag;
pub mod version;

use bug_lib::{Issue, IssueStore};

use crate::format::IssueSummary;

/// 1-based scan position of an issue, or 0 if it vanished meanwhile.
pub(crate) fn position_of(store: &IssueStore, issue: &Issue) -> usize {
    store
        .scan()
        .iter()
        .position(|name| name == issue.directory_name())
        .map_or(0, |index| index + 1)
}

/// Summaries of every issue, in scan order.
pub(crate) fn all_summaries(store: &IssueStore) -> Vec<IssueSummary> {
    store
        .all_issues()
        .iter()
        .enumerate()
        .map(|(index, issue)| IssueSummary::from_issue(issue, index + 1))
        .collect()
}

pub(crate) fn summary_of(store: &IssueStore, issue: &Issue) -> IssueSummary {
    IssueSummary::from_issue(issue, position_of(store, issue))
}
