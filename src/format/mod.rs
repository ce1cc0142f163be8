//! Output formatting for `bug_rust`.
//!
//! Plain text for people, `serde_json` documents for `--json`.

mod output;
mod text;

pub use output::{EnvReport, IssueDetails, IssueSummary, RoadmapGroup, VcsReport};
pub use text::{format_issue_detail, format_issue_label, format_issue_line, format_roadmap};

use crate::error::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
