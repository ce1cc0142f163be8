use std::path::Path;

use crate::cli::CommitArgs;
use crate::config::{CliOverrides, ISSUES_DIR, load_config};
use crate::error::{AppError, Result};
use crate::format::print_json;
use crate::vcs::{self, CommitOutcome, CommitRequest, FALLBACK_COMMIT_MESSAGE};

/// Execute the commit command.
///
/// # Errors
///
/// Returns `VcsUnavailable` outside a repository, or the failing VCS
/// operation. An empty commit is not an error.
pub fn execute(args: &CommitArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let mut overrides = overrides.clone();
    if args.no_autoclose {
        overrides.autoclose = Some(false);
    }
    let config = load_config(&overrides)?;

    let detected = vcs::detect_vcs(&config.root).ok_or(AppError::VcsUnavailable)?;
    let gateway = detected.gateway(&config.root);

    let request = CommitRequest {
        issues_path: Path::new(ISSUES_DIR),
        description_file: &config.description_file,
        autoclose: config.autoclose,
        prefix: config.commit_prefix.as_deref(),
        fallback: FALLBACK_COMMIT_MESSAGE,
    };
    let report = vcs::commit_issues(gateway.as_ref(), &request)?;

    if json {
        return print_json(&report);
    }
    match report.outcome {
        CommitOutcome::Committed => {
            let summary = report.message.text.lines().next().unwrap_or_default();
            println!("Committed: {summary}");
        }
        CommitOutcome::NothingToCommit => println!("No new issues committed."),
    }
    Ok(())
}
