use std::path::Path;

use crate::config::{CliOverrides, ISSUES_DIR, load_config};
use crate::error::Result;
use crate::vcs;

/// Execute the purge command: drop untracked files under the issues
/// directory.
///
/// # Errors
///
/// Returns `VcsUnavailable` outside a repository, or the clean failure.
pub fn execute(overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let gateway = vcs::open_gateway(&config.root)?;
    gateway.purge(Path::new(ISSUES_DIR))?;
    tracing::info!(dir = %config.issues_dir.display(), vcs = gateway.type_name(), "Purged untracked files");
    Ok(())
}
