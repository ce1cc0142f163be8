use std::path::{Path, PathBuf};
use std::process::Command;

use super::message::CommitMessage;
use super::status::{parse_status_report, render_status_report};
use super::{
    CommitOutcome, VcsGateway, failure_detail, run, run_checked, strip_record_prefix,
    write_message_file,
};
use crate::error::{AppError, Result};

/// Git backend.
#[derive(Debug, Clone)]
pub struct GitGateway {
    workdir: PathBuf,
    prefix: String,
}

impl GitGateway {
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            prefix: prefix.into(),
        }
    }

    fn git(&self) -> Command {
        let mut command = Command::new("git");
        command.current_dir(&self.workdir);
        command
    }

    /// True when the index differs from `HEAD` under `path`.
    fn has_staged_changes(&self, path: &Path) -> Result<bool> {
        let output = run(
            self.git()
                .args(["diff", "--cached", "--quiet", "--"])
                .arg(path),
            "git diff --cached",
        )?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(AppError::vcs_failed(
                "git diff --cached",
                failure_detail(&output),
            )),
        }
    }
}

impl VcsGateway for GitGateway {
    fn type_name(&self) -> &'static str {
        "git"
    }

    fn status_report(&self, path: &Path) -> Result<Vec<u8>> {
        let raw = run_checked(
            self.git()
                .args(["status", "-z", "--porcelain", "--untracked-files=all", "--"])
                .arg(path),
            "git status",
        )?;
        let mut records = parse_status_report(&raw);
        strip_record_prefix(&mut records, &self.prefix);
        Ok(render_status_report(&records))
    }

    fn staged_diff(&self, path: &Path) -> Result<Vec<u8>> {
        run_checked(
            self.git().args(["diff", "--staged", "--"]).arg(path),
            "git diff --staged",
        )
    }

    fn stage_all(&self, path: &Path) -> Result<()> {
        run_checked(self.git().args(["add", "-A", "--"]).arg(path), "git add")?;
        Ok(())
    }

    fn commit(&self, message: &CommitMessage, path: &Path) -> Result<CommitOutcome> {
        if !self.has_staged_changes(path)? {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let file = write_message_file(message)?;
        let output = run(
            self.git()
                .args(["commit", "-q", "-F"])
                .arg(file.path())
                .arg("--")
                .arg(path),
            "git commit",
        )?;

        if output.status.success() {
            tracing::info!(path = %path.display(), "Committed issues");
            return Ok(CommitOutcome::Committed);
        }

        let detail = failure_detail(&output);
        if detail.contains("nothing to commit") || detail.contains("no changes added") {
            return Ok(CommitOutcome::NothingToCommit);
        }
        Err(AppError::vcs_failed("git commit", detail))
    }

    fn purge(&self, path: &Path) -> Result<()> {
        run_checked(self.git().args(["clean", "-fd", "--"]).arg(path), "git clean")?;
        Ok(())
    }
}
