use std::path::{Path, PathBuf};
use std::process::Command;

use super::message::CommitMessage;
use super::status::{StatusRecord, render_status_report};
use super::{
    CommitOutcome, VcsGateway, failure_detail, run, run_checked, strip_record_prefix,
    write_message_file,
};
use crate::error::{AppError, Result};

/// Mercurial backend.
///
/// Mercurial has no index: `stage_all` runs `addremove` so that new and
/// missing files are scheduled, and the staged diff is the working diff.
#[derive(Debug, Clone)]
pub struct HgGateway {
    workdir: PathBuf,
    prefix: String,
}

impl HgGateway {
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            prefix: prefix.into(),
        }
    }

    fn hg(&self) -> Command {
        let mut command = Command::new("hg");
        command
            .current_dir(&self.workdir)
            .args(["--config", "ui.relative-paths=no"]);
        command
    }
}

/// Convert `hg status --print0` output to two-column status records.
pub(crate) fn records_from_hg(raw: &[u8]) -> Vec<StatusRecord> {
    String::from_utf8_lossy(raw)
        .split('\0')
        .filter_map(|entry| {
            let mut chars = entry.chars();
            let code = chars.next()?;
            if chars.next() != Some(' ') {
                return None;
            }
            let path = chars.as_str();
            let code = match code {
                'A' => "A ",
                'R' | '!' => "D ",
                'M' => "M ",
                '?' => "??",
                _ => return None,
            };
            Some(StatusRecord::new(code, path))
        })
        .collect()
}

/// `hg commit` exits non-zero when there is nothing to commit.
fn failed_commit_outcome(detail: String) -> Result<CommitOutcome> {
    if detail.contains("nothing changed") {
        return Ok(CommitOutcome::NothingToCommit);
    }
    Err(AppError::vcs_failed("hg commit", detail))
}

impl VcsGateway for HgGateway {
    fn type_name(&self) -> &'static str {
        "hg"
    }

    fn status_report(&self, path: &Path) -> Result<Vec<u8>> {
        let raw = run_checked(
            self.hg().args(["status", "--print0", "--"]).arg(path),
            "hg status",
        )?;
        let mut records = records_from_hg(&raw);
        strip_record_prefix(&mut records, &self.prefix);
        Ok(render_status_report(&records))
    }

    fn staged_diff(&self, path: &Path) -> Result<Vec<u8>> {
        run_checked(self.hg().args(["diff", "--"]).arg(path), "hg diff")
    }

    fn stage_all(&self, path: &Path) -> Result<()> {
        run_checked(self.hg().args(["addremove", "--"]).arg(path), "hg addremove")?;
        Ok(())
    }

    fn commit(&self, message: &CommitMessage, path: &Path) -> Result<CommitOutcome> {
        let file = write_message_file(message)?;
        let output = run(
            self.hg()
                .args(["commit", "-l"])
                .arg(file.path())
                .arg("--")
                .arg(path),
            "hg commit",
        )?;

        if output.status.success() {
            tracing::info!(path = %path.display(), "Committed issues");
            return Ok(CommitOutcome::Committed);
        }
        failed_commit_outcome(failure_detail(&output))
    }

    fn purge(&self, path: &Path) -> Result<()> {
        run_checked(
            self.hg()
                .args(["--config", "extensions.purge=", "purge", "--"])
                .arg(path),
            "hg purge",
        )?;
        Ok(())
    }
}
