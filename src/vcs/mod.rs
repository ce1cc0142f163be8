//! Version-control integration.
//!
//! A [`VcsGateway`] exposes the handful of operations the `commit`, `purge`
//! and `env` commands need. Backends shell out to the VCS binary; the
//! backend is chosen once per process by [`detect_vcs`]. All paths passed
//! to a gateway are relative to its working directory, the directory that
//! contains `issues/`.

pub mod git;
pub mod hg;
pub mod message;
pub mod status;

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

use crate::error::{AppError, Result};
pub use git::GitGateway;
pub use hg::HgGateway;
pub use message::{ChangeBucket, CommitMessage, synthesize};
pub use status::{Classification, ClassifyOptions, StatusRecord, classify, parse_status_report};

/// Message used when the staged changes cannot be attributed to any issue.
pub const FALLBACK_COMMIT_MESSAGE: &str = "Added or removed issues with the tool \"bug\"";

/// Result of a commit attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOutcome {
    Committed,
    /// The VCS had nothing staged under the path.
    NothingToCommit,
}

/// Operations a version-control backend provides.
pub trait VcsGateway {
    /// Short backend name (`git`, `hg`).
    fn type_name(&self) -> &'static str;

    /// NUL-separated status records for the subtree, staged and unstaged.
    ///
    /// # Errors
    ///
    /// Returns `VcsOperationFailed` if the status command fails.
    fn status_report(&self, path: &Path) -> Result<Vec<u8>>;

    /// Staged diff for a single file.
    ///
    /// # Errors
    ///
    /// Returns `VcsOperationFailed` if the diff command fails.
    fn staged_diff(&self, path: &Path) -> Result<Vec<u8>>;

    /// Stage every change (including removals) under the subtree.
    ///
    /// # Errors
    ///
    /// Returns `VcsOperationFailed` if staging fails.
    fn stage_all(&self, path: &Path) -> Result<()>;

    /// Commit what is staged under the subtree.
    ///
    /// # Errors
    ///
    /// Returns `VcsOperationFailed` for failures other than an empty commit.
    fn commit(&self, message: &CommitMessage, path: &Path) -> Result<CommitOutcome>;

    /// Delete untracked files under the subtree.
    ///
    /// # Errors
    ///
    /// Returns `VcsOperationFailed` if the clean command fails.
    fn purge(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Hg,
}

impl VcsKind {
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Git => ".git",
            Self::Hg => ".hg",
        }
    }
}

/// A repository found around the issues directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedVcs {
    pub kind: VcsKind,
    /// Top-level directory of the repository.
    pub repo_root: PathBuf,
}

impl DetectedVcs {
    /// Gateway running commands from `workdir`.
    #[must_use]
    pub fn gateway(&self, workdir: &Path) -> Box<dyn VcsGateway> {
        let prefix = repo_prefix(&self.repo_root, workdir);
        match self.kind {
            VcsKind::Git => Box::new(GitGateway::new(workdir, prefix)),
            VcsKind::Hg => Box::new(HgGateway::new(workdir, prefix)),
        }
    }
}

/// Walk up from `start` looking for a `.git` or `.hg` marker.
#[must_use]
pub fn detect_vcs(start: &Path) -> Option<DetectedVcs> {
    let mut current = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    loop {
        for kind in [VcsKind::Git, VcsKind::Hg] {
            if current.join(kind.marker()).exists() {
                tracing::debug!(?kind, root = %current.display(), "Detected VCS");
                return Some(DetectedVcs {
                    kind,
                    repo_root: current,
                });
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Detect the VCS around `workdir` and open a gateway for it.
///
/// # Errors
///
/// Returns `VcsUnavailable` when no repository encloses `workdir`.
pub fn open_gateway(workdir: &Path) -> Result<Box<dyn VcsGateway>> {
    detect_vcs(workdir)
        .map(|vcs| vcs.gateway(workdir))
        .ok_or(AppError::VcsUnavailable)
}

/// Inputs for [`commit_issues`].
#[derive(Debug, Clone)]
pub struct CommitRequest<'a> {
    /// Issues directory, relative to the gateway working directory.
    pub issues_path: &'a Path,
    pub description_file: &'a str,
    pub autoclose: bool,
    pub prefix: Option<&'a str>,
    pub fallback: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    pub outcome: CommitOutcome,
    pub message: CommitMessage,
    pub close_refs: Vec<String>,
}

/// Stage, classify, synthesize a message and commit the issues directory.
///
/// # Errors
///
/// Returns an error if staging, the status query or the commit fails, or if
/// the message file cannot be written.
pub fn commit_issues(gateway: &dyn VcsGateway, request: &CommitRequest<'_>) -> Result<CommitReport> {
    gateway.stage_all(request.issues_path)?;

    let raw = gateway.status_report(request.issues_path)?;
    let records = parse_status_report(&raw);
    tracing::debug!(records = records.len(), "Parsed status report");

    let options = ClassifyOptions {
        description_file: request.description_file,
        autoclose: request.autoclose,
    };
    let classification = classify(&records, &options, |path| {
        gateway.staged_diff(Path::new(path))
    });

    let message = synthesize(&classification, request.prefix, request.fallback);
    tracing::info!(has_changes = message.has_changes, "Synthesized commit message");

    let outcome = gateway.commit(&message, request.issues_path)?;
    if outcome == CommitOutcome::NothingToCommit {
        tracing::info!("Nothing to commit");
    }

    Ok(CommitReport {
        outcome,
        message,
        close_refs: classification.close_refs,
    })
}

/// Write a commit message to a temporary file that lives until dropped.
pub(crate) fn write_message_file(message: &CommitMessage) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix("bug-commit").tempfile()?;
    file.write_all(message.file_contents().as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Run a command and return stdout, mapping a non-zero exit to
/// `VcsOperationFailed`.
pub(crate) fn run_checked(command: &mut Command, operation: &str) -> Result<Vec<u8>> {
    let output = run(command, operation)?;
    if !output.status.success() {
        return Err(AppError::vcs_failed(operation, failure_detail(&output)));
    }
    Ok(output.stdout)
}

pub(crate) fn run(command: &mut Command, operation: &str) -> Result<Output> {
    tracing::debug!(operation, ?command, "Running VCS command");
    command
        .output()
        .map_err(|e| AppError::vcs_failed(operation, e.to_string()))
}

pub(crate) fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.to_string()
    }
}

/// Re-root status records from repository-relative to workdir-relative paths.
pub(crate) fn strip_record_prefix(records: &mut [StatusRecord], prefix: &str) {
    if prefix.is_empty() {
        return;
    }
    for record in records {
        if let Some(rest) = record.path.strip_prefix(prefix) {
            record.path = rest.to_string();
        }
    }
}

/// Path of `workdir` inside the repository, `/`-separated with a trailing
/// `/`, or empty at the top level.
fn repo_prefix(repo_root: &Path, workdir: &Path) -> String {
    let workdir = dunce::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
    let Ok(relative) = workdir.strip_prefix(repo_root) else {
        return String::new();
    };
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}
