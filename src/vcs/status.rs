//! Classification of a machine-readable VCS status report.
//!
//! The report is a sequence of NUL-separated records, each
//! `<2-char code><space><path>` with paths relative to the directory that
//! contains `issues/`. Every record is attributed to an issue by the path
//! segment between its first and last `/`, and flags are OR-merged per
//! issue. Bucket selection happens later in [`super::message`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

use bug_lib::Field;

/// Records shorter than this cannot hold a code, an issue segment and a
/// file name, and are skipped as partial output.
pub const MIN_RECORD_LEN: usize = 8;

/// Issue name used for paths without a segment between separators.
pub const UNKNOWN_ISSUE: &str = "???";

static CLOSE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^-Github:(.*)$").expect("close reference regex"));

/// One entry of a status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    /// Two-character change code (`"A "`, `"D "`, `" M"`, ...).
    pub code: String,
    pub path: String,
}

impl StatusRecord {
    #[must_use]
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
        }
    }

    /// Primary change letter: the staged column, or the worktree column when
    /// nothing is staged.
    #[must_use]
    pub fn change(&self) -> char {
        let mut chars = self.code.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), Some(y)) => y,
            (Some(x), _) => x,
            (None, _) => ' ',
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.change() == 'D'
    }

    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self.change(), 'A' | '?')
    }

    /// Render back into the wire form, without the trailing NUL.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.code, self.path)
    }
}

/// Parse a NUL-separated status report.
///
/// Rename and copy records carry their source path in the following field;
/// that field is consumed so it is not mistaken for a record.
#[must_use]
pub fn parse_status_report(raw: &[u8]) -> Vec<StatusRecord> {
    let text = String::from_utf8_lossy(raw);
    let mut fields = text.split('\0');
    let mut records = Vec::new();

    while let Some(field) = fields.next() {
        let field = field.trim_end_matches(['\n', '\r']);
        let (Some(code), Some(path)) = (field.get(..2), field.get(3..)) else {
            if !field.is_empty() {
                tracing::trace!(field, "Skipping malformed status record");
            }
            continue;
        };
        if field.len() < MIN_RECORD_LEN {
            tracing::trace!(field, "Skipping short status record");
            continue;
        }
        if code.starts_with(['R', 'C']) {
            fields.next();
        }
        records.push(StatusRecord::new(code, path));
    }

    records
}

/// Join records into a NUL-separated report.
#[must_use]
pub fn render_status_report(records: &[StatusRecord]) -> Vec<u8> {
    let mut out = Vec::new();
    for record in records {
        out.extend_from_slice(record.to_wire().as_bytes());
        out.push(0);
    }
    out
}

/// Issue name for a path: the segment strictly between the first and last
/// separator, or [`UNKNOWN_ISSUE`].
#[must_use]
pub fn issue_name(path: &str) -> &str {
    match (path.find('/'), path.rfind('/')) {
        (Some(first), Some(last)) if first + 1 < last => &path[first + 1..last],
        _ => UNKNOWN_ISSUE,
    }
}

/// Raw per-issue flags. Several may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    pub added: bool,
    pub deleted: bool,
    pub modified: bool,
}

impl ChangeFlags {
    #[must_use]
    pub const fn any(self) -> bool {
        self.added || self.deleted || self.modified
    }

    pub const fn merge(&mut self, other: Self) {
        self.added |= other.added;
        self.deleted |= other.deleted;
        self.modified |= other.modified;
    }
}

/// Result of classifying one status report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Flags keyed by issue directory name (sorted).
    pub issues: BTreeMap<String, ChangeFlags>,
    /// External references to close, in discovery order.
    pub close_refs: Vec<String>,
}

impl Classification {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.issues.values().any(|flags| flags.any())
    }

    fn mark(&mut self, name: &str, flags: ChangeFlags) {
        self.issues.entry(name.to_string()).or_default().merge(flags);
    }
}

#[derive(Debug, Clone)]
pub struct ClassifyOptions<'a> {
    pub description_file: &'a str,
    pub autoclose: bool,
}

/// Classify status records.
///
/// `staged_diff` is only called for deleted identifier files when autoclose
/// is on; a failing diff is logged and treated as "no reference".
pub fn classify<F, E>(
    records: &[StatusRecord],
    options: &ClassifyOptions<'_>,
    mut staged_diff: F,
) -> Classification
where
    F: FnMut(&str) -> Result<Vec<u8>, E>,
    E: std::fmt::Display,
{
    let mut result = Classification::default();
    let description_suffix = format!("/{}", options.description_file);

    for record in records {
        let name = issue_name(&record.path);
        let is_description = record.path.ends_with(&description_suffix);

        let mut flags = ChangeFlags::default();
        if is_description && record.is_deleted() {
            flags.deleted = true;
        } else if is_description && record.is_added() {
            flags.added = true;
        } else {
            flags.modified = true;
            if options.autoclose && record.is_deleted() && is_identifier_file(&record.path) {
                match staged_diff(&record.path) {
                    Ok(diff) => {
                        if let Some(reference) = extract_close_reference(&diff) {
                            tracing::debug!(issue = name, reference = %reference, "Closing external reference");
                            result.close_refs.push(reference);
                            flags.deleted = true;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(path = %record.path, "Could not read staged diff: {e}");
                    }
                }
            }
        }

        result.mark(name, flags);
    }

    result
}

/// Find the first `-Github:<value>` line in a diff.
#[must_use]
pub fn extract_close_reference(diff: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(diff);
    CLOSE_REFERENCE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn is_identifier_file(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .is_some_and(|name| name == Field::Identifier.file_name())
}
