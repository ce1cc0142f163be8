//! Commit message synthesis.

use serde::Serialize;
use std::fmt;

use super::status::{ChangeFlags, Classification};

/// The single bucket an issue is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeBucket {
    Deleted,
    Added,
    Modified,
}

impl ChangeBucket {
    /// Render order.
    pub const ALL: [Self; 3] = [Self::Deleted, Self::Added, Self::Modified];

    /// Collapse raw flags with precedence deleted > added > modified.
    #[must_use]
    pub const fn select(flags: ChangeFlags) -> Option<Self> {
        if flags.deleted {
            Some(Self::Deleted)
        } else if flags.added {
            Some(Self::Added)
        } else if flags.modified {
            Some(Self::Modified)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Deleted => "Close",
            Self::Added => "Create",
            Self::Modified => "Update",
        }
    }
}

impl fmt::Display for ChangeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Deleted => "deleted",
            Self::Added => "added",
            Self::Modified => "modified",
        })
    }
}

/// A synthesized commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    pub text: String,
    /// False when the fallback message was used.
    pub has_changes: bool,
}

impl CommitMessage {
    /// Contents of the message file handed to the VCS.
    #[must_use]
    pub fn file_contents(&self) -> String {
        let mut contents = self.text.clone();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents
    }
}

/// Issue names per bucket, each list sorted by name.
#[must_use]
pub fn group_by_bucket(classification: &Classification) -> Vec<(ChangeBucket, Vec<&str>)> {
    ChangeBucket::ALL
        .iter()
        .map(|&bucket| {
            let names = classification
                .issues
                .iter()
                .filter(|(_, flags)| ChangeBucket::select(**flags) == Some(bucket))
                .map(|(name, _)| name.as_str())
                .collect();
            (bucket, names)
        })
        .collect()
}

/// Build the commit message for a classification.
///
/// An empty classification yields `fallback` verbatim. Otherwise the body is
/// `prefix` followed by one segment per non-empty bucket, and a
/// `Closes ...` footer when references were closed.
#[must_use]
pub fn synthesize(
    classification: &Classification,
    prefix: Option<&str>,
    fallback: &str,
) -> CommitMessage {
    if classification.is_empty() {
        return CommitMessage {
            text: fallback.to_string(),
            has_changes: false,
        };
    }

    let segments: Vec<String> = group_by_bucket(classification)
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .map(|(bucket, names)| render_segment(bucket, &names))
        .collect();

    let mut body = segments.join(" ");
    if body.ends_with(';') {
        body.pop();
    }

    if !classification.close_refs.is_empty() {
        body.push_str("\n\nCloses ");
        body.push_str(&classification.close_refs.join(", closes "));
    }

    CommitMessage {
        text: format!("{}{body}", prefix.unwrap_or_default()),
        has_changes: true,
    }
}

fn render_segment(bucket: ChangeBucket, names: &[&str]) -> String {
    let plural = if names.len() > 1 { "s" } else { "" };
    let quoted: Vec<String> = names.iter().map(|name| format!("{name:?}")).collect();
    format!("{} issue{plural}: {};", bucket.verb(), quoted.join(", "))
}
