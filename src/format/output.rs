use bug_lib::{Issue, Result};
use serde::Serialize;

/// Issue summary for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    /// 1-based scan position, the number accepted by the resolver.
    pub position: usize,
    pub directory: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    pub tags: Vec<String>,
}

impl IssueSummary {
    #[must_use]
    pub fn from_issue(issue: &Issue, position: usize) -> Self {
        Self {
            position,
            directory: issue.directory_name().to_string(),
            title: issue.title(),
            identifier: issue.identifier(),
            status: issue.status(),
            priority: issue.priority(),
            milestone: issue.milestone(),
            tags: issue.tags().into_iter().collect(),
        }
    }
}

/// Issue with its description for the full view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDetails {
    #[serde(flatten)]
    pub summary: IssueSummary,
    pub description: Option<String>,
}

impl IssueDetails {
    /// Read the description, closing the stream before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the description exists but cannot be read.
    pub fn load(issue: &mut Issue, position: usize) -> Result<Self> {
        let summary = IssueSummary::from_issue(issue, position);
        let description = if issue.has_description() {
            let text = issue.read_description();
            issue.close()?;
            Some(text?)
        } else {
            None
        };
        Ok(Self {
            summary,
            description,
        })
    }
}

/// Issues sharing one milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapGroup {
    /// `None` for issues without a milestone.
    pub milestone: Option<String>,
    pub issues: Vec<IssueSummary>,
}

/// Environment report for `bug env`.
#[derive(Debug, Clone, Serialize)]
pub struct EnvReport {
    pub editor: String,
    pub root: String,
    pub issues_dir: String,
    pub config_file: Option<String>,
    pub description_file: String,
    pub autoclose: bool,
    pub vcs: Option<VcsReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VcsReport {
    #[serde(rename = "type")]
    pub type_name: String,
    pub root: String,
    /// Uncommitted paths under the issues directory.
    pub pending: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bug_lib::{Field, IssueStore};
    use tempfile::TempDir;

    #[test]
    fn summary_collects_fields() {
        let temp = TempDir::new().unwrap();
        let store = IssueStore::new(temp.path());
        let issue = store.create("Crash on start").unwrap();
        issue.set_field(Field::Priority, "high").unwrap();
        issue.add_tag("ui").unwrap();

        let summary = IssueSummary::from_issue(&issue, 3);
        assert_eq!(summary.position, 3);
        assert_eq!(summary.directory, "Crash-on-start");
        assert_eq!(summary.title, "Crash on start");
        assert_eq!(summary.priority.as_deref(), Some("high"));
        assert!(summary.status.is_none());
        assert_eq!(summary.tags, vec!["ui"]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["priority"], "high");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn details_read_and_release_description() {
        let temp = TempDir::new().unwrap();
        let store = IssueStore::new(temp.path());
        let mut issue = store.create("Slow").unwrap();
        issue.append_description(b"It is slow.\n").unwrap();
        issue.close().unwrap();

        let details = IssueDetails::load(&mut issue, 1).unwrap();
        assert_eq!(details.description.as_deref(), Some("It is slow.\n"));
        assert!(!issue.is_description_open());

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["title"], "Slow");
        assert_eq!(json["description"], "It is slow.\n");
    }
}
