//! Plain text formatting for terminal output.

use std::fmt::Write as _;

use super::output::{IssueDetails, IssueSummary, RoadmapGroup};

/// `Issue <identifier>` when one is set, otherwise `Issue <position>`.
#[must_use]
pub fn format_issue_label(summary: &IssueSummary) -> String {
    summary.identifier.as_ref().map_or_else(
        || format!("Issue {}", summary.position),
        |id| format!("Issue {id}"),
    )
}

/// Single-line summary: `Issue 3: Crash on start`, optionally with tags.
#[must_use]
pub fn format_issue_line(summary: &IssueSummary, with_tags: bool) -> String {
    let mut line = format!("{}: {}", format_issue_label(summary), summary.title);
    if with_tags && !summary.tags.is_empty() {
        let _ = write!(line, " ({})", summary.tags.join(", "));
    }
    line
}

/// Full view of one issue.
#[must_use]
pub fn format_issue_detail(details: &IssueDetails) -> String {
    let summary = &details.summary;
    let mut out = format!("Title: {}\n", summary.title);

    if let Some(description) = details.description.as_ref().filter(|d| !d.trim().is_empty()) {
        out.push('\n');
        out.push_str(description);
        if !description.ends_with('\n') {
            out.push('\n');
        }
    }

    let fields = [
        ("Identifier", &summary.identifier),
        ("Status", &summary.status),
        ("Priority", &summary.priority),
        ("Milestone", &summary.milestone),
    ];
    let mut wrote_header = false;
    for (label, value) in fields {
        if let Some(value) = value {
            if !wrote_header {
                out.push('\n');
                wrote_header = true;
            }
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if !summary.tags.is_empty() {
        if !wrote_header {
            out.push('\n');
        }
        let _ = writeln!(out, "Tags: {}", summary.tags.join(", "));
    }

    out
}

/// Roadmap view: one heading per milestone, issues underneath.
#[must_use]
pub fn format_roadmap(groups: &[RoadmapGroup]) -> String {
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let heading = group.milestone.as_deref().unwrap_or("No milestone");
        let _ = writeln!(out, "# {heading}");
        for summary in &group.issues {
            let status = summary
                .status
                .as_deref()
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            let _ = writeln!(out, "- {}{status}", format_issue_line(summary, false));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(position: usize, title: &str) -> IssueSummary {
        IssueSummary {
            position,
            directory: title.replace(' ', "-"),
            title: title.to_string(),
            identifier: None,
            status: None,
            priority: None,
            milestone: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn label_prefers_identifier() {
        let mut s = summary(2, "Crash");
        assert_eq!(format_issue_label(&s), "Issue 2");
        s.identifier = Some("GH-7".into());
        assert_eq!(format_issue_label(&s), "Issue GH-7");
    }

    #[test]
    fn line_with_tags() {
        let mut s = summary(1, "Crash on start");
        assert_eq!(format_issue_line(&s, true), "Issue 1: Crash on start");
        s.tags = vec!["ui".into(), "urgent".into()];
        assert_eq!(format_issue_line(&s, false), "Issue 1: Crash on start");
        assert_eq!(
            format_issue_line(&s, true),
            "Issue 1: Crash on start (ui, urgent)"
        );
    }

    #[test]
    fn detail_view() {
        let mut s = summary(1, "Crash");
        s.status = Some("open".into());
        s.tags = vec!["ui".into()];
        let details = IssueDetails {
            summary: s,
            description: Some("Boom.".into()),
        };
        assert_eq!(
            format_issue_detail(&details),
            "Title: Crash\n\nBoom.\n\nStatus: open\nTags: ui\n"
        );
    }

    #[test]
    fn blank_description_is_omitted() {
        let details = IssueDetails {
            summary: summary(1, "Blank"),
            description: Some("\n".into()),
        };
        assert_eq!(format_issue_detail(&details), "Title: Blank\n");
    }

    #[test]
    fn detail_view_without_extras() {
        let details = IssueDetails {
            summary: summary(1, "Bare"),
            description: None,
        };
        assert_eq!(format_issue_detail(&details), "Title: Bare\n");
    }

    #[test]
    fn roadmap_headings() {
        let mut a = summary(1, "A");
        a.status = Some("done".into());
        let groups = vec![
            RoadmapGroup {
                milestone: Some("v1".into()),
                issues: vec![a],
            },
            RoadmapGroup {
                milestone: None,
                issues: vec![summary(2, "B")],
            },
        ];
        assert_eq!(
            format_roadmap(&groups),
            "# v1\n- Issue 1: A [done]\n\n# No milestone\n- Issue 2: B\n"
        );
    }
}
