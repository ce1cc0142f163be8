use super::all_summaries;
use crate::cli::{FindArgs, FindField};
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::{IssueSummary, format_issue_line, print_json};

/// Execute the find command.
///
/// Tags match exactly; status, priority and milestone match any value
/// case-insensitively.
///
/// # Errors
///
/// Returns an error if the issues directory cannot be located.
pub fn execute(args: &FindArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let summaries = all_summaries(&config.store());
    let matches = filter(summaries, args.field, &args.values);

    if json {
        return print_json(&matches);
    }
    for summary in &matches {
        println!("{}", format_issue_line(summary, args.field == FindField::Tags));
    }
    Ok(())
}

fn filter(summaries: Vec<IssueSummary>, field: FindField, values: &[String]) -> Vec<IssueSummary> {
    summaries
        .into_iter()
        .filter(|summary| {
            let value = match field {
                FindField::Tags => {
                    return summary.tags.iter().any(|tag| values.contains(tag));
                }
                FindField::Status => &summary.status,
                FindField::Priority => &summary.priority,
                FindField::Milestone => &summary.milestone,
            };
            value
                .as_deref()
                .is_some_and(|v| values.iter().any(|wanted| wanted.eq_ignore_ascii_case(v)))
        })
        .collect()
}
