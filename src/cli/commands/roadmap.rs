use std::collections::BTreeMap;

use super::all_summaries;
use crate::cli::RoadmapArgs;
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::{IssueSummary, RoadmapGroup, format_roadmap, print_json};

/// Execute the roadmap command.
///
/// # Errors
///
/// Returns an error if the issues directory cannot be located.
pub fn execute(args: &RoadmapArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let summaries = all_summaries(&config.store())
        .into_iter()
        .filter(|summary| {
            args.tag
                .as_ref()
                .is_none_or(|tag| summary.tags.contains(tag))
        })
        .collect();

    let groups = group_by_milestone(summaries);
    if json {
        print_json(&groups)
    } else {
        print!("{}", format_roadmap(&groups));
        Ok(())
    }
}

/// Group by milestone, sorted by name, with unscheduled issues last.
fn group_by_milestone(summaries: Vec<IssueSummary>) -> Vec<RoadmapGroup> {
    let mut scheduled: BTreeMap<String, Vec<IssueSummary>> = BTreeMap::new();
    let mut unscheduled = Vec::new();
    for summary in summaries {
        match summary.milestone.clone() {
            Some(milestone) => scheduled.entry(milestone).or_default().push(summary),
            None => unscheduled.push(summary),
        }
    }

    let mut groups: Vec<RoadmapGroup> = scheduled
        .into_iter()
        .map(|(milestone, issues)| RoadmapGroup {
            milestone: Some(milestone),
            issues,
        })
        .collect();
    if !unscheduled.is_empty() {
        groups.push(RoadmapGroup {
            milestone: None,
            issues: unscheduled,
        });
    }
    groups
}
