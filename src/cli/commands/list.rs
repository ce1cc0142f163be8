//! List command implementation.
//!
//! Without tokens every issue is summarized. Tokens are resolved and shown
//! in full; a token that resolves to nothing but names a known tag switches
//! to listing the issues tagged with any of the tokens, after the views of
//! the issues already resolved.

use bug_lib::IssueStore;

use super::{all_summaries, position_of};
use crate::cli::ListArgs;
use crate::config::{CliOverrides, load_config};
use crate::error::{AppError, Result};
use crate::format::{IssueDetails, IssueSummary, format_issue_detail, format_issue_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the issues directory is missing, or the first
/// resolution miss when some tokens named neither an issue nor a tag.
pub fn execute(args: &ListArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let store = config.store();

    if args.tokens.is_empty() {
        return print_summaries(&all_summaries(&store), json, args.tags);
    }

    let mut details = Vec::new();
    let mut miss: Option<AppError> = None;
    for token in &args.tokens {
        match store.resolve(token) {
            Ok(mut issue) => {
                let position = position_of(&store, &issue);
                details.push(IssueDetails::load(&mut issue, position)?);
            }
            Err(e) if e.is_resolution_miss() => {
                if store.is_known_tag(token) {
                    tracing::debug!(token = %token, "Token names a tag; listing tagged issues");
                    if !details.is_empty() {
                        print_details(&details, json)?;
                        if !json {
                            println!();
                        }
                    }
                    return print_summaries(&tagged(&store, &args.tokens), json, true);
                }
                if miss.is_some() {
                    eprintln!("{e}");
                } else {
                    miss = Some(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    print_details(&details, json)?;
    miss.map_or(Ok(()), Err)
}

/// Full views of the issues resolved so far.
fn print_details(details: &[IssueDetails], json: bool) -> Result<()> {
    if json {
        return print_json(details);
    }
    let views: Vec<String> = details.iter().map(format_issue_detail).collect();
    if !views.is_empty() {
        print!("{}", views.join("\n--\n\n"));
    }
    Ok(())
}

/// Issues carrying any of `tags`, keeping their scan positions.
fn tagged(store: &IssueStore, tags: &[String]) -> Vec<IssueSummary> {
    all_summaries(store)
        .into_iter()
        .filter(|summary| summary.tags.iter().any(|tag| tags.contains(tag)))
        .collect()
}

fn print_summaries(summaries: &[IssueSummary], json: bool, with_tags: bool) -> Result<()> {
    if json {
        return print_json(summaries);
    }
    for summary in summaries {
        println!("{}", format_issue_line(summary, with_tags));
    }
    Ok(())
}
