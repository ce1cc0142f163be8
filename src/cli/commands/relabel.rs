use super::summary_of;
use crate::cli::{RelabelArgs, join_words};
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::print_json;

/// Execute the relabel command: rename the issue directory.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved or the new title is
/// empty or taken.
pub fn execute(args: &RelabelArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let store = config.store();
    let issue = store.resolve(&args.token)?;
    let old_title = issue.title();

    let renamed = store.relabel(issue, &join_words(&args.title))?;

    if json {
        print_json(&summary_of(&store, &renamed))?;
    } else {
        println!("Moving {old_title} to {}", renamed.title());
    }
    Ok(())
}
