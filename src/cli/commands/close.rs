use std::collections::BTreeSet;

use crate::cli::CloseArgs;
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::print_json;

/// Execute the close command.
///
/// All tokens are resolved before anything is removed, so numeric indexes
/// refer to the listing the user saw.
///
/// # Errors
///
/// Returns an error if any token fails to resolve (nothing is removed) or a
/// directory cannot be deleted.
pub fn execute(args: &CloseArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let store = config.store();

    let mut seen = BTreeSet::new();
    let mut issues = Vec::new();
    for token in &args.tokens {
        let issue = store.resolve(token)?;
        if seen.insert(issue.directory_name().to_string()) {
            issues.push(issue);
        }
    }

    let mut closed = Vec::new();
    for issue in issues {
        let title = issue.title();
        store.remove(issue)?;
        if !json {
            println!("Closed issue: {title}");
        }
        closed.push(title);
    }

    if json {
        print_json(&serde_json::json!({ "closed": closed }))?;
    }
    Ok(())
}
