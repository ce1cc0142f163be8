//! `status`, `priority` and `milestone`: one scalar field each.

use bug_lib::{Field, Issue};
use serde::Serialize;

use crate::cli::{FieldArgs, join_words};
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::print_json;

#[derive(Serialize)]
struct FieldOutput<'a> {
    issue: String,
    field: &'a str,
    value: Option<String>,
}

/// Execute a field command: print, set or clear `field`.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved or the field file
/// cannot be written.
pub fn execute(field: Field, args: &FieldArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let issue = config.store().resolve(&args.token)?;

    let value = join_words(&args.value);
    if args.clear {
        issue.clear_field(field)?;
    } else if !value.is_empty() {
        issue.set_field(field, &value)?;
    }

    print_field(&issue, field, json)
}

/// Print a field value, or a notice that it is unset.
pub(crate) fn print_field(issue: &Issue, field: Field, json: bool) -> Result<()> {
    let value = issue.field(field);
    if json {
        return print_json(&FieldOutput {
            issue: issue.title(),
            field: field.as_str(),
            value,
        });
    }
    match value {
        Some(value) => println!("{value}"),
        None => println!("No {} set", field.as_str()),
    }
    Ok(())
}
