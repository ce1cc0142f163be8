use bug_lib::{Field, generate_identifier};

use super::field::print_field;
use crate::cli::{IdentifierArgs, join_words};
use crate::config::{CliOverrides, load_config};
use crate::error::Result;

/// Execute the identifier command.
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved or the identifier file
/// cannot be written.
pub fn execute(args: &IdentifierArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let issue = config.store().resolve(&args.token)?;

    let value = if args.generate_id {
        generate_identifier(&issue.title())
    } else {
        join_words(&args.value)
    };

    if args.clear {
        issue.clear_field(Field::Identifier)?;
    } else if !value.is_empty() {
        issue.set_field(Field::Identifier, &value)?;
    }

    print_field(&issue, Field::Identifier, json)
}
