use bug_lib::Field;

use crate::cli::EditArgs;
use crate::config::{CliOverrides, load_config};
use crate::editor;
use crate::error::{AppError, Result};

/// Execute the edit command: `edit ISSUE` or `edit FIELD ISSUE`.
///
/// # Errors
///
/// Returns an error for an unknown field, an unresolvable issue, or an
/// editor failure.
pub fn execute(args: &EditArgs, overrides: &CliOverrides) -> Result<()> {
    let (field, token) = match args.args.as_slice() {
        [token] => (None, token),
        [field, token] => {
            let field: Field = field.parse().map_err(|_| {
                AppError::Usage(format!(
                    "Unknown field '{field}' (expected status, priority, milestone or identifier)"
                ))
            })?;
            (Some(field), token)
        }
        _ => return Err(AppError::Usage("Usage: bug edit [FIELD] ISSUE".to_string())),
    };

    let config = load_config(overrides)?;
    let issue = config.store().resolve(token)?;
    let path = field.map_or_else(|| issue.description_path(), |f| issue.field_path(f));

    editor::edit_file(&config.editor, &path)?;
    Ok(())
}
