use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::print_json;

/// Execute the dir command: print the issues directory.
///
/// # Errors
///
/// Returns `NotInitialized` if no issues directory can be located.
pub fn execute(json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    if json {
        print_json(&serde_json::json!({ "issues_dir": config.issues_dir }))
    } else {
        println!("{}", config.issues_dir.display());
        Ok(())
    }
}
