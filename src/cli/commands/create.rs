use std::fs;

use bug_lib::{BugError, Field, Issue, generate_identifier};

use super::summary_of;
use crate::cli::{CreateArgs, join_words};
use crate::config::{CliOverrides, Config, load_config};
use crate::editor;
use crate::error::{AppError, Result};
use crate::format::print_json;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if the title is empty, the issue already exists, the
/// template is missing, or the editor fails.
pub fn execute(args: &CreateArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    // 1. Resolve title
    let title = join_words(&args.title);
    if title.is_empty() {
        return Err(BugError::validation("title", "cannot be empty").into());
    }

    // 2. Create the directory and its description
    let config = load_config(overrides)?;
    let store = config.store();
    let mut issue = store.create(&title)?;
    write_initial_description(&mut issue, &config)?;

    if !args.no_editor {
        editor::edit_file(&config.editor, &issue.description_path())?;
    }

    // 3. Fields
    for tag in &args.tags {
        issue.add_tag(tag)?;
    }
    let fields = [
        (Field::Status, &args.status),
        (Field::Priority, &args.priority),
        (Field::Milestone, &args.milestone),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            issue.set_field(field, value)?;
        }
    }
    let identifier = if args.generate_id {
        Some(generate_identifier(&title))
    } else {
        args.identifier.clone()
    };
    if let Some(identifier) = identifier {
        issue.set_field(Field::Identifier, &identifier)?;
    }

    // 4. Output
    if json {
        print_json(&summary_of(&store, &issue))?;
    } else {
        println!("Created issue: {}", issue.title());
    }
    Ok(())
}

/// Seed the description from the configured template, or create it empty.
fn write_initial_description(issue: &mut Issue, config: &Config) -> Result<()> {
    let contents = match &config.default_description_file {
        Some(template) => {
            if !template.is_file() {
                return Err(AppError::FileNotFound(template.clone()));
            }
            fs::read(template)?
        }
        None => Vec::new(),
    };
    let written = issue.append_description(&contents);
    issue.close()?;
    written?;
    Ok(())
}
