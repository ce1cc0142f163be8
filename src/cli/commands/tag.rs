use crate::cli::TagArgs;
use crate::config::{CliOverrides, load_config};
use crate::error::Result;
use crate::format::print_json;

/// Execute the tag command.
///
/// - `tag` lists every tag in use
/// - `tag ISSUE` lists the issue's tags
/// - `tag [--rm] ISSUE TAG...` adds or removes tags
///
/// # Errors
///
/// Returns an error if the issue cannot be resolved or a tag is invalid.
pub fn execute(args: &TagArgs, json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let store = config.store();

    let Some(token) = &args.token else {
        return print_tags(&store.all_tags(), json);
    };

    let issue = store.resolve(token)?;
    for tag in &args.tags {
        if args.rm {
            issue.remove_tag(tag)?;
        } else {
            issue.add_tag(tag)?;
        }
    }

    let tags: Vec<String> = issue.tags().into_iter().collect();
    if args.tags.is_empty() || json {
        print_tags(&tags, json)
    } else {
        let verb = if args.rm { "Untagged" } else { "Tagged" };
        println!("{verb} {}: {}", issue.title(), args.tags.join(", "));
        Ok(())
    }
}

fn print_tags(tags: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(tags);
    }
    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}
