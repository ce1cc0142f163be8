//! `bug` - plain-text issue tracker
//!
//! One directory per issue, one file per field, commits synthesized from
//! what changed.

use bug_lib::Field;
use bug_rust::AppError;
use bug_rust::cli::commands;
use bug_rust::cli::{Cli, Commands};
use bug_rust::config::CliOverrides;
use bug_rust::logging::init_logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let overrides = CliOverrides::default();
    let json = cli.json;

    let result = match &cli.command {
        Commands::Create(args) => commands::create::execute(args, json, &overrides),
        Commands::List(args) => commands::list::execute(args, json, &overrides),
        Commands::Close(args) => commands::close::execute(args, json, &overrides),
        Commands::Edit(args) => commands::edit::execute(args, &overrides),
        Commands::Tag(args) => commands::tag::execute(args, json, &overrides),
        Commands::Status(args) => commands::field::execute(Field::Status, args, json, &overrides),
        Commands::Priority(args) => {
            commands::field::execute(Field::Priority, args, json, &overrides)
        }
        Commands::Milestone(args) => {
            commands::field::execute(Field::Milestone, args, json, &overrides)
        }
        Commands::Identifier(args) => commands::identifier::execute(args, json, &overrides),
        Commands::Relabel(args) => commands::relabel::execute(args, json, &overrides),
        Commands::Find(args) => commands::find::execute(args, json, &overrides),
        Commands::Roadmap(args) => commands::roadmap::execute(args, json, &overrides),
        Commands::Commit(args) => commands::commit::execute(args, json, &overrides),
        Commands::Purge => commands::purge::execute(&overrides),
        Commands::Env => commands::env::execute(json, &overrides),
        Commands::Dir => commands::dir::execute(json, &overrides),
        Commands::Version => commands::version::execute(json),
    };

    if let Err(e) = result {
        handle_error(&e, json);
    }
}

/// Report an error on stderr and exit with its code.
fn handle_error(err: &AppError, json: bool) -> ! {
    let code = err.exit_code();
    if json {
        let body = serde_json::json!({ "error": err.to_string(), "code": code });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err}");
    }
    std::process::exit(code);
}
