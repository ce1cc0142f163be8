//! Command-line interface for `bug_rust`.
//!
//! This module provides the CLI parsing using clap. Dispatch lives in
//! `main.rs`; each command is implemented in [`commands`].

pub mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// `bug` - plain-text issue tracker.
#[derive(Parser, Debug)]
#[command(name = "bug")]
#[command(
    author,
    version,
    about = "Plain-text issue tracker: one directory per issue, one file per field",
    long_about = None,
    after_help = "Issues live in an `issues` directory (located via PMIT or the nearest parent)."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new issue
    #[command(visible_aliases = ["add", "new"])]
    Create(CreateArgs),

    /// List issues, or show the ones named by index, identifier or tag
    #[command(visible_alias = "view")]
    List(ListArgs),

    /// Delete issues
    #[command(visible_alias = "rm")]
    Close(CloseArgs),

    /// Open an issue's description or a field in the editor
    Edit(EditArgs),

    /// Add or remove tags, or list every known tag
    Tag(TagArgs),

    /// Print or set an issue's status
    Status(FieldArgs),

    /// Print or set an issue's priority
    Priority(FieldArgs),

    /// Print or set an issue's milestone
    Milestone(FieldArgs),

    /// Print, set or generate an issue's identifier
    #[command(visible_alias = "id")]
    Identifier(IdentifierArgs),

    /// Rename an issue
    #[command(visible_aliases = ["mv", "rename", "retitle"])]
    Relabel(RelabelArgs),

    /// Find issues by tag, status, priority or milestone
    Find(FindArgs),

    /// Show issues grouped by milestone
    Roadmap(RoadmapArgs),

    /// Commit the issues directory with a synthesized message
    Commit(CommitArgs),

    /// Delete untracked files under the issues directory
    Purge,

    /// Show the detected environment
    Env,

    /// Print the issues directory
    #[command(visible_alias = "pwd")]
    Dir,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Don't open the editor; write the template or an empty description
    #[arg(short = 'n', long = "no-editor")]
    pub no_editor: bool,

    /// Tag the new issue
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub milestone: Option<String>,

    #[arg(long, conflicts_with = "generate_id")]
    pub identifier: Option<String>,

    /// Derive an identifier from the title
    #[arg(long)]
    pub generate_id: bool,

    /// Issue title
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub title: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Include tags in summaries
    #[arg(long)]
    pub tags: bool,

    /// Index, identifier, identifier fragment or tag
    pub tokens: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct CloseArgs {
    /// Issues to delete
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// `[FIELD] ISSUE`: FIELD is status, priority, milestone or identifier
    #[arg(required = true, num_args = 1..=2)]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct TagArgs {
    /// Remove the tags instead of adding them
    #[arg(long)]
    pub rm: bool,

    /// Issue to tag; omit to list all tags
    pub token: Option<String>,

    #[arg(requires = "token")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Clear the field
    #[arg(long, conflicts_with = "value")]
    pub clear: bool,

    pub token: String,

    /// New value (words are joined by spaces)
    pub value: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct IdentifierArgs {
    #[arg(long, conflicts_with_all = ["value", "generate_id"])]
    pub clear: bool,

    /// Derive the identifier from the title
    #[arg(long, conflicts_with = "value")]
    pub generate_id: bool,

    pub token: String,

    pub value: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct RelabelArgs {
    pub token: String,

    /// New title
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

/// Searchable issue attributes.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FindField {
    #[value(alias = "tag")]
    Tags,
    Status,
    Priority,
    Milestone,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    #[arg(value_enum)]
    pub field: FindField,

    /// Values to match (any)
    #[arg(required = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct RoadmapArgs {
    /// Only include issues with this tag
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CommitArgs {
    /// Don't close external references for deleted identifiers
    #[arg(long)]
    pub no_autoclose: bool,
}

/// Join positional words the way titles and values are entered.
#[must_use]
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
