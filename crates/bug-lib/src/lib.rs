//! `bug-lib` — fields-as-files issue store.
//!
//! Each issue is a directory under an issues root; each field is a small
//! file inside it. This crate owns the on-disk layout, deterministic
//! ordering and the heuristic token resolver. It never spawns processes.
//!
//! # Quick Start
//!
//! ```no_run
//! use bug_lib::{Field, IssueStore};
//!
//! let store = IssueStore::new("path/to/issues");
//!
//! // Create
//! let mut issue = store.create("Crash on startup").unwrap();
//! issue.append_description(b"Segfaults when the config is empty.\n").unwrap();
//! issue.set_field(Field::Identifier, "GH-12").unwrap();
//!
//! // Resolve by index, identifier or identifier substring
//! let found = store.resolve("GH-12").unwrap();
//! assert_eq!(found.title(), "Crash on startup");
//! ```

pub mod error;
pub mod model;
pub mod resolve;
pub mod store;
pub mod util;

pub use error::{BugError, Result};
pub use model::{DEFAULT_DESCRIPTION_FILE, Field, Issue};
pub use resolve::resolve;
pub use store::IssueStore;
pub use util::{dir_to_title, generate_identifier, title_to_dir};
