//! `bug_rust` - plain-text issue tracker library
//!
//! This crate provides the functionality behind the `bug` CLI. Issues are
//! directories under an `issues` root and each field is a small file; the
//! filesystem store itself lives in `bug_lib`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration and issues-root discovery
//! - [`vcs`] - Status classification, commit messages, git/hg gateways
//! - [`error`] - Error types and exit codes
//! - [`format`] - Output formatting (text, JSON)
//! - [`editor`] - External editor invocation
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod logging;
pub mod vcs;

pub use error::{AppError, Result};
