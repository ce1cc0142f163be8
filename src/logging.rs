//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout carries command
//! output only. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `-q` limits output to errors, no flag shows warnings, `-v` shows debug
/// and `-vv` or more shows trace output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bug_rust={default_level},bug_lib={default_level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time()
        .try_init()
}

/// Install a subscriber that writes through the test harness capture.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("bug_rust=debug,bug_lib=debug"))
        .with_test_writer()
        .try_init();
}
