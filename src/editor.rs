//! External editor invocation.

use anyhow::{Context, bail};
use std::path::Path;
use std::process::Command;

/// Open `path` in `editor` and wait for it to exit.
///
/// `editor` may carry arguments (`code --wait`).
///
/// # Errors
///
/// Fails if the editor command is empty, cannot be spawned, or exits
/// unsuccessfully.
pub fn edit_file(editor: &str, path: &Path) -> anyhow::Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("no editor configured");
    };

    tracing::debug!(editor, path = %path.display(), "Launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{editor}'"))?;

    if !status.success() {
        bail!("editor '{editor}' exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_editor_is_rejected() {
        let err = edit_file("  ", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("no editor"));
    }

    #[cfg(unix)]
    #[test]
    fn successful_editor() {
        edit_file("true", Path::new("ignored")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor() {
        let err = edit_file("false", Path::new("ignored")).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn missing_editor_binary() {
        let err = edit_file("definitely-not-an-editor-xyz", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("failed to launch"));
    }
}
