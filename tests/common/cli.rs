use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

#[derive(Debug)]
pub struct BugRun {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl BugRun {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim()).expect("stdout is JSON")
    }
}

/// A throwaway project directory with an `issues/` root.
pub struct BugWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl BugWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = dunce::canonicalize(temp_dir.path()).expect("canonical root");
        fs::create_dir_all(root.join("issues")).expect("issues dir");
        Self { temp_dir, root }
    }

    /// Workspace without an `issues/` directory.
    pub fn bare() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = dunce::canonicalize(temp_dir.path()).expect("canonical root");
        Self { temp_dir, root }
    }

    pub fn issues(&self) -> PathBuf {
        self.root.join("issues")
    }

    pub fn issue_dir(&self, name: &str) -> PathBuf {
        self.issues().join(name)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    /// Initialise a git repository with an identity and one commit.
    pub fn init_git(&self) {
        git(&self.root, &["init", "-q"]);
        git(&self.root, &["config", "user.email", "bug@example.com"]);
        git(&self.root, &["config", "user.name", "Bug Tester"]);
        git(&self.root, &["config", "commit.gpgsign", "false"]);
        self.write("README", "project\n");
        git(&self.root, &["add", "README"]);
        git(&self.root, &["commit", "-q", "-m", "init"]);
    }
}

pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(output.status.success(), "git {args:?} failed: {output:?}");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn run_bug<I, S>(workspace: &BugWorkspace, args: I) -> BugRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_bug_with_env(workspace, args, std::iter::empty::<(String, String)>())
}

pub fn run_bug_with_env<I, S, E, K, V>(workspace: &BugWorkspace, args: I, env_vars: E) -> BugRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bug"));
    cmd.current_dir(&workspace.root);
    for key in [
        "PMIT",
        "BUG_DESCRIPTION_FILE",
        "BUG_DEFAULT_DESCRIPTION_FILE",
        "BUG_AUTOCLOSE",
        "BUG_COMMIT_PREFIX",
        "BUG_EDITOR",
        "VISUAL",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("EDITOR", "true");
    cmd.env("HOME", &workspace.root);
    cmd.env("RUST_LOG", "bug_rust=debug,bug_lib=debug");
    cmd.env("GIT_CONFIG_NOSYSTEM", "1");
    cmd.args(args);
    cmd.envs(env_vars);

    let output = cmd.output().expect("run bug");
    BugRun {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status,
    }
}
