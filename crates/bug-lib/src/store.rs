//! Issue repository over an issues root directory.
//!
//! Every query rescans the root; ordering is always lexicographic on the
//! directory name and is never cached between calls.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BugError, Result};
use crate::model::{DEFAULT_DESCRIPTION_FILE, Issue};
use crate::util::title_to_dir;

/// Filesystem-backed issue store.
#[derive(Debug, Clone)]
pub struct IssueStore {
    root: PathBuf,
    description_file: String,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a store over `root` using the default description file name.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_description_file(root, DEFAULT_DESCRIPTION_FILE)
    }

    #[must_use]
    pub fn with_description_file(
        root: impl Into<PathBuf>,
        description_file: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            description_file: description_file.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn description_file(&self) -> &str {
        &self.description_file
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    /// Direct subdirectories of the root, sorted by name.
    ///
    /// A missing or unreadable root is an empty store, not an error.
    #[must_use]
    pub fn scan(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(root = %self.root.display(), error = %e, "Issues root not readable");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| match entry.file_name().into_string() {
                Ok(name) => Some(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "Skipping non UTF-8 issue directory");
                    None
                }
            })
            .collect();
        names.sort();
        names
    }

    /// Number of issue directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scan().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scan().is_empty()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every issue in scan order.
    #[must_use]
    pub fn all_issues(&self) -> Vec<Issue> {
        self.scan()
            .into_iter()
            .map(|name| self.issue_view(name))
            .collect()
    }

    /// Issues carrying at least one of `tags`, in scan order.
    #[must_use]
    pub fn issues_with_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Vec<Issue> {
        self.all_issues()
            .into_iter()
            .filter(|issue| tags.iter().any(|tag| issue.has_tag(tag.as_ref())))
            .collect()
    }

    /// Sorted union of every issue's tags.
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .all_issues()
            .iter()
            .flat_map(Issue::tags)
            .collect();
        tags.into_iter().collect()
    }

    /// Whether any issue carries `tag`.
    #[must_use]
    pub fn is_known_tag(&self, tag: &str) -> bool {
        self.all_issues().iter().any(|issue| issue.has_tag(tag))
    }

    /// Load an issue by exact directory name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such directory exists.
    pub fn load(&self, directory_name: &str) -> Result<Issue> {
        if directory_name.is_empty() || directory_name.contains(['/', '\\']) {
            return Err(BugError::not_found(directory_name));
        }
        let issue = self.issue_view(directory_name);
        if issue.dir().is_dir() {
            Ok(issue)
        } else {
            Err(BugError::not_found(directory_name))
        }
    }

    /// Load the issue at 1-based position `index` in scan order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIndex` when `index` is outside `1..=len`.
    pub fn by_index(&self, index: i64) -> Result<Issue> {
        let names = self.scan();
        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i >= 1 && i <= names.len())
            .ok_or(BugError::InvalidIndex {
                index,
                count: names.len(),
            })?;
        Ok(self.issue_view(names[position - 1].clone()))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create the directory for a new issue titled `title`.
    ///
    /// The description file is not written; callers decide between a
    /// template, an editor session or an empty description.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title, `AlreadyExists` if the
    /// directory exists, or `Io` on failure.
    pub fn create(&self, title: &str) -> Result<Issue> {
        let directory = title_to_dir(title);
        if directory.is_empty() || directory == "." || directory == ".." {
            return Err(BugError::validation("title", "cannot be empty"));
        }
        let issue = self.issue_view(directory.clone());
        if issue.dir().exists() {
            return Err(BugError::AlreadyExists { directory });
        }
        fs::create_dir_all(&self.root)?;
        fs::create_dir(issue.dir())?;
        tracing::info!(issue = %directory, "Created issue directory");
        Ok(issue)
    }

    /// Rename an issue's directory to match `new_title`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title, `AlreadyExists` if the target
    /// directory exists, or `Io` on failure.
    pub fn relabel(&self, issue: Issue, new_title: &str) -> Result<Issue> {
        let directory = title_to_dir(new_title);
        if directory.is_empty() || directory == "." || directory == ".." {
            return Err(BugError::validation("title", "cannot be empty"));
        }
        if directory == issue.directory_name() {
            return Ok(issue);
        }
        let target = self.issue_view(directory.clone());
        if target.dir().exists() {
            return Err(BugError::AlreadyExists { directory });
        }
        let from = issue.dir().to_path_buf();
        drop(issue);
        fs::rename(&from, target.dir())?;
        tracing::info!(from = %from.display(), to = %directory, "Relabeled issue");
        Ok(target)
    }

    /// Delete an issue directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the directory is already gone, `Io` otherwise.
    pub fn remove(&self, issue: Issue) -> Result<()> {
        let dir = issue.dir().to_path_buf();
        let name = issue.directory_name().to_string();
        drop(issue);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                tracing::info!(issue = %name, "Removed issue");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BugError::not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    fn issue_view(&self, directory_name: impl Into<String>) -> Issue {
        Issue::new(&self.root, directory_name, self.description_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use tempfile::TempDir;

    fn store_with(names: &[&str]) -> (TempDir, IssueStore) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("issues");
        for name in names {
            fs::create_dir_all(root.join(name)).unwrap();
        }
        fs::create_dir_all(&root).unwrap();
        let store = IssueStore::new(root);
        (temp, store)
    }

    fn names(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(Issue::directory_name).collect()
    }

    #[test]
    fn test_scan_sorts_and_skips_files() {
        let (_temp, store) = store_with(&["b", "a", "C"]);
        fs::write(store.root().join("README"), "not an issue").unwrap();
        assert_eq!(store.scan(), vec!["C", "a", "b"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = IssueStore::new(temp.path().join("nope"));
        assert!(store.scan().is_empty());
        assert!(store.all_issues().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_all_issues_in_scan_order() {
        let (_temp, store) = store_with(&["zeta", "alpha", "mid"]);
        let issues = store.all_issues();
        assert_eq!(names(&issues), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_issues_with_any_tag() {
        let (_temp, store) = store_with(&["one", "two", "three"]);
        store.load("one").unwrap().add_tag("ui").unwrap();
        store.load("two").unwrap().add_tag("db").unwrap();
        store.load("three").unwrap().add_tag("ui").unwrap();

        let ui = store.issues_with_any_tag(&["ui"]);
        assert_eq!(names(&ui), vec!["one", "three"]);

        let either = store.issues_with_any_tag(&["db", "ui"]);
        assert_eq!(names(&either), vec!["one", "three", "two"]);

        assert!(store.issues_with_any_tag(&["none"]).is_empty());
        assert_eq!(store.all_tags(), vec!["db", "ui"]);
        assert!(store.is_known_tag("db"));
        assert!(!store.is_known_tag("none"));
    }

    #[test]
    fn test_malformed_issue_loads_with_unset_fields() {
        let (_temp, store) = store_with(&["partial"]);
        let issue = store.load("partial").unwrap();
        assert!(issue.field(Field::Identifier).is_none());
        assert!(!issue.has_description());
    }

    #[test]
    fn test_load_missing() {
        let (_temp, store) = store_with(&["a"]);
        assert!(matches!(
            store.load("b").unwrap_err(),
            BugError::NotFound { .. }
        ));
        assert!(store.load("../a").is_err());
    }

    #[test]
    fn test_by_index_bounds() {
        let (_temp, store) = store_with(&["a", "b"]);
        assert_eq!(store.by_index(1).unwrap().directory_name(), "a");
        assert_eq!(store.by_index(2).unwrap().directory_name(), "b");
        for bad in [0, 3, -1] {
            assert!(matches!(
                store.by_index(bad).unwrap_err(),
                BugError::InvalidIndex { count: 2, .. }
            ));
        }
    }

    #[test]
    fn test_create_and_collision() {
        let (_temp, store) = store_with(&[]);
        let issue = store.create("Crash on start").unwrap();
        assert_eq!(issue.directory_name(), "Crash-on-start");
        assert!(issue.dir().is_dir());

        let err = store.create("Crash on start").unwrap_err();
        assert!(matches!(err, BugError::AlreadyExists { .. }));
        assert!(store.create("   ").is_err());
    }

    #[test]
    fn test_create_makes_missing_root() {
        let temp = TempDir::new().unwrap();
        let store = IssueStore::new(temp.path().join("issues"));
        store.create("First").unwrap();
        assert_eq!(store.scan(), vec!["First"]);
    }

    #[test]
    fn test_relabel_moves_fields() {
        let (_temp, store) = store_with(&[]);
        let issue = store.create("Old name").unwrap();
        issue.set_field(Field::Status, "open").unwrap();

        let renamed = store.relabel(issue, "New name").unwrap();
        assert_eq!(renamed.directory_name(), "New-name");
        assert_eq!(renamed.status().as_deref(), Some("open"));
        assert_eq!(store.scan(), vec!["New-name"]);
    }

    #[test]
    fn test_relabel_refuses_to_clobber() {
        let (_temp, store) = store_with(&["Taken"]);
        let issue = store.create("Other").unwrap();
        let err = store.relabel(issue, "Taken").unwrap_err();
        assert!(matches!(err, BugError::AlreadyExists { .. }));
    }

    #[test]
    fn test_remove() {
        let (_temp, store) = store_with(&["gone"]);
        let issue = store.load("gone").unwrap();
        store.remove(issue).unwrap();
        assert!(store.scan().is_empty());
    }
}
