//! The issue entity: a view over one issue directory.
//!
//! Every scalar field lives in its own small file inside the issue
//! directory and is read on demand; nothing is cached. The description is a
//! byte stream opened lazily and held for the lifetime of the [`Issue`].

use std::collections::BTreeSet;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{BugError, Result};
use crate::util::dir_to_title;

/// Default name of the description file inside an issue directory.
pub const DEFAULT_DESCRIPTION_FILE: &str = "Description";
/// Directory holding one empty marker file per tag.
pub const TAGS_DIR: &str = "tags";

/// A scalar field persisted as a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Status,
    Priority,
    Milestone,
    Identifier,
}

impl Field {
    pub const ALL: [Self; 4] = [
        Self::Status,
        Self::Priority,
        Self::Milestone,
        Self::Identifier,
    ];

    /// File name of the field inside an issue directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Milestone => "Milestone",
            Self::Identifier => "Identifier",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Milestone => "milestone",
            Self::Identifier => "identifier",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = BugError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "milestone" => Ok(Self::Milestone),
            "identifier" | "id" => Ok(Self::Identifier),
            other => Err(BugError::validation("field", format!("unknown field '{other}'"))),
        }
    }
}

/// One issue, backed by `<issues_root>/<directory_name>/`.
#[derive(Debug)]
pub struct Issue {
    dir: PathBuf,
    directory_name: String,
    description_file: String,
    description: Option<File>,
}

impl Issue {
    /// Build a view over an existing (or about-to-be-created) issue directory.
    #[must_use]
    pub fn new(
        issues_root: &Path,
        directory_name: impl Into<String>,
        description_file: impl Into<String>,
    ) -> Self {
        let directory_name = directory_name.into();
        Self {
            dir: issues_root.join(&directory_name),
            directory_name,
            description_file: description_file.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    #[must_use]
    pub fn title(&self) -> String {
        dir_to_title(&self.directory_name)
    }

    #[must_use]
    pub fn description_path(&self) -> PathBuf {
        self.dir.join(&self.description_file)
    }

    #[must_use]
    pub fn field_path(&self, field: Field) -> PathBuf {
        self.dir.join(field.file_name())
    }

    // ========================================================================
    // Scalar Fields
    // ========================================================================

    /// Read a field. Missing, unreadable or blank files are all "unset".
    #[must_use]
    pub fn field(&self, field: Field) -> Option<String> {
        let value = fs::read_to_string(self.field_path(field)).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Overwrite a field file with `value`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank value, `Io` if the file cannot be written.
    pub fn set_field(&self, field: Field, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(BugError::validation(field.as_str(), "cannot be empty"));
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.field_path(field), format!("{value}\n"))?;
        tracing::debug!(issue = %self.directory_name, %field, value, "Set field");
        Ok(())
    }

    /// Remove a field file. Clearing an unset field is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be removed.
    pub fn clear_field(&self, field: Field) -> Result<()> {
        match fs::remove_file(self.field_path(field)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.field(Field::Status)
    }

    #[must_use]
    pub fn priority(&self) -> Option<String> {
        self.field(Field::Priority)
    }

    #[must_use]
    pub fn milestone(&self) -> Option<String> {
        self.field(Field::Milestone)
    }

    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        self.field(Field::Identifier)
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// All tags on this issue, sorted.
    #[must_use]
    pub fn tags(&self) -> BTreeSet<String> {
        let Ok(entries) = fs::read_dir(self.dir.join(TAGS_DIR)) else {
            return BTreeSet::new();
        };
        entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        valid_tag(tag) && self.dir.join(TAGS_DIR).join(tag).is_file()
    }

    /// Add a tag. Tagging twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty or path-like tag, `Io` on write failure.
    pub fn add_tag(&self, tag: &str) -> Result<()> {
        if !valid_tag(tag) {
            return Err(BugError::validation("tag", format!("invalid tag '{tag}'")));
        }
        let tags_dir = self.dir.join(TAGS_DIR);
        fs::create_dir_all(&tags_dir)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(tags_dir.join(tag))?;
        tracing::debug!(issue = %self.directory_name, tag, "Added tag");
        Ok(())
    }

    /// Remove a tag. Removing an absent tag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the tag file exists but cannot be removed.
    pub fn remove_tag(&self, tag: &str) -> Result<()> {
        if !valid_tag(tag) {
            return Ok(());
        }
        let tags_dir = self.dir.join(TAGS_DIR);
        match fs::remove_file(tags_dir.join(tag)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }
        // Drop the tags directory once it is empty; a failure only means it isn't.
        let _ = fs::remove_dir(&tags_dir);
        Ok(())
    }

    // ========================================================================
    // Description Stream
    // ========================================================================

    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description_path().is_file()
    }

    /// Read the whole description.
    ///
    /// # Errors
    ///
    /// Returns `NoDescription` if the description file does not exist.
    pub fn read_description(&mut self) -> Result<String> {
        let file = self.description_handle(false)?;
        file.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Append bytes to the description, creating the directory and file
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory or file cannot be created or written.
    pub fn append_description(&mut self, data: &[u8]) -> Result<()> {
        let file = self.description_handle(true)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(())
    }

    /// Release the description handle. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Io` if buffered data cannot be synced.
    pub fn close(&mut self) -> Result<()> {
        if let Some(file) = self.description.take() {
            file.sync_all()?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_description_open(&self) -> bool {
        self.description.is_some()
    }

    fn description_handle(&mut self, create: bool) -> Result<&mut File> {
        if self.description.is_none() {
            let path = self.description_path();
            if create {
                fs::create_dir_all(&self.dir)?;
            } else if !path.is_file() {
                return Err(BugError::NoDescription { path });
            }
            let file = OpenOptions::new()
                .read(true)
                .append(true)
                .create(create)
                .open(&path)
                .map_err(|e| {
                    if e.kind() == io::ErrorKind::NotFound {
                        BugError::NoDescription { path: path.clone() }
                    } else {
                        BugError::Io(e)
                    }
                })?;
            tracing::trace!(path = %path.display(), "Opened description");
            self.description = Some(file);
        }
        match &mut self.description {
            Some(file) => Ok(file),
            None => Err(BugError::NoDescription {
                path: self.dir.join(&self.description_file),
            }),
        }
    }
}

impl Drop for Issue {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

fn valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag != "."
        && tag != ".."
        && !tag.contains(['/', '\\', '\0'])
        && tag.trim() == tag
}
