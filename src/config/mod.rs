//! Configuration management for `bug_rust`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`BUG_*`)
//! 3. Project config (`.bug.yml` beside the `issues` directory)
//! 4. Defaults
//!
//! The issues root itself is located by [`discover_root`]: `PMIT` when it
//! names a directory containing `issues/`, otherwise the nearest ancestor
//! of the working directory that has one.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the directory holding one subdirectory per issue.
pub const ISSUES_DIR: &str = "issues";
/// Project config file, read from the directory containing `issues/`.
pub const CONFIG_FILE: &str = ".bug.yml";
/// Environment variable pointing at the directory containing `issues/`.
pub const ROOT_ENV: &str = "PMIT";
/// Prefix prepended to synthesized commit messages.
pub const DEFAULT_COMMIT_PREFIX: &str = "bug: ";
/// Editor used when neither config nor environment names one.
pub const DEFAULT_EDITOR: &str = "vi";

/// One configuration source. Unset keys defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// Name of the description file inside each issue directory.
    #[serde(alias = "DescriptionFileName")]
    pub description_file: Option<String>,
    /// Template copied into new issues.
    #[serde(alias = "DefaultDescriptionFile")]
    pub default_description_file: Option<PathBuf>,
    /// Register external close references when identifier files are deleted.
    pub autoclose: Option<bool>,
    /// Commit message prefix; empty disables it.
    pub commit_prefix: Option<String>,
    pub editor: Option<String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        if other.description_file.is_some() {
            self.description_file.clone_from(&other.description_file);
        }
        if other.default_description_file.is_some() {
            self.default_description_file
                .clone_from(&other.default_description_file);
        }
        if other.autoclose.is_some() {
            self.autoclose = other.autoclose;
        }
        if other.commit_prefix.is_some() {
            self.commit_prefix.clone_from(&other.commit_prefix);
        }
        if other.editor.is_some() {
            self.editor.clone_from(&other.editor);
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let layer: Self = serde_yaml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded project config");
        Ok(layer)
    }

    /// Build a layer from `BUG_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            match key.as_str() {
                "BUG_DESCRIPTION_FILE" => layer.description_file = non_empty(value),
                "BUG_DEFAULT_DESCRIPTION_FILE" => {
                    layer.default_description_file = non_empty(value).map(PathBuf::from);
                }
                "BUG_AUTOCLOSE" => {
                    layer.autoclose = parse_bool(&value);
                    if layer.autoclose.is_none() {
                        tracing::warn!(value = %value, "Ignoring unparseable BUG_AUTOCLOSE");
                    }
                }
                "BUG_COMMIT_PREFIX" => layer.commit_prefix = Some(value),
                "BUG_EDITOR" => layer.editor = non_empty(value),
                _ => {}
            }
        }
        layer
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub autoclose: Option<bool>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        ConfigLayer {
            autoclose: self.autoclose,
            ..ConfigLayer::default()
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Directory containing `issues/` (and `.bug.yml`).
    pub root: PathBuf,
    pub issues_dir: PathBuf,
    pub description_file: String,
    pub default_description_file: Option<PathBuf>,
    pub autoclose: bool,
    /// `None` when the prefix is disabled.
    pub commit_prefix: Option<String>,
    pub editor: String,
}

impl Config {
    /// Resolve merged layers against a discovered root.
    #[must_use]
    pub fn from_layer(root: &Path, layer: &ConfigLayer) -> Self {
        let description_file = layer
            .description_file
            .clone()
            .unwrap_or_else(|| bug_lib::DEFAULT_DESCRIPTION_FILE.to_string());
        let default_description_file = layer.default_description_file.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            }
        });
        let commit_prefix = match &layer.commit_prefix {
            Some(prefix) if prefix.is_empty() => None,
            Some(prefix) => Some(prefix.clone()),
            None => Some(DEFAULT_COMMIT_PREFIX.to_string()),
        };
        let editor = layer
            .editor
            .clone()
            .or_else(editor_from_env)
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

        Self {
            root: root.to_path_buf(),
            issues_dir: root.join(ISSUES_DIR),
            description_file,
            default_description_file,
            autoclose: layer.autoclose.unwrap_or(true),
            commit_prefix,
            editor,
        }
    }

    /// Issue store over the configured issues directory.
    #[must_use]
    pub fn store(&self) -> bug_lib::IssueStore {
        bug_lib::IssueStore::with_description_file(&self.issues_dir, &self.description_file)
    }
}

/// Discover the root and load every configuration layer.
///
/// # Errors
///
/// Returns `NotInitialized` if no issues directory is found, or a config
/// error if `.bug.yml` is unreadable.
pub fn load_config(overrides: &CliOverrides) -> Result<Config> {
    let root = discover_root(None)?;
    load_config_at(&root, overrides)
}

/// Load configuration for an already known root.
///
/// # Errors
///
/// Returns an error if `.bug.yml` exists but cannot be read or parsed.
pub fn load_config_at(root: &Path, overrides: &CliOverrides) -> Result<Config> {
    let layers = [
        ConfigLayer::from_yaml(&root.join(CONFIG_FILE))?,
        ConfigLayer::from_env(),
        overrides.as_layer(),
    ];
    let merged = ConfigLayer::merge_layers(&layers);
    let config = Config::from_layer(root, &merged);
    tracing::debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Locate the directory that contains `issues/`.
///
/// Honors `PMIT` when it names such a directory, otherwise walks up from
/// `start` (or the working directory).
///
/// # Errors
///
/// Returns `NotInitialized` if no issues directory is found.
pub fn discover_root(start: Option<&Path>) -> Result<PathBuf> {
    let env_root = env::var_os(ROOT_ENV).map(PathBuf::from);
    discover_root_with_env(start, env_root.as_deref())
}

fn discover_root_with_env(start: Option<&Path>, env_root: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = env_root {
        if path.join(ISSUES_DIR).is_dir() {
            return Ok(canonical(path));
        }
        tracing::debug!(path = %path.display(), "{ROOT_ENV} has no issues directory; searching parents");
    }

    let mut current = match start {
        Some(path) => path.to_path_buf(),
        None => env::current_dir()?,
    };

    loop {
        if current.join(ISSUES_DIR).is_dir() {
            return Ok(canonical(&current));
        }
        if !current.pop() {
            break;
        }
    }

    Err(AppError::NotInitialized)
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn editor_from_env() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .iter()
        .find_map(|key| env::var(key).ok().and_then(non_empty))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
