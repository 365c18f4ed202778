//! Application configuration management.
//!
//! Settings are merged from several layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed with `NAMEDUPE_` (e.g. `NAMEDUPE_FORCE=true`)
//! 4. Command-line flags
//!
//! The merged [`Config`] is then validated into a [`RunConfig`], which is
//! immutable for the rest of the run and passed explicitly to every
//! component that needs it.
//!
//! # Example config file
//!
//! ```toml
//! root = "/Music"
//! delete_extensions = [".mp3", ".m4p"]
//! ignore_patterns = ["Syno", "eaDir"]
//! force = false
//! pretend = true
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DeleteMethod;
use crate::scanner::{PathFilter, PatternError};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NAMEDUPE_";

/// Errors raised while building the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No root directory was given anywhere.
    #[error("no directory to scan: pass a PATH or set `root` in the config file")]
    MissingRoot,

    /// The root does not exist or is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// An exclusion pattern failed to compile.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    /// A config layer could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// Raw settings as read from defaults, file, environment and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory to scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Extensions (with leading `.`) whose duplicates may be deleted.
    pub delete_extensions: Vec<String>,
    /// Regular expressions; matching paths are skipped entirely.
    pub ignore_patterns: Vec<String>,
    /// Delete without asking.
    pub force: bool,
    /// Report deletions without performing them.
    pub pretend: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Move files to the trash instead of deleting them.
    pub trash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            delete_extensions: vec![".mp3".to_string(), ".m4p".to_string()],
            ignore_patterns: vec!["Syno".to_string(), "eaDir".to_string()],
            force: false,
            pretend: false,
            quiet: false,
            trash: false,
        }
    }
}

/// Command-line values layered on top of everything else.
///
/// Unset fields leave the lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash: Option<bool>,
}

impl Config {
    /// Build the layered figment.
    ///
    /// `file` of `None` skips the file layer. A file that does not exist is
    /// treated as empty.
    #[must_use]
    pub fn figment(file: Option<&Path>, overrides: &Overrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = file {
            log::debug!("Reading config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Load and merge all configuration layers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the config file is malformed or a
    /// value has the wrong type.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        Ok(Self::figment(file, overrides).extract()?)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "namedupe", "namedupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory the walk starts from.
    pub root: PathBuf,
    /// Extensions whose duplicate-group members may be deleted.
    pub delete_extensions: BTreeSet<String>,
    /// Compiled exclusion patterns.
    pub filter: PathFilter,
    /// Skip confirmation prompts.
    pub force: bool,
    /// Never touch the filesystem.
    pub pretend: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// How confirmed files are removed.
    pub delete_method: DeleteMethod,
}

impl RunConfig {
    /// Create a configuration with an empty delete-list, no exclusions and
    /// all modes off. The root is not validated.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            delete_extensions: BTreeSet::new(),
            filter: PathFilter::default(),
            force: false,
            pretend: false,
            quiet: false,
            delete_method: DeleteMethod::default(),
        }
    }

    /// Validate merged settings into a run configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRoot`] if no root was configured
    /// - [`ConfigError::NotADirectory`] if the root is missing or not a directory
    /// - [`ConfigError::InvalidPattern`] if an ignore pattern is not a valid regex
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let root = config.root.clone().ok_or(ConfigError::MissingRoot)?;
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory(root));
        }

        let filter = PathFilter::new(&config.ignore_patterns)?;
        let delete_method = if config.trash {
            DeleteMethod::Trash
        } else {
            DeleteMethod::Permanent
        };

        Ok(Self::new(root)
            .with_delete_extensions(&config.delete_extensions)
            .with_filter(filter)
            .with_force(config.force)
            .with_pretend(config.pretend)
            .with_quiet(config.quiet)
            .with_delete_method(delete_method))
    }

    /// Set the delete-list. Entries are trimmed and given a leading `.`.
    #[must_use]
    pub fn with_delete_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.delete_extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    /// Set the exclusion filter.
    #[must_use]
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enable/disable force mode.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Enable/disable pretend mode.
    #[must_use]
    pub fn with_pretend(mut self, pretend: bool) -> Self {
        self.pretend = pretend;
        self
    }

    /// Enable/disable quiet mode.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set how confirmed files are removed.
    #[must_use]
    pub fn with_delete_method(mut self, method: DeleteMethod) -> Self {
        self.delete_method = method;
        self
    }
}

/// Trim an extension and make sure it starts with `.`.
///
/// Returns `None` for blank entries.
fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() {
        log::warn!("Ignoring empty delete extension");
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{ext}"))
    }
}
