//! Configuration loading.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.kcdb/config.toml`)
//! 3. User config (`~/.kcdb/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional; command line flags override the result.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::context::SearchContext;
use crate::error::{Result, SearchError};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where candidates come from.
    pub datastore: DatastoreConfig,
    /// Per-request search behavior.
    pub search: SearchConfig,
}

/// Datastore configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatastoreConfig {
    /// JSON catalog file to search.
    pub catalog: Option<PathBuf>,
}

/// Search request configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Request deadline in milliseconds. Zero disables the deadline.
    pub timeout_ms: u64,
    /// Keep at most this many ranked results.
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_results: None,
        }
    }
}

impl SearchConfig {
    /// Build a request context carrying the configured deadline.
    pub fn context(&self) -> SearchContext {
        if self.timeout_ms == 0 {
            SearchContext::new()
        } else {
            SearchContext::with_timeout(Duration::from_millis(self.timeout_ms))
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<kcdb_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = kcdb_home()?.join("config.toml");
        Self::load_optional(&path)
    }

    /// Load project config from `.kcdb/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let path = cwd.join(".kcdb").join("config.toml");
        Self::load_optional(&path)
    }

    /// Load a config file that may legitimately be absent.
    ///
    /// A file that exists but fails to parse is reported and skipped.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("ignoring config {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| SearchError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| SearchError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // KCDB_CATALOG
        if let Ok(val) = env::var("KCDB_CATALOG") {
            if val.is_empty() {
                tracing::warn!("KCDB_CATALOG is empty, ignoring");
            } else {
                self.datastore.catalog = Some(PathBuf::from(val));
            }
        }

        // KCDB_SEARCH_TIMEOUT_MS
        if let Ok(val) = env::var("KCDB_SEARCH_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(n) => self.search.timeout_ms = n,
                Err(_) => tracing::warn!(
                    "Invalid KCDB_SEARCH_TIMEOUT_MS value '{}'. \
                    Expected a non-negative integer. Using '{}'.",
                    val,
                    self.search.timeout_ms
                ),
            }
        }

        // KCDB_MAX_RESULTS
        if let Ok(val) = env::var("KCDB_MAX_RESULTS") {
            match val.parse::<usize>() {
                Ok(0) => tracing::warn!("KCDB_MAX_RESULTS must be positive, ignoring"),
                Ok(n) => self.search.max_results = Some(n),
                Err(_) => tracing::warn!(
                    "Invalid KCDB_MAX_RESULTS value '{}'. Expected a positive integer.",
                    val
                ),
            }
        }
    }

    /// Merge another config into this one, field by field.
    ///
    /// Fields of `other` that differ from the defaults win. As a consequence a
    /// higher layer cannot reset a value back to its default.
    fn merge(mut self, other: Config) -> Self {
        if other.datastore.catalog.is_some() {
            self.datastore.catalog = other.datastore.catalog;
        }

        let default_search = SearchConfig::default();
        if other.search.timeout_ms != default_search.timeout_ms {
            self.search.timeout_ms = other.search.timeout_ms;
        }
        if other.search.max_results.is_some() {
            self.search.max_results = other.search.max_results;
        }

        self
    }
}

/// Get the kcdb home directory.
///
/// Returns `$KCDB_HOME` if set and non-empty, otherwise `~/.kcdb`.
pub fn kcdb_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("KCDB_HOME") {
        if home.is_empty() {
            tracing::warn!("KCDB_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".kcdb"))
}
