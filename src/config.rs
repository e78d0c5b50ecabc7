//! Configuration loading and management.
//!
//! Resolution order for the config file:
//! 1. `--config` / `TASKPAD_CONFIG_PATH`
//! 2. `./taskpad.yaml`
//! 3. `<user config dir>/taskpad/config.yaml`
//! 4. Built-in defaults
//!
//! `TASKPAD_DB_PATH` overrides the database path from any file.

use crate::format::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "TASKPAD_CONFIG_PATH";
pub const DB_PATH_ENV: &str = "TASKPAD_DB_PATH";

const PROJECT_CONFIG_FILE: &str = "taskpad.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Where tasks and preferences are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Presentation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default listing format: "markdown" or "json".
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

impl UiConfig {
    /// Parsed listing format; unknown values fall back to markdown.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_str(&self.default_format).unwrap_or_default()
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("taskpad"))
        .unwrap_or_else(|| PathBuf::from(".taskpad"))
        .join("taskpad.db")
}

fn default_format() -> String {
    "markdown".to_string()
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the config file and apply environment overrides.
    ///
    /// An explicitly named file must exist and parse; discovered files are
    /// skipped when absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] with a custom environment lookup.
    pub fn resolve_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load(&path)?,
            None => Self::discover()?,
        };

        if let Some(db_path) = env(DB_PATH_ENV).filter(|p| !p.is_empty()) {
            config.storage.db_path = PathBuf::from(db_path);
        }

        Ok(config)
    }

    fn discover() -> Result<Self> {
        let candidates = [
            Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            dirs::config_dir().map(|d| d.join("taskpad").join("config.yaml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                debug!(path = %path.display(), "Loading config");
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }
}
