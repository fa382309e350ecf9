//! Application configuration.
//!
//! Values are layered from built-in defaults, `config.toml` in the platform
//! config directory and `WHERETO_*` environment variables (later wins).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::{calendar::CalendarMode, view::Section};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "whereto";
/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix of environment overrides, e.g. `WHERETO_CALENDAR_MODE`.
pub const ENV_PREFIX: &str = "WHERETO";

const DEFAULT_CONFIG: &str = r#"# WhereTo? configuration

# Section shown on startup: "day" or "night".
start_section = "day"

# Initial calendar grid in the night section: "week" or "month".
calendar_mode = "week"

# Directory holding venues.json and events.json to use instead of the
# bundled catalog.
# catalog_dir = "/path/to/catalog"

# Where whereto.log is written. Defaults to the config directory.
# log_dir = "/path/to/logs"
"#;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Replacement catalog directory; `None` uses the bundled data.
    pub catalog_dir: Option<PathBuf>,
    /// Section shown on startup.
    pub start_section: Section,
    /// Initial calendar grid for the night section.
    pub calendar_mode: CalendarMode,
    /// Directory receiving the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            start_section: Section::Day,
            calendar_mode: CalendarMode::Week,
            log_dir: config_root().join("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (if present) and environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}

/// Root of the application's config directory.
pub fn config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Location of the configuration file.
pub fn config_path() -> PathBuf {
    config_root().join(CONFIG_FILE)
}

/// Write a commented default configuration if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write a commented default configuration to `path` unless it already exists.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
