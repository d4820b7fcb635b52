//! # Application Configuration
//!
//! Where the database lives, how long autosave waits, where receipts go.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RENTSLIP_DB_PATH=/tmp/rentslip.db                                  │
//! │     RENTSLIP_EXPORT_DIR=~/Receipts                                     │
//! │     RENTSLIP_AUTOSAVE_MS=750                                           │
//! │     RENTSLIP_AUTO_EXPORT=false                                         │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/rentslip/config.toml (Linux)                             │
//! │     ~/Library/Application Support/com.rentslip.rentslip/config.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! database_path = "/home/me/.local/share/rentslip/rentslip.db"
//!
//! [autosave]
//! debounce_ms = 500
//!
//! [export]
//! output_dir = "."
//! auto_export = true
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Default quiet period before a draft is autosaved.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// File name of the database inside the platform data dir.
pub const DATABASE_FILE_NAME: &str = "rentslip.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rentslip", "rentslip")
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. `None` means `<data dir>/rentslip.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// `[autosave]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveSettings {
    /// Quiet period after the last edit before the draft is written.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        AutosaveSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// `[export]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory exported receipts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Export every generated receipt without being asked.
    #[serde(default = "default_true")]
    pub auto_export: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
            auto_export: true,
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub autosave: AutosaveSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::ConfigLoadFailed(format!(
                        "{} does not exist",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.autosave.debounce_ms == 0 {
            return Err(AppError::InvalidConfig(
                "autosave.debounce_ms must be greater than 0".into(),
            ));
        }

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig(
                "export.output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `RENTSLIP_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("RENTSLIP_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("RENTSLIP_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export dir from environment");
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(ms) = lookup("RENTSLIP_AUTOSAVE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.autosave.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric RENTSLIP_AUTOSAVE_MS"),
            }
        }

        if let Some(flag) = lookup("RENTSLIP_AUTO_EXPORT") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.export.auto_export = true,
                "0" | "false" | "no" | "off" => self.export.auto_export = false,
                _ => warn!(value = %flag, "Unknown RENTSLIP_AUTO_EXPORT value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved database path: the configured one or the platform default.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| AppError::InvalidConfig("Could not determine app data directory".into()))
    }

    /// Autosave quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.autosave.debounce_ms)
    }
}
