//! Configuration system for mufw
//!
//! The framework-global configuration is a TOML file loaded once at startup,
//! before logging is configured, because logging and profiler setup read it.
//!
//! - Type-safe config struct via serde
//! - Auto-generation of a default config file
//! - Manual reload capability
//!
//! # Example
//!
//! ```ignore
//! use mufw_core::GlobalConfig;
//!
//! let config = GlobalConfig::load().unwrap_or_default();
//! println!("Logs go to {:?}", config.logs_dir());
//! ```

mod loader;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mufw_sdk::layout::DEFAULT_LOG_PREFIX;

use crate::profiler::ProfilerOptions;

pub use loader::{
    configs_dir, default_logs_dir, framework_base_dir, global_config_path, GLOBAL_CONFIG_FILE,
    HOME_ENV,
};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine the framework base directory
    #[error("Config directory not available - could not resolve framework base path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Framework-global configuration.
///
/// Loaded from `<base>/configs/global.toml` unless a path is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Force debug-level logging in release builds
    pub debug: bool,

    /// Directory for log files; `<base>/logs` when unset
    pub logs_path: Option<PathBuf>,

    /// Log file name prefix (`<prefix>_<yyMMdd>.log`)
    pub log_file_prefix: String,

    /// Write logs to a file in addition to the console
    pub log_to_file: bool,

    /// Profiler options applied at startup
    pub profiler: ProfilerOptions,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            logs_path: None,
            log_file_prefix: DEFAULT_LOG_PREFIX.to_string(),
            log_to_file: true,
            profiler: ProfilerOptions::default(),
        }
    }
}

impl GlobalConfig {
    /// Load config from the default path, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&global_config_path()?)
    }

    /// Load config from `path`, creating default if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded global config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default global config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to the default path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&global_config_path()?)
    }

    /// Save config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved global config to {:?}", path);
        Ok(())
    }

    /// Reload config from `path`.
    ///
    /// Updates self with the current file contents.
    pub fn reload(&mut self, path: &Path) -> ConfigResult<()> {
        let content = std::fs::read_to_string(path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded global config from {:?}", path);
        Ok(())
    }

    /// Resolved logs directory
    pub fn logs_dir(&self) -> ConfigResult<PathBuf> {
        match &self.logs_path {
            Some(path) => Ok(path.clone()),
            None => default_logs_dir(),
        }
    }
}
