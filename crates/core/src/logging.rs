//! Logging destinations
//!
//! Installs the global `tracing` subscriber with a console destination and an
//! optional daily log file. Both render `time | LEVEL | thread | target | message`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use mufw_sdk::layout::{
    CONSOLE_TIME_FORMAT, FILE_DATE_FORMAT, FILE_TIME_FORMAT, LOG_FILE_EXTENSION,
};

use crate::config::{ConfigResult, GlobalConfig};

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create the logs directory or open the log file
    #[error("Failed to open log file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Logging already installed: {0}")]
    AlreadyInstalled(String),
}

/// Where and how verbosely to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Maximum level when `RUST_LOG` is not set
    pub level: Level,
    /// Directory for the log file; console only when `None`
    pub logs_dir: Option<PathBuf>,
    /// Log file name prefix
    pub file_prefix: String,
}

impl LogSettings {
    /// Build settings from the global config
    pub fn from_config(config: &GlobalConfig) -> ConfigResult<Self> {
        let logs_dir = if config.log_to_file {
            Some(config.logs_dir()?)
        } else {
            None
        };

        Ok(Self {
            level: default_level(config.debug),
            logs_dir,
            file_prefix: config.log_file_prefix.clone(),
        })
    }

    /// Same settings without the file destination
    pub fn console_only(&self) -> Self {
        Self {
            logs_dir: None,
            ..self.clone()
        }
    }

    /// Path of today's log file, if file logging is enabled
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logs_dir
            .as_ref()
            .map(|dir| dir.join(log_file_name(&self.file_prefix, Local::now().date_naive())))
    }
}

/// Debug level in debug builds or when forced, info otherwise
pub fn default_level(force_debug: bool) -> Level {
    if force_debug || cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Log file name for `date`: `<prefix>_<yyMMdd>.log`
pub fn log_file_name(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        date.format(FILE_DATE_FORMAT),
        LOG_FILE_EXTENSION
    )
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level.
///
/// # Returns
/// The log file path when a file destination was installed.
pub fn init_logging(settings: &LogSettings) -> Result<Option<PathBuf>, LoggingError> {
    let file_path = settings.log_file_path();

    let file_layer = match &file_path {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_timer(ChronoLocal::new(FILE_TIME_FORMAT.to_string()))
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_target(true),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_timer(ChronoLocal::new(CONSOLE_TIME_FORMAT.to_string()))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;

    Ok(file_path)
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(log_file_name("mufw", date), "mufw_240309.log");
    }

    #[test]
    fn test_default_level_forced() {
        assert_eq!(default_level(true), Level::DEBUG);
        if cfg!(debug_assertions) {
            assert_eq!(default_level(false), Level::DEBUG);
        } else {
            assert_eq!(default_level(false), Level::INFO);
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = GlobalConfig {
            logs_path: Some(PathBuf::from("/tmp/mufw-logs")),
            log_file_prefix: "app".to_string(),
            ..Default::default()
        };

        let settings = LogSettings::from_config(&config).unwrap();
        assert_eq!(settings.logs_dir, Some(PathBuf::from("/tmp/mufw-logs")));

        let path = settings.log_file_path().unwrap();
        assert!(path.starts_with("/tmp/mufw-logs"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("app_"));
        assert!(name.ends_with(".log"));

        assert!(settings.console_only().log_file_path().is_none());
    }

    #[test]
    fn test_file_logging_disabled() {
        let config = GlobalConfig {
            log_to_file: false,
            ..Default::default()
        };
        let settings = LogSettings::from_config(&config).unwrap();
        assert!(settings.logs_dir.is_none());
    }

    #[test]
    fn test_open_log_file_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mufw_000101.log");

        let file = open_log_file(&path).unwrap();
        drop(file);
        assert!(path.exists());
    }
}
