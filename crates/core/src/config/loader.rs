//! Config path resolution
//!
//! Handles resolving paths for configuration and log files.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the framework base directory
pub const HOME_ENV: &str = "MUFW_HOME";

/// Name of the framework-global config file
pub const GLOBAL_CONFIG_FILE: &str = "global.toml";

/// Returns the framework base directory.
///
/// Uses `$MUFW_HOME` when set, otherwise the directory containing the
/// current executable.
pub fn framework_base_dir() -> ConfigResult<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the base configs directory.
///
/// Path: `<base>/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(framework_base_dir()?.join("configs"))
}

/// Returns the framework-global config path.
///
/// Path: `<base>/configs/global.toml`
pub fn global_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join(GLOBAL_CONFIG_FILE))
}

/// Returns the default logs directory.
///
/// Path: `<base>/logs/`
pub fn default_logs_dir() -> ConfigResult<PathBuf> {
    Ok(framework_base_dir()?.join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_path_format() {
        // Base resolution depends on the environment; check the suffix only
        let path = global_config_path().unwrap();
        assert!(path.ends_with("configs/global.toml"));
    }

    #[test]
    fn test_default_logs_dir_is_under_base() {
        let base = framework_base_dir().unwrap();
        assert_eq!(default_logs_dir().unwrap(), base.join("logs"));
    }
}
