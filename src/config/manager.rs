//! Configuration manager for loading and saving configuration
//!
//! The configuration file lives at `$GESTURELIGHT_HOME/config.json`
//! (current directory when the variable is unset). Writes go through a
//! temporary file in the same directory and an atomic rename.

use crate::config::models::LightConfig;
use crate::error::{GestureLightError, Result, StringError};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable naming the directory for config and logs
pub const HOME_ENV_VAR: &str = "GESTURELIGHT_HOME";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Directory holding the configuration file and logs
    pub fn get_home_dir() -> PathBuf {
        let home = std::env::var(HOME_ENV_VAR).unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_home_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::get_config_path();
        let config_dir = config_path.parent().ok_or_else(|| {
            GestureLightError::ConfigError(StringError::new("Invalid config path"))
        })?;

        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    }

    /// Load configuration from disk
    ///
    /// A missing or corrupt file yields the default configuration.
    pub fn load() -> Result<LightConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found at {}, using defaults", config_path.display());
            return Ok(LightConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(LightConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    pub fn save(config: &LightConfig) -> Result<()> {
        let config_path = Self::get_config_path();
        let config_dir = Self::ensure_config_dir()?;

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(&config_path)
            .map_err(|e| GestureLightError::ConfigError(Box::new(e)))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{HomeGuard, create_test_dir};

    #[test]
    fn test_config_path() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);

        let path = ConfigManager::get_config_path();
        assert!(path.starts_with(temp_dir.path()));
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);

        let config = ConfigManager::load().unwrap();
        assert_eq!(config, LightConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);

        let mut config = LightConfig::default();
        config.serial.port = Some("/dev/ttyUSB0".to_string());
        config.frame.mirror_input = true;
        ConfigManager::save(&config).unwrap();

        assert!(ConfigManager::get_config_path().exists());
        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);

        std::fs::write(ConfigManager::get_config_path(), "{ not json").unwrap();
        let config = ConfigManager::load().unwrap();
        assert_eq!(config, LightConfig::default());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = create_test_dir();
        let _guard = HomeGuard::new(&temp_dir);

        ConfigManager::save(&LightConfig::default()).unwrap();
        ConfigManager::save(&LightConfig::default()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
    }
}
