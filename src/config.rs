//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub sync: SyncConfig,
    pub data: DataConfig,
    pub ui: UiConfig,
}

/// Simulated scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Camera scan latency in milliseconds.
    pub scan_delay_ms: u64,
    /// Image upload decode latency in milliseconds.
    pub upload_delay_ms: u64,
    /// Scans after this local hour are marked late.
    pub late_after_hour: u32,
}

/// Simulated sync settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Manual sync latency in milliseconds.
    pub sync_delay_ms: u64,
    /// Interval between background sync checks while offline.
    pub background_check_secs: u64,
}

/// Startup dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON seed file. The bundled sample data is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long the online/offline notification stays visible.
    pub notification_secs: u64,
    /// Write logs to a daily rolling file in the data directory.
    pub log_to_file: bool,
}

const MAX_DELAY_MS: u64 = 60_000;

impl AppConfig {
    /// Platform directories for config and logs.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("edu", "school", "attendance-scanner")
    }

    /// Get config file path (platform config dir, falling back to the executable's directory).
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = Self::project_dirs() {
            return dirs.config_dir().join("config.toml");
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.late_after_hour > 23 {
            return Err(ConfigError::Validation(
                "Late-after hour must be between 0 and 23".to_string(),
            ));
        }
        if self.scanner.scan_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "Scan delay cannot exceed {MAX_DELAY_MS} ms"
            )));
        }
        if self.scanner.upload_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "Upload delay cannot exceed {MAX_DELAY_MS} ms"
            )));
        }
        if self.sync.sync_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "Sync delay cannot exceed {MAX_DELAY_MS} ms"
            )));
        }
        if self.sync.background_check_secs < 1 {
            return Err(ConfigError::Validation(
                "Background check interval must be at least 1 second".to_string(),
            ));
        }
        if !(1..=30).contains(&self.ui.notification_secs) {
            return Err(ConfigError::Validation(
                "Notification duration must be between 1 and 30 seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ScannerConfig {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }
}

impl SyncConfig {
    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }

    pub fn background_check_interval(&self) -> Duration {
        Duration::from_secs(self.background_check_secs)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: 2000,
            upload_delay_ms: 1500,
            late_after_hour: crate::workflow::DEFAULT_LATE_AFTER_HOUR,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_delay_ms: 2000,
            background_check_secs: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: 3,
            log_to_file: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_late_hour_bounds() {
        let mut config = AppConfig::default();

        config.scanner.late_after_hour = 24;
        assert!(config.validate().is_err());

        config.scanner.late_after_hour = 23;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_delay_limits() {
        let mut config = AppConfig::default();
        config.scanner.scan_delay_ms = 60_001;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sync.sync_delay_ms = 0;
        assert!(config.validate().is_ok());
        config.sync.background_check_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_notification_bounds() {
        let mut config = AppConfig::default();

        config.ui.notification_secs = 0;
        assert!(config.validate().is_err());

        config.ui.notification_secs = 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[scanner]\nlate_after_hour = 8\n").unwrap();
        assert_eq!(config.scanner.late_after_hour, 8);
        assert_eq!(config.scanner.scan_delay_ms, 2000);
        assert_eq!(config.sync, SyncConfig::default());
        assert!(config.data.seed_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("attendance_scanner_config_test");
        let path = dir.join("config.toml");
        std::fs::remove_file(&path).ok();

        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        let mut config = AppConfig::default();
        config.scanner.scan_delay_ms = 500;
        config.data.seed_file = Some(PathBuf::from("roster.json"));
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded, config),
            other => panic!("unexpected load result: {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_file_reported() {
        let path = std::env::temp_dir().join("attendance_scanner_invalid_config.toml");
        std::fs::write(&path, "[ui]\nnotification_secs = 0\n").unwrap();

        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));

        std::fs::remove_file(&path).ok();
    }
}
