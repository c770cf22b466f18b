//! Configuration for the thermal zone bridge.

use crate::monitor::DEFAULT_SYSFS_ROOT;
use crate::serialization::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThermalBridgeConfig {
    /// Thermal zone collection settings.
    #[serde(default)]
    pub thermal: ThermalConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thermal zone collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Root of the thermal sysfs tree (default: "/sys/class/thermal").
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,

    /// Hostname to tag shipped samples with.
    /// Use "auto" to detect automatically (default).
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Poll interval in seconds (default: 30).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// The data format emitted samples are encoded with (default: json).
    /// Interpreted by the serialization layer, not by the monitor.
    #[serde(default)]
    pub data_format: Format,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            sysfs_root: default_sysfs_root(),
            hostname: default_hostname(),
            poll_interval_secs: default_poll_interval(),
            data_format: Format::default(),
        }
    }
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(DEFAULT_SYSFS_ROOT)
}

fn default_hostname() -> String {
    "auto".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ThermalBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ThermalBridgeConfig = json5::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thermal.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the hostname to use, resolving "auto" if needed.
    pub fn get_hostname(&self) -> String {
        if self.thermal.hostname == "auto" {
            hostname::get()
                .ok()
                .and_then(|h| h.into_string().ok())
                .unwrap_or_else(|| "unknown".to_string())
        } else {
            self.thermal.hostname.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: ThermalBridgeConfig = json5::from_str("{}").unwrap();
        assert_eq!(config.thermal.sysfs_root, PathBuf::from("/sys/class/thermal"));
        assert_eq!(config.thermal.hostname, "auto");
        assert_eq!(config.thermal.poll_interval_secs, 30);
        assert_eq!(config.thermal.data_format, Format::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            thermal: {
                sysfs_root: "/mnt/sysfs/class/thermal",
                hostname: "server01",
                poll_interval_secs: 10,
                data_format: "cbor"
            },
            logging: { level: "debug" }
        }"#;

        let config: ThermalBridgeConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(
            config.thermal.sysfs_root,
            PathBuf::from("/mnt/sysfs/class/thermal")
        );
        assert_eq!(config.thermal.hostname, "server01");
        assert_eq!(config.thermal.poll_interval_secs, 10);
        assert_eq!(config.thermal.data_format, Format::Cbor);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.get_hostname(), "server01");
    }

    #[test]
    fn test_validate_zero_interval() {
        let json = r#"{
            thermal: { poll_interval_secs: 0 }
        }"#;

        let config: ThermalBridgeConfig = json5::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hostname_auto_resolves() {
        let config = ThermalBridgeConfig::default();
        assert!(!config.get_hostname().is_empty());
        assert_ne!(config.get_hostname(), "auto");
    }
}
