// Optional TOML configuration

use crate::error::ConfigError;
use dirs::config_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration. Every field has a default, so an absent or
/// partial file is fine.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Prefix for every hardware path (useful for fake sysfs trees)
    pub sysfs_root: PathBuf,
    /// power_supply entry holding the battery attributes
    pub battery: String,
    pub intervals: IntervalConfig,
    pub logging: LoggingConfig,
}

/// Poll intervals in milliseconds.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IntervalConfig {
    pub fan_ms: u64,
    pub cpu_ms: u64,
    pub battery_ms: u64,
    pub kbd_backlight_ms: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset
    pub level: String,
    /// Log file candidates; the first that can be opened is used
    pub files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from("/"),
            battery: "BAT1".to_string(),
            intervals: IntervalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            fan_ms: 2000,
            cpu_ms: 2000,
            battery_ms: 5000,
            kbd_backlight_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            files: vec![
                PathBuf::from("/var/log/samsung-control.log"),
                PathBuf::from("/tmp/samsung-control.log"),
            ],
        }
    }
}

impl IntervalConfig {
    pub fn fan(&self) -> Duration {
        Duration::from_millis(self.fan_ms)
    }

    pub fn cpu(&self) -> Duration {
        Duration::from_millis(self.cpu_ms)
    }

    pub fn battery(&self) -> Duration {
        Duration::from_millis(self.battery_ms)
    }

    pub fn kbd_backlight(&self) -> Duration {
        Duration::from_millis(self.kbd_backlight_ms)
    }
}

/// Per-user config location, e.g. ~/.config/samsung-control/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("samsung-control/config.toml"))
}

impl Config {
    /// Loads `path`, or the per-user file when `path` is None.
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = Config::parse(
            r#"
            battery = "BAT0"

            [intervals]
            fan_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.battery, "BAT0");
        assert_eq!(config.intervals.fan(), Duration::from_millis(500));
        assert_eq!(config.intervals.battery(), Duration::from_secs(5));
        assert_eq!(config.intervals.kbd_backlight(), Duration::from_secs(1));
        assert_eq!(config.sysfs_root, PathBuf::from("/"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "intervals = 3").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reads_given_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sysfs_root = \"/tmp/fake\"\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.sysfs_root, PathBuf::from("/tmp/fake"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.files.len(), 2);
    }
}
