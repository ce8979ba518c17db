//! Configuration management for the ride coordination server.
//!
//! Loaded with figment from, in order of precedence (highest first):
//! 1. Environment variables prefixed with `RIDEBOARD_` (`__` separates nesting,
//!    e.g. `RIDEBOARD_SERVER__PORT=9000`)
//! 2. A TOML file: `RIDEBOARD_CONFIG` if set, else `rideboard.toml` in the
//!    working directory
//! 3. Default values

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::domain::DashboardLimits;
use crate::logging::Verbosity;

const CONFIG_FILE_NAME: &str = "rideboard.toml";
const CONFIG_PATH_VAR: &str = "RIDEBOARD_CONFIG";
const ENV_PREFIX: &str = "RIDEBOARD_";
const DATA_DIR_NAME: &str = "rideboard";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub dashboard: DashboardConfig,
    /// Default log level; `RUST_LOG` overrides it.
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin, or `*` for any.
    pub cors_origin: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local tables, lost on restart.
    Memory,
    /// YAML and CSV files under `data_directory`.
    #[default]
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Defaults to `<data_local_dir>/rideboard`.
    pub data_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub parent_recent_rides: usize,
    pub driver_recent_rides: usize,
    pub admin_recent: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let limits = DashboardLimits::default();
        Self {
            parent_recent_rides: limits.parent_recent_rides,
            driver_recent_rides: limits.driver_recent_rides,
            admin_recent: limits.admin_recent,
        }
    }
}

impl From<LogLevel> for Verbosity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Verbosity::Quiet,
            LogLevel::Info => Verbosity::Normal,
            LogLevel::Debug => Verbosity::Verbose,
            LogLevel::Trace => Verbosity::Trace,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::load_from(&path)
    }

    /// Load configuration using `config_file` as the TOML layer. A missing
    /// file is skipped.
    pub fn load_from(config_file: &Path) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        let prefixes = [
            ("dashboard.parent_recent_rides", self.dashboard.parent_recent_rides),
            ("dashboard.driver_recent_rides", self.dashboard.driver_recent_rides),
            ("dashboard.admin_recent", self.dashboard.admin_recent),
        ];
        for (key, value) in prefixes {
            if value == 0 {
                return Err(ConfigError::Validation {
                    message: format!("{} must be greater than 0", key),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// The data directory, resolving the default if not set.
    #[must_use]
    pub fn data_directory(&self) -> PathBuf {
        self.storage
            .data_directory
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn dashboard_limits(&self) -> DashboardLimits {
        DashboardLimits {
            parent_recent_rides: self.dashboard.parent_recent_rides,
            driver_recent_rides: self.dashboard.driver_recent_rides,
            admin_recent: self.dashboard.admin_recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.dashboard_limits(), DashboardLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_data_directory_default() {
        let config = Config::default();
        assert!(config.data_directory().ends_with(DATA_DIR_NAME));

        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::File,
                data_directory: Some(PathBuf::from("/srv/rides")),
            },
            ..Config::default()
        };
        assert_eq!(config.data_directory(), PathBuf::from("/srv/rides"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rideboard.toml");
        fs::write(
            &path,
            r#"
log_level = "debug"

[server]
port = 9090

[storage]
backend = "memory"

[dashboard]
admin_recent = 3
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.dashboard.admin_recent, 3);
        assert_eq!(config.dashboard.parent_recent_rides, 5);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, Config::default().server.port);
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation { .. })));

        let mut config = Config::default();
        config.dashboard.driver_recent_rides = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("driver_recent_rides"));
    }

    #[test]
    fn test_log_level_to_verbosity() {
        assert_eq!(Verbosity::from(LogLevel::Error), Verbosity::Quiet);
        assert_eq!(Verbosity::from(LogLevel::Trace), Verbosity::Trace);
    }
}
