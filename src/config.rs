//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source tables
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_metrics_path")]
    pub metrics_path: PathBuf,

    #[serde(default = "default_coordinates_path")]
    pub coordinates_path: PathBuf,
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from("./merged.csv")
}

fn default_coordinates_path() -> PathBuf {
    PathBuf::from("./coordinates.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            metrics_path: default_metrics_path(),
            coordinates_path: default_coordinates_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development
    #[default]
    Pretty,
    /// One JSON object per line, for production
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid {
                key: "logging.format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> String {
        format!("mhdash={},tower_http=debug", self.level)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// A config file that exists but cannot be read or parsed is an error;
    /// the search does not fall through to the defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("mhdash").join("config.toml")),
            Some(PathBuf::from("/etc/mhdash/config.toml")),
            Some(PathBuf::from("./mhdash.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file of `paths`, or the defaults if none exists
    pub fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!(path = ?path, "Loaded config");
                Ok(config)
            }
            None => {
                tracing::info!("Using default config with environment overrides");
                Self::from_env()
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        // Data overrides
        if let Some(path) = var("MHDASH_METRICS_PATH") {
            self.data.metrics_path = PathBuf::from(path);
        }
        if let Some(path) = var("MHDASH_COORDINATES_PATH") {
            self.data.coordinates_path = PathBuf::from(path);
        }

        // Server overrides
        if let Some(host) = var("MHDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("MHDASH_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "MHDASH_PORT".to_string(),
                value: port.clone(),
            })?;
        }

        // Logging overrides
        if let Some(level) = var("MHDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MHDASH_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# mhdash Configuration
#
# Environment variables override these settings:
# - MHDASH_METRICS_PATH
# - MHDASH_COORDINATES_PATH
# - MHDASH_HOST
# - MHDASH_PORT
# - MHDASH_LOG_LEVEL
# - MHDASH_LOG_FORMAT

[data]
# Metrics by country and year
metrics_path = "./merged.csv"

# Country coordinates and population
coordinates_path = "./coordinates.csv"

[server]
# Dashboard host
host = "127.0.0.1"

# Dashboard port
port = 8050

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.metrics_path, PathBuf::from("./merged.csv"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[server]\nport = \"eighty\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);

        let err = Config::load(Path::new("/nonexistent/mhdash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MHDASH_METRICS_PATH", "/data/merged.csv"),
            ("MHDASH_PORT", "8080"),
            ("MHDASH_LOG_FORMAT", "JSON"),
        ]
        .into();

        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data.metrics_path, PathBuf::from("/data/merged.csv"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == "MHDASH_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "MHDASH_PORT"));

        let err = config
            .apply_overrides(|k| (k == "MHDASH_LOG_FORMAT").then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_first_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let malformed = dir.path().join("mhdash.toml");
        std::fs::write(
            &malformed,
            "[data]\nmetrics_path = \"/srv/real.csv\"\n[server]\nport = \"eighty\"\n",
        )
        .unwrap();

        let err = Config::load_first(&[missing, malformed.clone()]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, malformed),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_first_picks_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[data]\nmetrics_path = \"/srv/real.csv\"\n").unwrap();
        std::fs::write(&second, "[server]\nport = \"eighty\"\n").unwrap();

        let config = Config::load_first(&[dir.path().join("absent.toml"), first, second]).unwrap();
        assert_eq!(config.data.metrics_path, PathBuf::from("/srv/real.csv"));
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(
            LoggingConfig::default().default_directive(),
            "mhdash=info,tower_http=debug"
        );
    }
}
