//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Mirror records to `<data_dir>/records.json`
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("weatherlog").to_string_lossy().to_string())
        .unwrap_or_else(|| "./weatherlog_data".to_string())
}

fn default_persist() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            persist: default_persist(),
        }
    }
}

impl StorageConfig {
    /// Convert to the store's runtime configuration
    pub fn to_store_config(&self) -> crate::storage::StorageConfig {
        if self.persist {
            crate::storage::StorageConfig::new(&self.data_dir)
        } else {
            crate::storage::StorageConfig::default()
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Convert to the API server's runtime configuration
    pub fn to_server_config(&self) -> crate::api::ApiConfig {
        crate::api::ApiConfig {
            host: self.host.clone(),
            port: self.port,
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("weatherlog").join("config.toml")),
            Some(PathBuf::from("/etc/weatherlog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = lookup("WEATHERLOG_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(persist) = lookup("WEATHERLOG_PERSIST") {
            self.storage.persist = parse_flag(&persist);
        }

        // API overrides
        if let Some(host) = lookup("WEATHERLOG_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("WEATHERLOG_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid WEATHERLOG_API_PORT: {}", port),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("WEATHERLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WEATHERLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn parse_flag(s: &str) -> bool {
    let s = s.trim().to_lowercase();
    s != "false" && s != "0" && s != "no"
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Weatherlog Configuration
#
# Environment variables override these settings:
# - WEATHERLOG_DATA_DIR
# - WEATHERLOG_PERSIST
# - WEATHERLOG_API_HOST
# - WEATHERLOG_API_PORT
# - WEATHERLOG_LOG_LEVEL
# - WEATHERLOG_LOG_FORMAT

[storage]
# Directory holding records.json
data_dir = "./weatherlog_data"

# Mirror records to disk; false keeps them in memory only
persist = true

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

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
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.storage.persist);
        assert_eq!(config.storage.data_dir, "./weatherlog_data");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[api\nport = ").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WEATHERLOG_DATA_DIR", "/tmp/wx"),
            ("WEATHERLOG_PERSIST", "false"),
            ("WEATHERLOG_API_PORT", "9090"),
            ("WEATHERLOG_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, "/tmp/wx");
        assert!(!config.storage.persist);
        assert_eq!(config.api.port, 9090);
        assert!(config.logging.is_json());
        assert!(config.storage.to_store_config().snapshot_path().is_none());
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "WEATHERLOG_API_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn test_to_server_config() {
        let config = Config::parse("[api]\nhost = \"127.0.0.1\"\nrequest_timeout_secs = 5\n").unwrap();
        let server = config.api.to_server_config();
        assert_eq!(server.addr(), "127.0.0.1:8080");
        assert_eq!(server.request_timeout_ms, 5000);
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let mut config = Config::default();
        config.api.request_timeout_secs = u64::MAX;
        assert_eq!(config.api.to_server_config().request_timeout_ms, u64::MAX);
    }
}
