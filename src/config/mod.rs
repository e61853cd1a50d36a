//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (named by
//! `RELATORIOS_CONFIG`) followed by a handful of environment overrides.
//! Every field has a default, so an empty file or no file at all yields a
//! working local setup.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! database:
//!   path: /var/lib/relatorios/relatorios.db
//! logging:
//!   filter: info
//! ```

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names a YAML config file to load.
pub const CONFIG_ENV: &str = "RELATORIOS_CONFIG";
/// Overrides `server.host`.
pub const HOST_ENV: &str = "RELATORIOS_HOST";
/// Overrides `server.port`.
pub const PORT_ENV: &str = "RELATORIOS_PORT";
/// Overrides `database.path`.
pub const DB_PATH_ENV: &str = "RELATORIOS_DB_PATH";

/// Database path that selects an in-process SQLite database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Also serve the `/api/relatorios/{get,post,put,delete}` paths
    pub legacy_routes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            legacy_routes: true,
        }
    }
}

impl ServerConfig {
    /// Address to bind, as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file, relative to the working directory unless absolute
    pub path: String,

    /// Pool size; 1 keeps a single process-wide connection
    pub max_connections: u32,

    /// How long a statement waits on a locked database
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "relatorios.db".to_string(),
            max_connections: 1,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for an isolated in-memory database
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            ..Self::default()
        }
    }

    /// Create a configuration for a database file
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Resolve the database file against the current working directory
    pub fn resolved_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.path);
        if path.is_absolute() || self.is_in_memory() {
            return path;
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,relatorios=debug,tower_http=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration the way the binary does
    ///
    /// Reads the file named by `RELATORIOS_CONFIG` if set, then applies the
    /// host, port, and database path overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable environment lookup
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Env {
                var: PORT_ENV,
                message: format!("{}: {}", port, e),
            })?;
        }
        if let Some(path) = lookup(DB_PATH_ENV) {
            self.database.path = path;
        }
        Ok(())
    }

    /// Reject values that cannot produce a working server
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                message: "must be non-zero".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "database.path",
                message: "must not be empty".to_string(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                field: "database.max_connections",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
