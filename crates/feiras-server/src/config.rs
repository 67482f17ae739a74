//! Configuration management

use feiras_common::types::Environment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::config::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_DELIMITER, DEFAULT_IMPORT_WORKERS};
use crate::ingest::ImportConfig;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 1;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default page size when a list request does not ask for one.
pub const DEFAULT_PAGINATION_LIMIT: i64 = 10;

/// Largest page size a list request may ask for.
pub const DEFAULT_PAGINATION_MAX_LIMIT: i64 = 100;

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid ENVIRONMENT '{0}', expected 'development' or 'production'")]
    InvalidEnvironment(String),

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Server port must be greater than 0")]
    InvalidPort,

    #[error("DATABASE_URL is required")]
    MissingDatabaseUrl,

    #[error("Database max_connections must be greater than 0")]
    InvalidMaxConnections,

    #[error("Database min_connections ({min}) cannot be greater than max_connections ({max})")]
    MinConnectionsAboveMax { min: u32, max: u32 },

    #[error("Pagination default limit must be greater than 0")]
    InvalidDefaultLimit,

    #[error("Pagination max limit must be greater than 0")]
    InvalidMaxLimit,

    #[error("Pagination max limit ({max}) cannot be lower than the default limit ({default})")]
    MaxLimitBelowDefault { default: i64, max: i64 },

    #[error("Import workers must be greater than 0")]
    InvalidImportWorkers,

    #[error("Import channel capacity must be greater than 0")]
    InvalidChannelCapacity,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub import: ImportConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

/// List endpoint page size bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from `.env`, the process environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load and validate configuration from the process environment and defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::read_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read the process environment without validating, so callers can
    /// apply overrides (such as command-line flags) first
    pub fn read_env() -> Result<Self, ConfigError> {
        let environment = match std::env::var("ENVIRONMENT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidEnvironment(value))?,
            Err(_) => Environment::default(),
        };

        let config = Config {
            environment,
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT", DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL").unwrap_or_default(),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
            },
            pagination: PaginationConfig {
                default_limit: env_or("PAGINATION_DEFAULT_LIMIT", DEFAULT_PAGINATION_LIMIT),
                max_limit: env_or("PAGINATION_MAX_LIMIT", DEFAULT_PAGINATION_MAX_LIMIT),
            },
            import: ImportConfig {
                workers: env_or("IMPORT_WORKERS", DEFAULT_IMPORT_WORKERS),
                channel_capacity: env_or("IMPORT_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY),
                delimiter: DEFAULT_DELIMITER,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections);
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::MinConnectionsAboveMax {
                min: self.database.min_connections,
                max: self.database.max_connections,
            });
        }

        if self.pagination.default_limit <= 0 {
            return Err(ConfigError::InvalidDefaultLimit);
        }
        if self.pagination.max_limit <= 0 {
            return Err(ConfigError::InvalidMaxLimit);
        }
        if self.pagination.max_limit < self.pagination.default_limit {
            return Err(ConfigError::MaxLimitBelowDefault {
                default: self.pagination.default_limit,
                max: self.pagination.max_limit,
            });
        }

        if self.import.workers == 0 {
            return Err(ConfigError::InvalidImportWorkers);
        }
        if self.import.channel_capacity == 0 {
            return Err(ConfigError::InvalidChannelCapacity);
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            pagination: PaginationConfig {
                default_limit: DEFAULT_PAGINATION_LIMIT,
                max_limit: DEFAULT_PAGINATION_MAX_LIMIT,
            },
            import: ImportConfig::default(),
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "ENVIRONMENT",
        "HOST",
        "PORT",
        "SHUTDOWN_TIMEOUT",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_MIN_CONNECTIONS",
        "DATABASE_CONNECT_TIMEOUT",
        "PAGINATION_DEFAULT_LIMIT",
        "PAGINATION_MAX_LIMIT",
        "IMPORT_WORKERS",
        "IMPORT_CHANNEL_CAPACITY",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn valid() -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/feiras".to_string(),
                ..Config::default().database
            },
            ..Config::default()
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/feiras");

        let config = Config::from_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.max_limit, 100);
        assert_eq!(config.import.workers, 8);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://db/feiras");
        std::env::set_var("ENVIRONMENT", "production");
        std::env::set_var("PORT", "9000");
        std::env::set_var("PAGINATION_DEFAULT_LIMIT", "25");
        std::env::set_var("PAGINATION_MAX_LIMIT", "50");
        std::env::set_var("IMPORT_WORKERS", "3");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test");

        let config = Config::from_env().unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.pagination.default_limit, 25);
        assert_eq!(config.pagination.max_limit, 50);
        assert_eq!(config.import.workers, 3);
        assert_eq!(config.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_database_url() {
        clear_env();
        assert_eq!(Config::from_env().unwrap_err(), ConfigError::MissingDatabaseUrl);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_environment() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/feiras");
        std::env::set_var("ENVIRONMENT", "staging");

        assert_eq!(
            Config::from_env().unwrap_err(),
            ConfigError::InvalidEnvironment("staging".to_string())
        );

        clear_env();
    }

    #[test]
    fn test_validate_accepts_defaults_with_url() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_server() {
        let mut config = valid();
        config.server.host = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyHost));

        let mut config = valid();
        config.server.port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }

    #[test]
    fn test_validate_database() {
        assert_eq!(Config::default().validate(), Err(ConfigError::MissingDatabaseUrl));

        let mut config = valid();
        config.database.max_connections = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxConnections));

        let mut config = valid();
        config.database.min_connections = 20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinConnectionsAboveMax { min: 20, max: 10 })
        );
    }

    #[test]
    fn test_validate_pagination() {
        let mut config = valid();
        config.pagination.default_limit = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDefaultLimit));

        let mut config = valid();
        config.pagination.max_limit = -1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxLimit));

        let mut config = valid();
        config.pagination.default_limit = 50;
        config.pagination.max_limit = 20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxLimitBelowDefault {
                default: 50,
                max: 20
            })
        );
    }

    #[test]
    fn test_validate_import() {
        let mut config = valid();
        config.import.workers = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidImportWorkers));

        let mut config = valid();
        config.import.channel_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidChannelCapacity));
    }
}
