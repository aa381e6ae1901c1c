use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use neovideo_providers::HttpClientOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 8080,
        }
    }
}

/// Database settings. An empty `url` runs the server on in-memory stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Home aggregate cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of the registry snapshot and of the rendered aggregate
    pub ttl_seconds: u64,
    /// Interval of the background expiry sweep
    pub cleanup_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 42,
            cleanup_interval_seconds: 60,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

/// Outbound HTTP settings for CMS backends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        let defaults = HttpClientOptions::default();
        Self {
            timeout_seconds: defaults.timeout.as_secs(),
            connect_timeout_seconds: defaults.connect_timeout.as_secs(),
            user_agent: defaults.user_agent,
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn http_client_options(&self) -> HttpClientOptions {
        HttpClientOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
            ..HttpClientOptions::default()
        }
    }
}

impl Config {
    /// Load configuration from an optional file, overridden by environment
    /// variables (`NEOVIDEO_SERVER__HTTP_PORT`, ...).
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("NEOVIDEO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Whether sources and parse-proxy records live in Postgres.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        !self.database.url.trim().is_empty()
    }

    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.http_port)
    }

    /// Check the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.http_port == 0 {
            errors.push("server.http_port must be greater than 0".to_string());
        }

        if self.uses_database() {
            if self.database.max_connections == 0 {
                errors.push("database.max_connections must be greater than 0".to_string());
            }
            if self.database.min_connections > self.database.max_connections {
                errors.push(format!(
                    "database.min_connections ({}) exceeds database.max_connections ({})",
                    self.database.min_connections, self.database.max_connections
                ));
            }
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            ));
        }

        if self.cache.ttl_seconds == 0 {
            errors.push("cache.ttl_seconds must be greater than 0".to_string());
        }
        if self.cache.cleanup_interval_seconds == 0 {
            errors.push("cache.cleanup_interval_seconds must be greater than 0".to_string());
        }

        if self.upstream.timeout_seconds == 0 {
            errors.push("upstream.timeout_seconds must be greater than 0".to_string());
        }
        if self.upstream.connect_timeout_seconds > self.upstream.timeout_seconds {
            errors.push(
                "upstream.connect_timeout_seconds must not exceed upstream.timeout_seconds"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
