//! Application configuration module
//!
//! Provides the configuration the server is started with. Values come from the
//! environment (after `.env` is loaded) and go through [`AppConfigBuilder`] so
//! tests can build a config without touching process state.

use thiserror::Error;

/// Port used when `SERVER_PORT` is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Token lifetime used when `JWT_TTL_HOURS` is not set (30 days)
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 30 * 24;

/// Secret used when `JWT_SECRET` is missing. Only suitable for development.
pub const DEV_JWT_SECRET: &str = "taskboard-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server binds to
    pub server_port: u16,
    /// Postgres connection string; `None` runs the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Bearer token lifetime in hours
    pub token_ttl_hours: u64,
    /// Origins allowed by CORS; empty means any origin
    pub cors_origins: Vec<String>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            cors_origins: Vec::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build the configuration from environment variables
    ///
    /// Recognised variables: `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`,
    /// `JWT_TTL_HOURS`, `CORS_ORIGINS` (comma separated), `FRONTEND_URL`
    /// and `RUST_LOG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(port) = std::env::var("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port.clone()))?;
            builder = builder.server_port(port);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(ttl) = std::env::var("JWT_TTL_HOURS") {
            let ttl = ttl
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("JWT_TTL_HOURS", ttl.clone()))?;
            builder = builder.token_ttl_hours(ttl);
        }
        let mut origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_default();
        if let Ok(frontend) = std::env::var("FRONTEND_URL") {
            origins.extend(split_origins(&frontend));
        }
        builder = builder.cors_origins(origins);
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder = builder.log_filter(filter);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_port == 0 {
            return Err(ConfigError::InvalidValue("SERVER_PORT", "0".to_string()));
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue("JWT_TTL_HOURS", "0".to_string()));
        }
        Ok(())
    }

    /// Whether the development fallback secret is in use
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    cors_origins: Vec<String>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the token lifetime
    pub fn token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    /// Set the allowed CORS origins
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Set the log filter directive
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url,
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_hours: self.token_ttl_hours.unwrap_or(defaults.token_ttl_hours),
            cors_origins: self.cors_origins,
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
