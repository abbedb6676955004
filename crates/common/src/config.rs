//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Token verification settings.
    pub auth: AuthConfig,
    /// Photo storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Bearer token verification.
///
/// Tokens are HS256 JWTs minted by the campus identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret.
    pub jwt_secret: String,
    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Only emails of this domain may sign in (e.g. `student.uinsgd.ac.id`).
    #[serde(default)]
    pub allowed_email_domain: Option<String>,
}

/// Local photo storage.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded photos are written to.
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    /// URL prefix photos are served from.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

impl StorageConfig {
    /// Route the photo directory is mounted at, without a trailing slash.
    #[must_use]
    pub fn route(&self) -> String {
        format!("/{}", self.base_url.trim_matches('/'))
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let path = self.base_url.trim_matches('/');
        if !self.base_url.starts_with('/') || path.is_empty() {
            return Err(config::ConfigError::Message(format!(
                "storage.base_url must be a path below the root, got {:?}",
                self.base_url
            )));
        }
        if path == "api" || path.starts_with("api/") {
            return Err(config::ConfigError::Message(
                "storage.base_url must not overlap /api".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            base_url: default_storage_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_storage_path() -> String {
    "./files".to_string()
}

fn default_storage_url() -> String {
    "/files".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `LOSTFOUND_ENV`)
    /// 3. Environment variables with `LOSTFOUND__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("LOSTFOUND_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LOSTFOUND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::checked(config.try_deserialize()?)
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LOSTFOUND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::checked(config.try_deserialize()?)
    }

    fn checked(config: Self) -> Result<Self, config::ConfigError> {
        config.storage.validate()?;
        Ok(config)
    }

    /// Socket address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
