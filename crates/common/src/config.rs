//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Media storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Admin gate configuration.
    #[serde(default)]
    pub admin: AdminConfig,
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
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database connection configuration.
///
/// Either a full `url` or the individual connection parameters may be given.
/// A configured `url` wins.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL (`mysql://...` or `postgres://...`).
    #[serde(default)]
    pub url: Option<String>,
    /// URL scheme used when building from parts.
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Database host.
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port.
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name.
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Database user.
    #[serde(default)]
    pub username: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Connection URL for the configured database.
    ///
    /// Credentials are percent-encoded when the URL is built from parts.
    pub fn connection_url(&self) -> AppResult<String> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        let invalid = |what: &str| AppError::Config(format!("invalid database {what}"));

        let mut url = Url::parse(&format!("{}://{}", self.driver, self.host))
            .map_err(|e| AppError::Config(format!("invalid database host: {e}")))?;
        url.set_port(self.port).map_err(|()| invalid("port"))?;
        url.set_path(&format!("/{}", self.name));

        if !self.username.is_empty() {
            url.set_username(&self.username)
                .map_err(|()| invalid("username"))?;
        }
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| invalid("password"))?;
        }

        Ok(url.into())
    }
}

/// Media storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory uploaded files are written to.
    #[serde(default = "default_storage_path")]
    pub base_path: PathBuf,
    /// URL prefix the files are served under.
    #[serde(default = "default_storage_url")]
    pub base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            base_url: default_storage_url(),
        }
    }
}

/// Admin gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Bearer token required for write requests. Writes are open when unset.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_driver() -> String {
    "mysql".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_name() -> String {
    "sekolah_db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./files")
}

fn default_storage_url() -> String {
    "/files".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `SEKOLAH_ENV`)
    /// 4. Environment variables with `SEKOLAH_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("SEKOLAH_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SEKOLAH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("SEKOLAH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
