//! Configuration management for the book catalog server

use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Environment variables the store connection cannot start without
pub const MONGODB_URL_VAR: &str = "mongodb_url";
pub const DATABASE_NAME_VAR: &str = "database_name";
pub const COLLECTION_NAME_VAR: &str = "collection_name";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub collection: String,
    /// Connection establishment timeout, in milliseconds
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix BOOKS__, e.g. BOOKS__SERVER__PORT
            .add_source(
                Environment::with_prefix("BOOKS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var(MONGODB_URL_VAR).ok())?
            .set_override_option("database.name", env::var(DATABASE_NAME_VAR).ok())?
            .set_override_option("database.collection", env::var(COLLECTION_NAME_VAR).ok())?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.database.ensure_complete()?;
        Ok(config)
    }
}

impl DatabaseConfig {
    /// Fails with `MissingEnvVariable` naming the first unset connection setting
    pub fn ensure_complete(&self) -> AppResult<()> {
        let required = [
            (MONGODB_URL_VAR, &self.url),
            (DATABASE_NAME_VAR, &self.name),
            (COLLECTION_NAME_VAR, &self.collection),
        ];

        for (var, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::missing_env_variable(var));
            }
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: String::new(),
            collection: String::new(),
            connect_timeout_ms: 2000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
