use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::db::{ConnectionSettings, PoolSettings};

/// Configuration for the data-access layer
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database driver name
    #[serde(default = "default_driver")]
    pub database_driver: String,

    /// Database connection URL
    pub database_url: String,

    /// Overrides the user in the URL when set
    pub database_username: Option<String>,

    /// Overrides the password in the URL when set
    pub database_password: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_max_idle")]
    pub database_max_idle: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub database_acquire_timeout_secs: u64,
}

fn default_driver() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> u32 {
    PoolSettings::default().max_total
}

fn default_max_idle() -> u32 {
    PoolSettings::default().max_idle
}

fn default_acquire_timeout_secs() -> u64 {
    PoolSettings::default().acquire_timeout.as_secs()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Settings handed to `Database::configure`
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            driver: self.database_driver.clone(),
            url: self.database_url.clone(),
            username: self.database_username.clone(),
            password: self.database_password.clone(),
            pool: PoolSettings {
                max_total: self.database_max_connections,
                max_idle: self.database_max_idle,
                acquire_timeout: Duration::from_secs(self.database_acquire_timeout_secs),
                ..PoolSettings::default()
            },
        }
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    Ok(config)
}
