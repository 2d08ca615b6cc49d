//! Database connection settings (everything except the login).

use crate::credentials::DEFAULT_CREDENTIALS_FILE;
use cups_core::CupsError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Agent-rendered credentials file
    pub credentials_file: PathBuf,
    pub connect_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl DbConfig {
    /// Load from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_CREDENTIALS_FILE`
    /// and `DB_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CupsError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port = match env::var("DB_PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                CupsError::Configuration(format!("DB_PORT must be a port number, got {}", raw))
            })?,
            Err(_) => defaults.port,
        };

        let connect_timeout = match env::var("DB_CONNECT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    CupsError::Configuration(format!(
                        "DB_CONNECT_TIMEOUT_SECS must be a positive integer, got {}",
                        raw
                    ))
                })?,
            Err(_) => defaults.connect_timeout,
        };

        Ok(Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            port,
            database: env::var("DB_NAME").unwrap_or(defaults.database),
            credentials_file: env::var("DB_CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_file),
            connect_timeout,
        })
    }
}
