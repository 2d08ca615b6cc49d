//! # Vault Configuration
//!
//! Where the secrets service lives and which keys, roles and
//! transformations the storefront uses. Loaded from environment variables.

use cups_core::CupsError;
use std::env;
use std::time::Duration;

pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8100";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A transform role plus the transformation applied under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformTarget {
    pub role: String,
    pub transformation: String,
}

impl TransformTarget {
    pub fn new(role: impl Into<String>, transformation: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            transformation: transformation.into(),
        }
    }
}

/// Vault API configuration
#[derive(Clone)]
pub struct VaultConfig {
    /// Base address, usually the local agent listener
    pub addr: String,

    /// Optional token; the agent proxy injects its own when unset
    pub token: Option<String>,

    /// Transit key used for encryption
    pub transit_key: String,

    /// FPE tokenization
    pub tokenize: TransformTarget,

    /// Masking
    pub mask: TransformTarget,

    /// Per-request timeout
    pub timeout: Duration,
}

impl VaultConfig {
    /// Config with the storefront's standard key names
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into().trim_end_matches('/').to_string(),
            token: None,
            transit_key: "card-encrypt".to_string(),
            tokenize: TransformTarget::new("payments", "card-number"),
            mask: TransformTarget::new("custsupport", "masked-card-number"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `VAULT_ADDR` (default `http://127.0.0.1:8100`)
    /// - `VAULT_TOKEN` (optional)
    /// - `VAULT_TIMEOUT_SECS` (default 10)
    pub fn from_env() -> Result<Self, CupsError> {
        dotenvy::dotenv().ok();

        let addr = env::var("VAULT_ADDR").unwrap_or_else(|_| DEFAULT_VAULT_ADDR.to_string());
        if !addr.starts_with("http://") && !addr.starts_with("https://") {
            return Err(CupsError::Configuration(format!(
                "VAULT_ADDR must start with http:// or https://, got {}",
                addr
            )));
        }

        let timeout_secs = match env::var("VAULT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                CupsError::Configuration(format!(
                    "VAULT_TIMEOUT_SECS must be a positive integer, got {}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(addr).with_timeout(Duration::from_secs(timeout_secs));
        if let Ok(token) = env::var("VAULT_TOKEN") {
            if !token.is_empty() {
                config = config.with_token(token);
            }
        }
        Ok(config)
    }

    /// Builder: set token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn encrypt_url(&self) -> String {
        format!("{}/v1/transit/encrypt/{}", self.addr, self.transit_key)
    }

    pub fn encode_url(&self, target: &TransformTarget) -> String {
        format!("{}/v1/transform/encode/{}", self.addr, target.role)
    }
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field("addr", &self.addr)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("transit_key", &self.transit_key)
            .field("tokenize", &self.tokenize)
            .field("mask", &self.mask)
            .field("timeout", &self.timeout)
            .finish()
    }
}
