//! # cups-vault
//!
//! Vault integration for the HashiCups storefront.
//!
//! Three operations, each a single POST against the Vault API:
//!
//! | Operation | Endpoint | Returns |
//! |-----------|----------|---------|
//! | encrypt | `/v1/transit/encrypt/card-encrypt` | `data.ciphertext` |
//! | tokenize | `/v1/transform/encode/payments` | `data.encoded_value` |
//! | mask | `/v1/transform/encode/custsupport` | `data.encoded_value` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cups_vault::VaultClient;
//! use cups_core::SecretsService;
//!
//! let vault = VaultClient::from_env()?;
//! let ciphertext = vault.encrypt("4111111111111111").await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::VaultClient;
pub use config::{TransformTarget, VaultConfig, DEFAULT_VAULT_ADDR};
