//! # cups-store
//!
//! Persistence for the HashiCups storefront.
//!
//! - `FileCredentialProvider` reads Vault-agent-rendered database logins
//! - `PgTransactionStore` saves and lists redacted transactions in
//!   PostgreSQL, connecting fresh for every call

pub mod config;
pub mod credentials;
pub mod postgres;

pub use config::DbConfig;
pub use credentials::{FileCredentialProvider, StaticCredentialProvider, DEFAULT_CREDENTIALS_FILE};
pub use postgres::PgTransactionStore;
