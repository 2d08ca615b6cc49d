//! # cups-core
//!
//! Core types and traits for the HashiCups storefront.
//!
//! This crate provides:
//! - `Product` and `ProductCatalog` for the read-only coffee menu
//! - `PaymentSubmission`, `ProtectedCard`, `NewTransaction` and
//!   `TransactionRecord` for the payment flow
//! - Pure card-field validation (`validate_cvv`, `validate_expiry`)
//! - `SecretsService`, `CredentialProvider` and `TransactionStore` traits
//! - `CupsError` / `ValidationError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cups_core::{protect_card, validate_submission, NewTransaction};
//!
//! validate_submission(&submission, today)?;
//! let card = submission.card_number();
//! let protected = protect_card(secrets.as_ref(), &card).await;
//! store.save(&NewTransaction::new(&submission.name, &card, &protected)).await?;
//! ```

pub mod credentials;
pub mod error;
pub mod product;
pub mod service;
pub mod transaction;
pub mod validation;

// Re-exports for convenience
pub use credentials::{AgentSecrets, DbCredentials};
pub use error::{CupsError, CupsResult, ValidationError};
pub use product::{Product, ProductCatalog};
pub use service::{
    protect_card, CredentialProvider, SecretsService, SharedCredentialProvider,
    SharedSecretsService, SharedTransactionStore, TransactionStore,
};
pub use transaction::{
    group_token, last_four, NewTransaction, PaymentSubmission, ProtectedCard, TransactionListing,
    TransactionRecord, UNAVAILABLE,
};
pub use validation::{validate_cvv, validate_expiry, validate_expiry_at, validate_submission};
