//! # Service Traits
//!
//! The seams between the web layer and the outside world.
//!
//! ```text
//!  submit ──► validate ──► SecretsService ──► TransactionStore
//!                          (encrypt,          (save / list)
//!                           tokenize,              │
//!                           mask)                  ▼
//!                                          CredentialProvider
//! ```
//!
//! Production implementations live in `cups-vault` and `cups-store`;
//! tests swap in in-memory fakes.

use crate::credentials::DbCredentials;
use crate::error::CupsResult;
use crate::transaction::{NewTransaction, ProtectedCard, TransactionListing};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Encryption, tokenization and masking delegated to an external service.
///
/// Every call is independent and is attempted exactly once.
#[async_trait]
pub trait SecretsService: Send + Sync {
    /// Transit-encrypt a card number, returning versioned ciphertext.
    async fn encrypt(&self, card_number: &str) -> CupsResult<String>;

    /// Format-preserving tokenization of a card number.
    async fn tokenize(&self, card_number: &str) -> CupsResult<String>;

    /// Display-safe masking of a card number.
    async fn mask(&self, card_number: &str) -> CupsResult<String>;

    /// Name used in logs.
    fn service_name(&self) -> &'static str;
}

/// Source of database credentials.
///
/// Implementations must not cache: credentials rotate out-of-band.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self) -> CupsResult<DbCredentials>;
}

/// Persistence for redacted transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert one transaction.
    async fn save(&self, transaction: &NewTransaction) -> CupsResult<()>;

    /// All transactions, highest id first.
    async fn list(&self) -> CupsResult<TransactionListing>;
}

pub type SharedSecretsService = Arc<dyn SecretsService>;
pub type SharedCredentialProvider = Arc<dyn CredentialProvider>;
pub type SharedTransactionStore = Arc<dyn TransactionStore>;

/// Run encrypt, tokenize and mask in sequence.
///
/// A failure in one call is logged and recorded in its own field; the other
/// calls still run.
pub async fn protect_card(service: &dyn SecretsService, card_number: &str) -> ProtectedCard {
    let ciphertext = service.encrypt(card_number).await;
    if let Err(e) = &ciphertext {
        warn!(service = service.service_name(), error = %e, "encryption failed");
    }

    let token = service.tokenize(card_number).await;
    if let Err(e) = &token {
        warn!(service = service.service_name(), error = %e, "tokenization failed");
    }

    let masked = service.mask(card_number).await;
    if let Err(e) = &masked {
        warn!(service = service.service_name(), error = %e, "masking failed");
    }

    ProtectedCard {
        ciphertext,
        token,
        masked,
    }
}
