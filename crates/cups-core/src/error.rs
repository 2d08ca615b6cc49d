//! # Storefront Error Types
//!
//! Typed error handling for the HashiCups storefront.
//! Validation failures are kept apart from infrastructure failures so the
//! payment page can tell the customer exactly what went wrong.

use thiserror::Error;

/// Rejection reasons for a payment form.
///
/// The `Display` text is shown to the customer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid CVV. Please enter 3 or 4 digits.")]
    InvalidCvv,

    #[error("Invalid expiry month. Please enter a month between 01 and 12.")]
    InvalidExpiryMonth,

    #[error("Card has expired.")]
    CardExpired,

    #[error("Invalid expiry date format. Please use MM/YY.")]
    InvalidExpiryFormat,
}

/// Error type for everything that talks to the outside world
#[derive(Debug, Error)]
pub enum CupsError {
    /// Form data rejected before any side effect
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors (bad address, invalid timeout)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database credentials could not be read from the agent file
    #[error("Database credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    /// Database connection or query failure
    #[error("Database error: {0}")]
    Database(String),

    /// Secrets service answered with a non-success status
    #[error("Secrets service error [{operation}]: HTTP {status}: {body}")]
    SecretsService {
        operation: String,
        status: u16,
        body: String,
    },

    /// Network/HTTP error communicating with the secrets service
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CupsError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CupsError::Validation(_) => 400,
            CupsError::Configuration(_) => 500,
            CupsError::CredentialsUnavailable(_) => 503,
            CupsError::Database(_) => 500,
            CupsError::SecretsService { .. } => 502,
            CupsError::NetworkError(_) => 503,
            CupsError::MalformedResponse(_) => 502,
            CupsError::Internal(_) => 500,
        }
    }

    /// Short message safe to show on a page.
    ///
    /// Never includes response bodies or connection strings.
    pub fn user_message(&self) -> String {
        match self {
            CupsError::Validation(e) => e.to_string(),
            CupsError::Configuration(_) => "Service is misconfigured.".to_string(),
            CupsError::CredentialsUnavailable(_) => {
                "Database credentials are not available yet.".to_string()
            }
            CupsError::Database(_) => "Could not reach the transaction database.".to_string(),
            CupsError::SecretsService { status, .. } => {
                format!("Secrets service rejected the request (HTTP {}).", status)
            }
            CupsError::NetworkError(_) => "Secrets service is unreachable.".to_string(),
            CupsError::MalformedResponse(_) => {
                "Secrets service returned an unexpected response.".to_string()
            }
            CupsError::Internal(_) => "Internal error.".to_string(),
        }
    }
}

/// Result type alias for storefront operations
pub type CupsResult<T> = Result<T, CupsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert!(ValidationError::InvalidCvv.to_string().starts_with("Invalid CVV"));
        assert_eq!(ValidationError::CardExpired.to_string(), "Card has expired.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CupsError::from(ValidationError::InvalidCvv).status_code(), 400);
        assert_eq!(CupsError::Database("refused".into()).status_code(), 500);
        assert_eq!(CupsError::NetworkError("timeout".into()).status_code(), 503);
        assert_eq!(
            CupsError::SecretsService {
                operation: "encrypt".into(),
                status: 403,
                body: "permission denied".into(),
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = CupsError::Database("password authentication failed for user v-token-abc".into());
        assert!(!err.user_message().contains("v-token-abc"));

        let err = CupsError::SecretsService {
            operation: "mask".into(),
            status: 500,
            body: "internal".into(),
        };
        assert!(err.user_message().contains("500"));
        assert!(!err.user_message().contains("internal"));
    }
}
