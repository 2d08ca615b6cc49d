//! # Payment & Transaction Types
//!
//! A `PaymentSubmission` lives for a single request. Once the secrets service
//! has produced its `ProtectedCard`, the two are folded into a
//! `NewTransaction`, which only ever holds the last four digits of the card.

use crate::error::CupsResult;
use serde::{Deserialize, Serialize};

/// Number of ciphertext characters shown on the result page
pub const CIPHERTEXT_PREVIEW_LEN: usize = 25;

/// Shown in place of a value the secrets service could not produce
pub const UNAVAILABLE: &str = "Error";

/// Raw payment form, exactly as posted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaymentSubmission {
    #[serde(default)]
    pub name: String,
    /// Card number as typed, possibly with spaces
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub cvv: String,
    /// "MM/YY"
    #[serde(default)]
    pub expiry: String,
}

impl PaymentSubmission {
    /// Card number with all spaces removed
    pub fn card_number(&self) -> String {
        self.number.replace(' ', "")
    }
}

/// Last four characters of a card number (or all of it, if shorter)
pub fn last_four(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// Group a token into dash-separated blocks of four for display
pub fn group_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Results of the three secrets-service calls for one card.
///
/// Each field fails independently.
#[derive(Debug)]
pub struct ProtectedCard {
    pub ciphertext: CupsResult<String>,
    pub token: CupsResult<String>,
    pub masked: CupsResult<String>,
}

impl ProtectedCard {
    /// Ciphertext shortened for display, or the unavailable sentinel
    pub fn ciphertext_preview(&self) -> String {
        match &self.ciphertext {
            Ok(ciphertext) => {
                let preview: String = ciphertext.chars().take(CIPHERTEXT_PREVIEW_LEN).collect();
                format!("{}...", preview)
            }
            Err(_) => UNAVAILABLE.to_string(),
        }
    }

    /// Token grouped for display, or the unavailable sentinel
    pub fn token_display(&self) -> String {
        match &self.token {
            Ok(token) => group_token(token),
            Err(_) => UNAVAILABLE.to_string(),
        }
    }

    /// Masked value, or the unavailable sentinel
    pub fn masked_display(&self) -> String {
        match &self.masked {
            Ok(masked) => masked.clone(),
            Err(_) => UNAVAILABLE.to_string(),
        }
    }

    /// User-facing reasons for every field that failed
    pub fn failures(&self) -> Vec<(&'static str, String)> {
        [
            ("Encryption", &self.ciphertext),
            ("Tokenization", &self.token),
            ("Masking", &self.masked),
        ]
        .into_iter()
        .filter_map(|(label, result)| {
            result
                .as_ref()
                .err()
                .map(|e| (label, e.user_message()))
        })
        .collect()
    }
}

/// Row to insert into `transactions`.
///
/// Built only through [`NewTransaction::new`], so the full card number
/// cannot reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    name: String,
    card_last_four: String,
    card_number_transit: Option<String>,
    card_number_fpe: Option<String>,
    card_number_masked: Option<String>,
}

impl NewTransaction {
    /// Failed fields are stored as NULL.
    pub fn new(name: impl Into<String>, card_number: &str, protected: &ProtectedCard) -> Self {
        Self {
            name: name.into(),
            card_last_four: last_four(card_number),
            card_number_transit: protected.ciphertext.as_ref().ok().cloned(),
            card_number_fpe: protected.token.as_ref().ok().cloned(),
            card_number_masked: protected.masked.as_ref().ok().cloned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn card_last_four(&self) -> &str {
        &self.card_last_four
    }

    pub fn card_number_transit(&self) -> Option<&str> {
        self.card_number_transit.as_deref()
    }

    pub fn card_number_fpe(&self) -> Option<&str> {
        self.card_number_fpe.as_deref()
    }

    pub fn card_number_masked(&self) -> Option<&str> {
        self.card_number_masked.as_deref()
    }
}

/// A stored row of `transactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    /// Nullable in rows written outside this service
    pub name: Option<String>,
    /// Last four digits only
    pub card_number: Option<String>,
    pub card_number_transit: Option<String>,
    pub card_number_fpe: Option<String>,
    pub card_number_masked: Option<String>,
}

impl TransactionRecord {
    /// Column order of the listing query
    pub const COLUMNS: [&'static str; 6] = [
        "id",
        "name",
        "card_number",
        "card_number_transit",
        "card_number_fpe",
        "card_number_masked",
    ];

    /// Cell values in `COLUMNS` order; NULLs render as "None"
    pub fn cells(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "None".to_string());
        vec![
            self.id.to_string(),
            opt(&self.name),
            opt(&self.card_number),
            opt(&self.card_number_transit),
            opt(&self.card_number_fpe),
            opt(&self.card_number_masked),
        ]
    }
}

/// Rows plus the column names reported by the database
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionListing {
    pub columns: Vec<String>,
    pub rows: Vec<TransactionRecord>,
}

impl TransactionListing {
    /// Listing with the default column names
    pub fn new(rows: Vec<TransactionRecord>) -> Self {
        Self {
            columns: TransactionRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CupsError;

    fn protected_ok() -> ProtectedCard {
        ProtectedCard {
            ciphertext: Ok("vault:v1:8SDd3WHDOjf7mq69CyCqYjBXAiQQAVZRkFM13ok481zoCmHnSeDX9vyf7w==".into()),
            token: Ok("5555666677778888".into()),
            masked: Ok("################".into()),
        }
    }

    fn protected_failed() -> ProtectedCard {
        ProtectedCard {
            ciphertext: Err(CupsError::NetworkError("connection refused".into())),
            token: Err(CupsError::NetworkError("connection refused".into())),
            masked: Err(CupsError::SecretsService {
                operation: "mask".into(),
                status: 403,
                body: "permission denied".into(),
            }),
        }
    }

    #[test]
    fn test_card_number_strips_spaces() {
        let submission = PaymentSubmission {
            number: "4111 1111 1111 1111".into(),
            ..Default::default()
        };
        assert_eq!(submission.card_number(), "4111111111111111");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("4111111111111234"), "1234");
        assert_eq!(last_four("12"), "12");
        assert_eq!(last_four(""), "");
    }

    #[test]
    fn test_group_token() {
        assert_eq!(group_token("5555666677778888"), "5555-6666-7777-8888");
        assert_eq!(group_token("123456"), "1234-56");
        assert_eq!(group_token(""), "");
    }

    #[test]
    fn test_new_transaction_keeps_only_last_four() {
        let card = "4111111111111111";
        let tx = NewTransaction::new("Alice", card, &protected_ok());

        assert_eq!(tx.card_last_four(), "1111");
        assert_eq!(tx.card_number_fpe(), Some("5555666677778888"));
        let serialized = format!("{:?}", tx);
        assert!(!serialized.contains(card));
    }

    #[test]
    fn test_new_transaction_with_failed_fields() {
        let tx = NewTransaction::new("Bob", "4111111111111111", &protected_failed());
        assert_eq!(tx.card_number_transit(), None);
        assert_eq!(tx.card_number_fpe(), None);
        assert_eq!(tx.card_number_masked(), None);
    }

    #[test]
    fn test_display_values() {
        let protected = protected_ok();
        assert_eq!(protected.ciphertext_preview(), "vault:v1:8SDd3WHDOjf7mq69...");
        assert_eq!(protected.token_display(), "5555-6666-7777-8888");
        assert_eq!(protected.masked_display(), "################");
        assert!(protected.failures().is_empty());
    }

    #[test]
    fn test_display_sentinels_are_independent() {
        let mut protected = protected_failed();
        protected.masked = Ok("************1111".into());

        assert_eq!(protected.ciphertext_preview(), UNAVAILABLE);
        assert_eq!(protected.token_display(), UNAVAILABLE);
        assert_eq!(protected.masked_display(), "************1111");

        let failures = protected.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, "Encryption");
        assert_eq!(failures[1].0, "Tokenization");
    }

    #[test]
    fn test_record_cells() {
        let record = TransactionRecord {
            id: 7,
            name: Some("Alice".into()),
            card_number: Some("1111".into()),
            card_number_transit: None,
            card_number_fpe: Some("5555666677778888".into()),
            card_number_masked: None,
        };
        let cells = record.cells();
        assert_eq!(cells.len(), TransactionRecord::COLUMNS.len());
        assert_eq!(cells[0], "7");
        assert_eq!(cells[3], "None");
    }

    #[test]
    fn test_record_cells_with_null_name_and_card() {
        let record = TransactionRecord {
            id: 8,
            name: None,
            card_number: None,
            card_number_transit: Some("vault:v1:abc".into()),
            card_number_fpe: None,
            card_number_masked: None,
        };
        let cells = record.cells();
        assert_eq!(cells[1], "None");
        assert_eq!(cells[2], "None");
        assert_eq!(cells[3], "vault:v1:abc");
    }
}
