//! # Request Handlers
//!
//! Axum request handlers for the storefront. Every failure is turned into a
//! rendered page or status here; nothing propagates past a handler.

use crate::state::AppState;
use crate::views::{self, PaymentReceipt};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use chrono::Local;
use cups_core::{protect_card, validate_submission, NewTransaction, PaymentSubmission};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

/// Product chosen on the menu
#[derive(Debug, Deserialize)]
pub struct BuyForm {
    #[serde(default)]
    pub product: String,
}

/// Health check endpoint; independent of Vault and the database
pub async fn healthcheck() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339()
    }))
}

/// Product menu
pub async fn index(State(state): State<AppState>) -> Html<String> {
    views::index(&state.catalog)
}

/// Payment form for the chosen product
#[instrument(skip(state, form), fields(product = %form.product))]
pub async fn buy(State(state): State<AppState>, Form(form): Form<BuyForm>) -> Html<String> {
    if state.catalog.get(&form.product).is_none() {
        warn!("payment form requested for unknown product");
    }
    views::payment_form(&form.product)
}

/// Validate, protect and record a payment
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Form(submission): Form<PaymentSubmission>,
) -> Response {
    let today = Local::now().date_naive();
    if let Err(e) = validate_submission(&submission, today) {
        info!(reason = %e, "payment rejected");
        return (StatusCode::BAD_REQUEST, views::payment_error(&e.to_string())).into_response();
    }

    let card_number = submission.card_number();
    let protected = protect_card(state.secrets.as_ref(), &card_number).await;
    let transaction = NewTransaction::new(&submission.name, &card_number, &protected);

    let saved = state.store.save(&transaction).await.map_err(|e| {
        error!(error = %e, "failed to record transaction");
        e.user_message()
    });

    info!(
        saved = saved.is_ok(),
        failed_calls = protected.failures().len(),
        "payment processed"
    );

    let receipt = PaymentReceipt {
        saved,
        name: submission.name.clone(),
        last_four: transaction.card_last_four().to_string(),
        encrypted: protected.ciphertext_preview(),
        tokenized: protected.token_display(),
        masked: protected.masked_display(),
        failures: protected.failures(),
    };
    views::payment_result(&receipt).into_response()
}

/// All stored transactions, newest first
#[instrument(skip(state))]
pub async fn all_data(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(listing) => {
            info!(rows = listing.rows.len(), "listed transactions");
            views::all_data(&listing).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list transactions");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, e.user_message()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthcheck_body() {
        let response = healthcheck().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
