//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - GET  /            - Product menu
/// - POST /buy         - Payment form for a product
/// - POST /submit      - Process a payment
/// - GET  /alldata     - Stored transactions
/// - GET  /healthcheck - Health check
/// - GET  /static/*    - Product images
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/buy", post(handlers::buy))
        .route("/submit", post(handlers::submit))
        .route("/alldata", get(handlers::all_data))
        .route("/healthcheck", get(handlers::healthcheck))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
