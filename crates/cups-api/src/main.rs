//! # HashiCups Storefront
//!
//! Demo coffee shop that protects card numbers with Vault.
//!
//! ## Usage
//!
//! ```bash
//! # Point at the Vault agent and the database
//! export VAULT_ADDR=http://127.0.0.1:8100
//! export DB_HOST=localhost
//!
//! # Run the server
//! hashicups-web
//! ```

use cups_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());
    info!("Secrets service: {}", state.secrets.service_name());

    let app = routes::create_router(state);

    info!("☕ HashiCups starting on http://{}", addr);

    if !is_prod {
        info!("Menu: http://{}/", addr);
        info!("Transactions: http://{}/alldata", addr);
        info!("Health: http://{}/healthcheck", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn print_banner() {
    println!(
        r#"
  ☕ HashiCups ☕
  ━━━━━━━━━━━━━━━━━━━━━━━
  Vault-protected storefront
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
