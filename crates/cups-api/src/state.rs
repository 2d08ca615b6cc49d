//! # Application State
//!
//! Shared state for the Axum application: the read-only product catalog,
//! the secrets service, the transaction store, and server configuration.

use cups_core::{ProductCatalog, SharedSecretsService, SharedTransactionStore};
use cups_store::PgTransactionStore;
use cups_vault::VaultClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory served under `/static` (product images)
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            environment: "development".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product catalog (never mutated)
    pub catalog: Arc<ProductCatalog>,
    /// Encryption / tokenization / masking
    pub secrets: SharedSecretsService,
    /// Redacted transaction storage
    pub store: SharedTransactionStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState wired to Vault and PostgreSQL
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_product_catalog()?;

        let vault = VaultClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Vault client: {}", e))?;
        tracing::info!("Vault address: {}", vault.config().addr);

        let store = PgTransactionStore::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transaction store: {}", e))?;
        tracing::info!(
            "Database: {}:{}/{} (credentials from {})",
            store.config().host,
            store.config().port,
            store.config().database,
            store.config().credentials_file.display()
        );

        Ok(Self::from_parts(config, catalog, Arc::new(vault), Arc::new(store)))
    }

    /// Assemble state from explicit parts
    pub fn from_parts(
        config: AppConfig,
        catalog: ProductCatalog,
        secrets: SharedSecretsService,
        store: SharedTransactionStore,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            secrets,
            store,
            config,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using built-in menu");
    Ok(ProductCatalog::hashicups())
}
