//! # PostgreSQL Transaction Store
//!
//! One short-lived connection per operation, opened with whatever
//! credentials the provider hands out at that moment. The `transactions`
//! table is created outside this service.

use crate::config::DbConfig;
use crate::credentials::FileCredentialProvider;
use async_trait::async_trait;
use cups_core::{
    CupsError, CupsResult, DbCredentials, NewTransaction, SharedCredentialProvider,
    TransactionListing, TransactionRecord, TransactionStore,
};
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Column, ConnectOptions, Connection, Row};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const INSERT_TRANSACTION: &str = r#"
    INSERT INTO transactions (name, card_number, card_number_transit, card_number_fpe, card_number_masked)
    VALUES ($1, $2, $3, $4, $5)
"#;

const SELECT_TRANSACTIONS: &str = r#"
    SELECT id, name, card_number, card_number_transit, card_number_fpe, card_number_masked
    FROM transactions
    ORDER BY id DESC
"#;

/// `TransactionStore` backed by PostgreSQL
pub struct PgTransactionStore {
    config: DbConfig,
    credentials: SharedCredentialProvider,
}

impl PgTransactionStore {
    pub fn new(config: DbConfig, credentials: SharedCredentialProvider) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Store reading credentials from the agent file named in `config`
    pub fn with_agent_file(config: DbConfig) -> Self {
        let credentials = Arc::new(FileCredentialProvider::new(config.credentials_file.clone()));
        Self::new(config, credentials)
    }

    /// Create from environment variables
    pub fn from_env() -> CupsResult<Self> {
        Ok(Self::with_agent_file(DbConfig::from_env()?))
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn connect_options(&self, credentials: &DbCredentials) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .database(&self.config.database)
            .username(&credentials.username)
            .password(&credentials.password)
    }

    async fn connect(&self) -> CupsResult<PgConnection> {
        let credentials = self.credentials.credentials().await.inspect_err(|e| {
            error!(error = %e, "database credentials unavailable");
        })?;
        let options = self.connect_options(&credentials);

        match tokio::time::timeout(self.config.connect_timeout, options.connect()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => {
                error!(host = %self.config.host, error = %e, "database connection failed");
                Err(CupsError::Database(format!("connect: {}", e)))
            }
            Err(_) => {
                error!(host = %self.config.host, "database connection timed out");
                Err(CupsError::Database(format!(
                    "connect timed out after {}s",
                    self.config.connect_timeout.as_secs()
                )))
            }
        }
    }
}

async fn insert(conn: &mut PgConnection, transaction: &NewTransaction) -> Result<(), sqlx::Error> {
    // Dropping an uncommitted transaction rolls it back.
    let mut tx = conn.begin().await?;
    sqlx::query(INSERT_TRANSACTION)
        .bind(transaction.name())
        .bind(transaction.card_last_four())
        .bind(transaction.card_number_transit())
        .bind(transaction.card_number_fpe())
        .bind(transaction.card_number_masked())
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}

fn record_from_row(row: &PgRow) -> Result<TransactionRecord, sqlx::Error> {
    // SERIAL or BIGSERIAL
    let id = match row.try_get::<i64, _>("id") {
        Ok(id) => id,
        Err(_) => i64::from(row.try_get::<i32, _>("id")?),
    };

    Ok(TransactionRecord {
        id,
        name: row.try_get("name")?,
        card_number: row.try_get("card_number")?,
        card_number_transit: row.try_get("card_number_transit")?,
        card_number_fpe: row.try_get("card_number_fpe")?,
        card_number_masked: row.try_get("card_number_masked")?,
    })
}

async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to close database connection");
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    #[instrument(skip(self, transaction), fields(last_four = %transaction.card_last_four()))]
    async fn save(&self, transaction: &NewTransaction) -> CupsResult<()> {
        let mut conn = self.connect().await?;
        let result = insert(&mut conn, transaction).await;
        close(conn).await;

        match result {
            Ok(()) => {
                info!("transaction saved");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to save transaction");
                Err(CupsError::Database(e.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CupsResult<TransactionListing> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(SELECT_TRANSACTIONS).fetch_all(&mut conn).await;
        close(conn).await;

        let rows = result.map_err(|e| {
            error!(error = %e, "failed to query transactions");
            CupsError::Database(e.to_string())
        })?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!(error = %e, "unexpected transactions row");
                CupsError::Database(e.to_string())
            })?;

        let mut listing = TransactionListing::new(records);
        if let Some(row) = rows.first() {
            listing.columns = row.columns().iter().map(|c| c.name().to_string()).collect();
        }
        Ok(listing)
    }
}
