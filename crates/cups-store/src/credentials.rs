//! # Credential Providers
//!
//! The Vault agent renders fresh database credentials to a JSON file and
//! rewrites it whenever the lease rotates. The file is read on every call.

use async_trait::async_trait;
use cups_core::{AgentSecrets, CredentialProvider, CupsError, CupsResult, DbCredentials};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CREDENTIALS_FILE: &str = "/etc/vault-agent/secrets.json";

/// Reads `{"database_creds": {...}}` from an agent-rendered file
#[derive(Debug, Clone)]
pub struct FileCredentialProvider {
    path: PathBuf,
}

impl FileCredentialProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn credentials(&self) -> CupsResult<DbCredentials> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CupsError::CredentialsUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let secrets: AgentSecrets = serde_json::from_str(&contents).map_err(|e| {
            CupsError::CredentialsUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(
            path = %self.path.display(),
            username = %secrets.database_creds.username,
            "loaded database credentials"
        );
        Ok(secrets.database_creds)
    }
}

/// Fixed credentials, for local development without an agent
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: DbCredentials,
}

impl StaticCredentialProvider {
    pub fn new(credentials: DbCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn credentials(&self) -> CupsResult<DbCredentials> {
        Ok(self.credentials.clone())
    }
}
