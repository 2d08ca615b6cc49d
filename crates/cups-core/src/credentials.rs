//! # Database Credentials
//!
//! Short-lived username/password pairs issued by Vault's database secrets
//! engine and rendered to disk by the Vault agent.

use serde::Deserialize;
use std::fmt;

/// One dynamic database login
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbCredentials {
    pub username: String,
    pub password: String,
}

impl DbCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Layout of the agent-rendered secrets file:
/// `{"database_creds": {"username": "...", "password": "..."}}`
#[derive(Debug, Deserialize)]
pub struct AgentSecrets {
    pub database_creds: DbCredentials,
}
