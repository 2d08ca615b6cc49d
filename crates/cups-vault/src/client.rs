//! # Vault Client
//!
//! Transit encryption and Transform encoding over Vault's HTTP API.
//! Each call is a single POST with no retry; the caller decides what a
//! failure means for the page.

use crate::config::{TransformTarget, VaultConfig};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cups_core::{CupsError, CupsResult, SecretsService};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// `SecretsService` backed by Vault
pub struct VaultClient {
    config: VaultConfig,
    client: Client,
}

impl VaultClient {
    /// Create a new client with the configured timeout
    pub fn new(config: VaultConfig) -> CupsResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CupsError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CupsResult<Self> {
        Self::new(VaultConfig::from_env()?)
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// POST a JSON body and decode the `data` object of the reply
    async fn post<B, T>(&self, operation: &str, url: &str, body: &B) -> CupsResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.config.token {
            request = request.header("X-Vault-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CupsError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CupsError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Vault API error: operation={}, status={}, body={}", operation, status, text);
            return Err(CupsError::SecretsService {
                operation: operation.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: VaultResponse<T> = serde_json::from_str(&text).map_err(|e| {
            CupsError::MalformedResponse(format!("{} response: {}", operation, e))
        })?;

        debug!("Vault {} succeeded", operation);
        Ok(envelope.data)
    }

    async fn encode(
        &self,
        operation: &str,
        target: &TransformTarget,
        value: &str,
    ) -> CupsResult<String> {
        let body = EncodeRequest {
            value,
            transformation: &target.transformation,
            tweak: "",
        };
        let data: EncodeData = self
            .post(operation, &self.config.encode_url(target), &body)
            .await?;
        Ok(data.encoded_value)
    }
}

#[async_trait]
impl SecretsService for VaultClient {
    #[instrument(skip(self, card_number), fields(key = %self.config.transit_key))]
    async fn encrypt(&self, card_number: &str) -> CupsResult<String> {
        let body = EncryptRequest {
            plaintext: STANDARD.encode(card_number.as_bytes()),
        };
        let data: EncryptData = self
            .post("encrypt", &self.config.encrypt_url(), &body)
            .await?;
        Ok(data.ciphertext)
    }

    #[instrument(skip(self, card_number), fields(role = %self.config.tokenize.role))]
    async fn tokenize(&self, card_number: &str) -> CupsResult<String> {
        self.encode("tokenize", &self.config.tokenize, card_number).await
    }

    #[instrument(skip(self, card_number), fields(role = %self.config.mask.role))]
    async fn mask(&self, card_number: &str) -> CupsResult<String> {
        self.encode("mask", &self.config.mask, card_number).await
    }

    fn service_name(&self) -> &'static str {
        "vault"
    }
}

// =============================================================================
// Vault API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct EncryptRequest {
    plaintext: String,
}

#[derive(Debug, Serialize)]
struct EncodeRequest<'a> {
    value: &'a str,
    transformation: &'a str,
    tweak: &'a str,
}

#[derive(Debug, Deserialize)]
struct VaultResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct EncryptData {
    ciphertext: String,
}

#[derive(Debug, Deserialize)]
struct EncodeData {
    encoded_value: String,
}
