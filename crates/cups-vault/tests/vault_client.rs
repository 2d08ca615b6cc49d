use cups_core::{CupsError, SecretsService};
use cups_vault::{VaultClient, VaultConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARD: &str = "4111111111111111";

fn client_for(server: &MockServer) -> VaultClient {
    VaultClient::new(VaultConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn encrypt_posts_base64_plaintext() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transit/encrypt/card-encrypt"))
        .and(body_json(json!({ "plaintext": "NDExMTExMTExMTExMTExMQ==" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "ciphertext": "vault:v1:abcdefghijklmnopqrstuvwxyz0123456789", "key_version": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ciphertext = client_for(&server).encrypt(CARD).await.unwrap();
    assert_eq!(ciphertext, "vault:v1:abcdefghijklmnopqrstuvwxyz0123456789");
}

#[tokio::test]
async fn tokenize_uses_payments_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transform/encode/payments"))
        .and(body_json(json!({
            "value": CARD,
            "transformation": "card-number",
            "tweak": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "encoded_value": "5555666677778888" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).tokenize(CARD).await.unwrap();
    assert_eq!(token, "5555666677778888");
}

#[tokio::test]
async fn mask_uses_custsupport_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transform/encode/custsupport"))
        .and(body_json(json!({
            "value": CARD,
            "transformation": "masked-card-number",
            "tweak": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "encoded_value": "############1111" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let masked = client_for(&server).mask(CARD).await.unwrap();
    assert_eq!(masked, "############1111");
}

#[tokio::test]
async fn token_header_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transform/encode/custsupport"))
        .and(header("X-Vault-Token", "hvs.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "encoded_value": "############1111" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = VaultClient::new(VaultConfig::new(server.uri()).with_token("hvs.test")).unwrap();
    assert!(client.mask(CARD).await.is_ok());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transit/encrypt/card-encrypt"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"errors":["permission denied"]}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).encrypt(CARD).await.unwrap_err();
    match err {
        CupsError::SecretsService { operation, status, body } => {
            assert_eq!(operation, "encrypt");
            assert_eq!(status, 403);
            assert!(body.contains("permission denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transform/encode/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let err = client_for(&server).tokenize(CARD).await.unwrap_err();
    assert!(matches!(err, CupsError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_server_hits_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "encoded_value": "late" } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = VaultConfig::new(server.uri()).with_timeout(Duration::from_millis(200));
    let err = VaultClient::new(config).unwrap().mask(CARD).await.unwrap_err();
    assert!(matches!(err, CupsError::NetworkError(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in test environments.
    let config = VaultConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
    let client = VaultClient::new(config).unwrap();

    assert!(matches!(client.encrypt(CARD).await, Err(CupsError::NetworkError(_))));
    assert!(matches!(client.tokenize(CARD).await, Err(CupsError::NetworkError(_))));
    assert!(matches!(client.mask(CARD).await, Err(CupsError::NetworkError(_))));
}
