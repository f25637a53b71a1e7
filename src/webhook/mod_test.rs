use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WebhookClient {
    let config = WebhookConfig::new(format!("{}/webhook/silly", server.uri())).unwrap();
    WebhookClient::new(config).unwrap()
}

/// Client aimed at a port that was bound once and then released.
fn unreachable_client() -> WebhookClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let config = WebhookConfig::new(format!("http://127.0.0.1:{port}/webhook/silly")).unwrap();
    WebhookClient::new(config).unwrap()
}

async fn mount_body(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/webhook/silly"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

// =============================================================================
// wire shape
// =============================================================================

#[tokio::test]
async fn posts_json_message_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/silly"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "Book a flight" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"output":"Where to?"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.fetch_reply("Book a flight").await.unwrap();
    assert_eq!(reply, "Where to?");
}

// =============================================================================
// fetch_reply — body shapes
// =============================================================================

#[tokio::test]
async fn array_body_reply() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"[{"reply":"yo"}]"#).await;
    assert_eq!(client_for(&server).fetch_reply("hi").await.unwrap(), "yo");
}

#[tokio::test]
async fn plain_text_body() {
    let server = MockServer::start().await;
    mount_body(&server, 200, "plain text").await;
    assert_eq!(client_for(&server).fetch_reply("hi").await.unwrap(), "plain text");
}

#[tokio::test]
async fn empty_object_is_unrecognized() {
    let server = MockServer::start().await;
    mount_body(&server, 200, "{}").await;
    let err = client_for(&server).fetch_reply("hi").await.unwrap_err();
    assert_eq!(err, DeliveryError::UnrecognizedPayload);
}

#[tokio::test]
async fn non_success_status_still_normalizes_body() {
    let server = MockServer::start().await;
    mount_body(&server, 500, r#"{"text":"workflow failed"}"#).await;
    assert_eq!(client_for(&server).fetch_reply("hi").await.unwrap(), "workflow failed");
}

// =============================================================================
// transport failure
// =============================================================================

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let client = unreachable_client();

    let err = client.fetch_reply("hi").await.unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)));
}

// =============================================================================
// deliver
// =============================================================================

#[tokio::test]
async fn deliver_folds_transport_failure_into_fallback() {
    let client = unreachable_client();

    let outcome = client.deliver("hi").await;
    assert!(!outcome.is_delivered());
    assert_eq!(outcome.text(), "❌ Error: Unable to connect to the server.");
}

#[tokio::test]
async fn deliver_folds_unrecognized_into_fallback() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"status":"ok"}"#).await;

    let outcome = client_for(&server).deliver("hi").await;
    assert_eq!(outcome.text(), "⚠️ No valid response content found.");
}

#[tokio::test]
async fn deliver_success() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"{"response":"Sure!"}"#).await;

    let outcome = client_for(&server).deliver("hi").await;
    assert_eq!(outcome, SendOutcome::Delivered("Sure!".into()));
}

#[test]
fn endpoint_url_exposed() {
    let client = WebhookClient::new(WebhookConfig::default()).unwrap();
    assert_eq!(client.endpoint_url(), config::DEFAULT_WEBHOOK_URL);
}
