//! FlowClient over the real reqwest transport against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use marketlens_core::config::{RequestSettings, RetryOn};
use marketlens_interaction::{FlowClient, FlowConfig, HttpFlowTransport, RetryPolicy};
use serde_json::{Map, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FlowConfig {
    FlowConfig {
        base_url: server.uri(),
        workspace_id: "ws-1".to_string(),
        flow_id: "flow-1".to_string(),
        application_token: "test-token".to_string(),
        tweaks: Map::new(),
    }
}

fn fast_settings() -> RequestSettings {
    RequestSettings {
        timeout_secs: 5,
        max_attempts: 3,
        backoff_secs: 0,
        retry_on: RetryOn::AnyFailure,
    }
}

#[tokio::test]
async fn test_posts_chat_request_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lf/ws-1/api/v1/run/flow-1"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({
            "input_value": "Tesla",
            "output_type": "chat",
            "input_type": "chat"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "outputs": [{"outputs": [{"results": {"message": {"text": "EV leader"}}}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlowClient::from_config(&config_for(&server), &fast_settings());
    let response = client.send("Tesla").await;

    assert!(response.succeeded);
    assert_eq!(response.extracted_text, "EV leader");
    assert_eq!(response.attempts, 1);
}

#[tokio::test]
async fn test_server_error_exhausts_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("flow crashed"))
        .expect(3)
        .mount(&server)
        .await;

    let client = FlowClient::from_config(&config_for(&server), &fast_settings());
    let response = client.send("Tesla").await;

    assert!(!response.succeeded);
    assert_eq!(response.attempts, 3);
    assert_eq!(
        response.error_message.as_deref(),
        Some("API request failed with status 500: flow crashed")
    );
    assert_eq!(
        response.raw_envelope,
        json!({"error": "API request failed with status 500: flow crashed"})
    );
}

#[tokio::test]
async fn test_transient_policy_does_not_retry_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = RequestSettings {
        retry_on: RetryOn::Transient,
        ..fast_settings()
    };
    let client = FlowClient::from_config(&config_for(&server), &settings);
    let response = client.send("Tesla").await;

    assert!(!response.succeeded);
    assert_eq!(response.attempts, 1);
}

#[tokio::test]
async fn test_timeout_is_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let url = config_for(&server).run_url();
    let transport = HttpFlowTransport::new(url, "test-token").with_timeout(Duration::from_millis(50));
    let client = FlowClient::new(
        Arc::new(transport),
        RetryPolicy::default()
            .with_max_attempts(1)
            .with_backoff(Duration::ZERO),
    );
    let response = client.send("Tesla").await;

    assert!(!response.succeeded);
    let message = response.error_message.unwrap();
    assert!(message.starts_with("Request failed: "), "{message}");
}
