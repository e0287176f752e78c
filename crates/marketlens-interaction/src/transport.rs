//! HTTP transport to the workflow run endpoint.

use std::time::Duration;

use async_trait::async_trait;
use marketlens_core::MarketLensError;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

/// Request body of the Langflow run API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRunRequest {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    pub tweaks: Map<String, Value>,
}

impl FlowRunRequest {
    /// A chat-in, chat-out run of `prompt`.
    pub fn chat(prompt: impl Into<String>, tweaks: Map<String, Value>) -> Self {
        Self {
            input_value: prompt.into(),
            output_type: "chat".to_string(),
            input_type: "chat".to_string(),
            tweaks,
        }
    }
}

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One POST to the workflow endpoint.
///
/// Implementations return `Err` only when no HTTP response was received;
/// every status code, success or not, comes back as a [`TransportResponse`].
#[async_trait]
pub trait FlowTransport: Send + Sync {
    async fn post(&self, request: &FlowRunRequest) -> Result<TransportResponse, MarketLensError>;
}

/// [`FlowTransport`] over reqwest with bearer authentication.
#[derive(Clone)]
pub struct HttpFlowTransport {
    client: Client,
    url: String,
    token: String,
    timeout: Duration,
}

impl HttpFlowTransport {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl FlowTransport for HttpFlowTransport {
    async fn post(&self, request: &FlowRunRequest) -> Result<TransportResponse, MarketLensError> {
        tracing::debug!(url = %self.url, chars = request.input_value.len(), "POST flow run");

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| MarketLensError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MarketLensError::transport(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "Flow run answered");
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_body() {
        let mut tweaks = Map::new();
        tweaks.insert("ChatInput-x".into(), json!({}));
        let body = serde_json::to_value(FlowRunRequest::chat("Nike", tweaks)).unwrap();

        assert_eq!(
            body,
            json!({
                "input_value": "Nike",
                "output_type": "chat",
                "input_type": "chat",
                "tweaks": {"ChatInput-x": {}}
            })
        );
    }

    #[test]
    fn test_success_range() {
        let ok = |status| TransportResponse {
            status,
            body: String::new(),
        };
        assert!(ok(200).is_success());
        assert!(ok(204).is_success());
        assert!(!ok(301).is_success());
        assert!(!ok(404).is_success());
        assert!(!ok(500).is_success());
    }
}
