//! FlowClient - sends an analysis prompt to the hosted workflow with retries.

use std::sync::Arc;
use std::time::Duration;

use marketlens_core::MarketLensError;
use marketlens_core::analysis::AnalysisResponse;
use marketlens_core::config::RequestSettings;
use serde_json::{Map, Value};

use crate::flow_config::FlowConfig;
use crate::retry::RetryPolicy;
use crate::transport::{FlowRunRequest, FlowTransport, HttpFlowTransport};

/// Client for the workflow run endpoint.
///
/// [`FlowClient::send`] never fails: after the attempt budget is spent it
/// returns an unsuccessful [`AnalysisResponse`] carrying the last error.
#[derive(Clone)]
pub struct FlowClient {
    transport: Arc<dyn FlowTransport>,
    policy: RetryPolicy,
    tweaks: Map<String, Value>,
}

impl FlowClient {
    pub fn new(transport: Arc<dyn FlowTransport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            tweaks: Map::new(),
        }
    }

    /// Client over reqwest for `config`, tuned by `settings`.
    pub fn from_config(config: &FlowConfig, settings: &RequestSettings) -> Self {
        let transport =
            HttpFlowTransport::new(config.run_url(), config.application_token.clone())
                .with_timeout(Duration::from_secs(settings.timeout_secs));
        Self::new(Arc::new(transport), RetryPolicy::from(settings))
            .with_tweaks(config.tweaks.clone())
    }

    pub fn with_tweaks(mut self, tweaks: Map<String, Value>) -> Self {
        self.tweaks = tweaks;
        self
    }

    /// Sends `prompt` and returns the decoded envelope, retrying per policy.
    pub async fn send(&self, prompt: &str) -> AnalysisResponse {
        let request = FlowRunRequest::chat(prompt, self.tweaks.clone());
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match self.attempt(&request).await {
                Ok(envelope) => {
                    tracing::debug!(attempt, "Flow run succeeded");
                    return AnalysisResponse::success(envelope, attempt);
                }
                Err(e) => e,
            };

            if !self.policy.should_retry(&error, attempt) {
                tracing::warn!(attempt, error = %error, "Flow run failed, giving up");
                return AnalysisResponse::failure(&error, attempt);
            }

            tracing::warn!(
                attempt,
                max_attempts = self.policy.max_attempts(),
                error = %error,
                "Flow run failed, retrying"
            );
            tokio::time::sleep(self.policy.backoff()).await;
        }
    }

    async fn attempt(&self, request: &FlowRunRequest) -> Result<Value, MarketLensError> {
        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(MarketLensError::remote_status(response.status, response.body));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
