//! Configuration models.
//!
//! `SecretConfig` mirrors `secret.json` (credentials for the hosted flow);
//! `AppConfig` mirrors `config.toml` (request and history tuning).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::history::DEFAULT_DISPLAY_LIMIT;

/// Host serving the Langflow run API.
pub const DEFAULT_BASE_URL: &str = "https://api.langflow.astra.datastax.com";

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SecretConfig {
    #[serde(default)]
    pub langflow: Option<LangflowSecret>,
}

/// Credentials and identifiers of the hosted workflow.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LangflowSecret {
    pub application_token: String,
    /// Langflow workspace (organisation) id, the `/lf/{id}` path segment
    pub workspace_id: String,
    pub flow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-node overrides passed through to the flow untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweaks: Option<Map<String, Value>>,
}

/// Which failed attempts are retried.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetryOn {
    /// Every failure, client errors included
    #[default]
    AnyFailure,
    /// Transport errors, 429 and 5xx only
    Transient,
}

/// Contents of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub request: RequestSettings,
    pub history: HistorySettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RequestSettings {
    /// Per-attempt timeout
    pub timeout_secs: u64,
    /// Attempts in total, first one included
    pub max_attempts: u32,
    /// Fixed wait between attempts
    pub backoff_secs: u64,
    pub retry_on: RetryOn,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 3,
            backoff_secs: 2,
            retry_on: RetryOn::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistorySettings {
    pub display_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [request]
            max_attempts = 5
            retry_on = "transient"
            "#,
        )
        .unwrap();

        assert_eq!(config.request.max_attempts, 5);
        assert_eq!(config.request.retry_on, RetryOn::Transient);
        assert_eq!(config.request.timeout_secs, 30);
        assert_eq!(config.request.backoff_secs, 2);
        assert_eq!(config.history.display_limit, 5);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_secret_json_with_tweaks() {
        let secret: SecretConfig = serde_json::from_str(
            r#"{
                "langflow": {
                    "application_token": "AstraCS:token",
                    "workspace_id": "ws-1",
                    "flow_id": "flow-1",
                    "tweaks": {"ChatInput-abc": {}}
                }
            }"#,
        )
        .unwrap();

        let langflow = secret.langflow.unwrap();
        assert_eq!(langflow.flow_id, "flow-1");
        assert!(langflow.base_url.is_none());
        assert!(langflow.tweaks.unwrap().contains_key("ChatInput-abc"));
    }
}
