//! Flow endpoint configuration.
//!
//! Configuration priority: secret.json > environment variables

use marketlens_core::MarketLensError;
use marketlens_core::config::{DEFAULT_BASE_URL, SecretConfig};
use serde_json::{Map, Value};

pub const ENV_APPLICATION_TOKEN: &str = "MARKETLENS_APPLICATION_TOKEN";
pub const ENV_WORKSPACE_ID: &str = "MARKETLENS_WORKSPACE_ID";
pub const ENV_FLOW_ID: &str = "MARKETLENS_FLOW_ID";
pub const ENV_BASE_URL: &str = "MARKETLENS_BASE_URL";

/// Node ids of the hosted market analysis flow.
const FLOW_NODES: [&str; 15] = [
    "GoogleSearchAPI-weDm4",
    "ChatInput-wsQHH",
    "GoogleSearchAPI-BidDm",
    "ChatOutput-8p1KR",
    "CombineText-8ms0a",
    "GoogleSearchAPI-DzGFB",
    "GoogleSearchAPI-oYgmI",
    "GoogleSearchAPI-yxH2v",
    "GoogleSearchAPI-fyD9R",
    "AstraDB-RV7xl",
    "ParseData-UrtG7",
    "GroqModel-PYSWD",
    "CombineText-SitIl",
    "TextInput-gx7JF",
    "ParseData-LEhTj",
];

/// Every flow node mapped to an empty override.
pub fn default_tweaks() -> Map<String, Value> {
    FLOW_NODES
        .iter()
        .map(|node| (node.to_string(), Value::Object(Map::new())))
        .collect()
}

/// Where and how to call the workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig {
    pub base_url: String,
    pub workspace_id: String,
    pub flow_id: String,
    pub application_token: String,
    pub tweaks: Map<String, Value>,
}

impl FlowConfig {
    /// `{base_url}/lf/{workspace_id}/api/v1/run/{flow_id}`
    pub fn run_url(&self) -> String {
        format!(
            "{}/lf/{}/api/v1/run/{}",
            self.base_url.trim_end_matches('/'),
            self.workspace_id,
            self.flow_id
        )
    }

    /// Builds the config from secret.json, falling back to `lookup` for
    /// anything the secret file does not provide.
    ///
    /// `lookup` resolves environment variable names; binaries pass
    /// `|key| std::env::var(key).ok()`.
    pub fn resolve(
        secret: Option<SecretConfig>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MarketLensError> {
        let langflow = secret.and_then(|s| s.langflow);
        let non_empty = |value: String| if value.trim().is_empty() { None } else { Some(value) };

        let pick = |from_secret: Option<String>, key: &str| -> Result<String, MarketLensError> {
            from_secret
                .and_then(non_empty)
                .or_else(|| lookup(key).and_then(non_empty))
                .ok_or_else(|| {
                    MarketLensError::config(format!(
                        "{key} not found in secret.json or environment variables"
                    ))
                })
        };

        let application_token = pick(
            langflow.as_ref().map(|l| l.application_token.clone()),
            ENV_APPLICATION_TOKEN,
        )?;
        let workspace_id = pick(
            langflow.as_ref().map(|l| l.workspace_id.clone()),
            ENV_WORKSPACE_ID,
        )?;
        let flow_id = pick(langflow.as_ref().map(|l| l.flow_id.clone()), ENV_FLOW_ID)?;

        let base_url = langflow
            .as_ref()
            .and_then(|l| l.base_url.clone())
            .and_then(non_empty)
            .or_else(|| lookup(ENV_BASE_URL).and_then(non_empty))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let tweaks = langflow
            .and_then(|l| l.tweaks)
            .unwrap_or_else(default_tweaks);

        Ok(Self {
            base_url,
            workspace_id,
            flow_id,
            application_token,
            tweaks,
        })
    }
}
