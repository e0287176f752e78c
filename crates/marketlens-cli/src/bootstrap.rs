//! Wires configuration files and environment into an [`AnalysisUseCase`].

use anyhow::{Context, Result};
use marketlens_application::AnalysisUseCase;
use marketlens_core::config::{AppConfig, SecretConfig};
use marketlens_core::history::SessionHistory;
use marketlens_infrastructure::{
    ConfigStorage, MarketLensPaths, SecretStorage, SecretStorageError,
};
use marketlens_interaction::{FlowClient, FlowConfig};

/// Reads `config.toml`, defaulting every missing setting.
pub fn load_app_config(paths: &MarketLensPaths) -> Result<AppConfig> {
    let storage = ConfigStorage::new(paths.config_file()?);
    storage
        .load()
        .with_context(|| format!("Failed to load {}", storage.path().display()))
}

/// Reads `secret.json`; a missing file means "use the environment".
pub fn load_secret(paths: &MarketLensPaths) -> Result<Option<SecretConfig>> {
    let storage = SecretStorage::new(paths)?;
    match storage.load() {
        Ok(secret) => Ok(Some(secret)),
        Err(SecretStorageError::NotFound(path)) => {
            tracing::debug!(path = %path.display(), "No secret file, falling back to environment");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", storage.path().display())),
    }
}

/// Builds the use case for one session.
pub fn build_usecase(paths: &MarketLensPaths) -> Result<AnalysisUseCase> {
    let config = load_app_config(paths)?;
    let secret = load_secret(paths)?;
    let flow = FlowConfig::resolve(secret, |key| std::env::var(key).ok())
        .context("Flow credentials are not configured (run `marketlens config-path`)")?;

    tracing::debug!(url = %flow.run_url(), "Resolved flow endpoint");

    let client = FlowClient::from_config(&flow, &config.request);
    let usecase = AnalysisUseCase::new(client)?
        .with_history(SessionHistory::with_display_limit(config.history.display_limit));
    Ok(usecase)
}
