//! Secret configuration file storage.
//!
//! Loads the hosted-flow credentials from ~/.config/marketlens/secret.json.

use crate::paths::MarketLensPaths;
use marketlens_core::config::SecretConfig;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Read-only access to `secret.json`.
///
/// The file is plaintext JSON and should be mode 600. Credentials are not
/// validated here; an empty token only fails once the flow is called.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a SecretStorage at the path resolved by `paths`.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretStorage)`: Successfully determined config path
    /// - `Err(SecretStorageError::ConfigDirNotFound)`: No config directory available
    pub fn new(paths: &MarketLensPaths) -> Result<Self, SecretStorageError> {
        let path = paths
            .secret_file()
            .map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::IoError)`: Failed to read file
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        tracing::debug!(path = %self.path.display(), "Loaded secret config");
        Ok(config)
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("nonexistent.json"));

        let result = storage.load();
        assert!(matches!(result, Err(SecretStorageError::NotFound(_))));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(
            &path,
            r#"{
                "langflow": {
                    "application_token": "AstraCS:abc",
                    "workspace_id": "ws",
                    "flow_id": "flow",
                    "base_url": "http://localhost:7860"
                }
            }"#,
        )
        .unwrap();

        let config = SecretStorage::with_path(path).load().unwrap();
        let langflow = config.langflow.unwrap();
        assert_eq!(langflow.application_token, "AstraCS:abc");
        assert_eq!(langflow.base_url.as_deref(), Some("http://localhost:7860"));
    }

    #[test]
    fn test_load_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{}").unwrap();

        let config = SecretStorage::with_path(path).load().unwrap();
        assert!(config.langflow.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{ not json").unwrap();

        let result = SecretStorage::with_path(path).load();
        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_new_uses_paths_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketLensPaths::new(Some(temp_dir.path()));
        let storage = SecretStorage::new(&paths).unwrap();
        assert_eq!(storage.path(), &temp_dir.path().join("secret.json"));
    }
}
