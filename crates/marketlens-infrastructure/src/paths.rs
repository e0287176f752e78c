//! Unified path management for marketlens configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/marketlens/        # Config directory (XDG on Linux)
//! ├── config.toml              # Request and history settings
//! └── secret.json              # Langflow token and flow identifiers
//! ```

use std::path::{Path, PathBuf};

use marketlens_core::config::{LangflowSecret, SecretConfig};

const APP_DIR: &str = "marketlens";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves marketlens file locations.
///
/// With no base path the platform config directory is used; a base path
/// replaces it entirely (tests, `--config-dir`).
#[derive(Debug, Clone, Default)]
pub struct MarketLensPaths {
    base: Option<PathBuf>,
}

impl MarketLensPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the marketlens configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/marketlens/`
    /// - `Err(PathError::ConfigDirNotFound)`: no base path and no platform config dir
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to `secret.json`.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// The template carries empty credentials to be filled in by hand. On Unix
    /// the new file is restricted to mode 600.
    ///
    /// # Returns
    ///
    /// - `Ok((PathBuf, bool))`: path, and whether the file was created now
    /// - `Err(std::io::Error)`: If file creation or permission setting fails
    pub fn ensure_secret_file(&self) -> Result<(PathBuf, bool), std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok((secret_path, false));
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            langflow: Some(LangflowSecret {
                application_token: String::new(),
                workspace_id: String::new(),
                flow_id: String::new(),
                base_url: None,
                tweaks: None,
            }),
        };

        let template_json =
            serde_json::to_string_pretty(&template_config).map_err(std::io::Error::other)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        tracing::info!(path = %secret_path.display(), "Created secret file template");
        Ok((secret_path, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_live_under_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketLensPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path());
        assert!(paths.config_file().unwrap().ends_with("config.toml"));
        assert!(paths.secret_file().unwrap().starts_with(temp_dir.path()));
    }

    #[test]
    fn test_ensure_secret_file_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MarketLensPaths::new(Some(&temp_dir.path().join("nested")));

        let (path, created) = paths.ensure_secret_file().unwrap();
        assert!(created);
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: SecretConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.langflow.unwrap().application_token, "");

        let (_, created_again) = paths.ensure_secret_file().unwrap();
        assert!(!created_again);
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_template_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let paths = MarketLensPaths::new(Some(temp_dir.path()));
        let (path, _) = paths.ensure_secret_file().unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
