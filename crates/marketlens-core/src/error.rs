//! Error types for the MarketLens application.

use thiserror::Error;

/// A shared error type for the entire MarketLens application.
///
/// Variants follow the failure taxonomy of an analysis action: bad user
/// input is rejected before any call, remote failures carry the transport
/// cause or the HTTP status and body, everything else is local plumbing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketLensError {
    /// Empty or otherwise unusable user input. No remote call is attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Connection, DNS or timeout failure talking to the workflow endpoint
    #[error("Request failed: {0}")]
    Transport(String),

    /// The workflow endpoint answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// Configuration error (missing credentials, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    Template(String),
}

impl MarketLensError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a RemoteStatus error
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteStatus {
            status,
            body: body.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// HTTP status carried by a remote failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is transient: transport errors, 429 and 5xx.
    ///
    /// Client errors (other 4xx) and undecodable bodies are not transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::RemoteStatus { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MarketLensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MarketLensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MarketLensError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for MarketLensError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

/// A type alias for `Result<T, MarketLensError>`.
pub type Result<T> = std::result::Result<T, MarketLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_message_carries_code_and_body() {
        let err = MarketLensError::remote_status(503, "upstream unavailable");
        assert_eq!(
            err.to_string(),
            "API request failed with status 503: upstream unavailable"
        );
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(MarketLensError::transport("reset").status_code(), None);
    }

    #[test]
    fn test_transient_classification() {
        assert!(MarketLensError::transport("connection reset").is_transient());
        assert!(MarketLensError::remote_status(500, "").is_transient());
        assert!(MarketLensError::remote_status(429, "").is_transient());
        assert!(!MarketLensError::remote_status(401, "").is_transient());
        assert!(!MarketLensError::remote_status(404, "").is_transient());
        assert!(!MarketLensError::invalid_input("empty").is_transient());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MarketLensError = io.into();
        assert!(err.to_string().contains("NotFound"));
    }
}
