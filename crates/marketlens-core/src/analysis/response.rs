//! Analysis response model.

use serde::Serialize;
use serde_json::{Value, json};

use crate::envelope;
use crate::error::MarketLensError;

/// Text substituted when the envelope does not contain an answer.
pub const FALLBACK_TEXT: &str = "No analysis available.";

/// Outcome of one remote analysis call, after retries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    /// Envelope as returned by the workflow endpoint, or `{"error": ...}` on failure
    pub raw_envelope: Value,
    /// Answer text, or [`FALLBACK_TEXT`] when the envelope has none
    pub extracted_text: String,
    pub succeeded: bool,
    pub error_message: Option<String>,
    /// HTTP status of the last failed attempt, when the endpoint answered
    pub status: Option<u16>,
    /// Number of attempts made, including the final one
    pub attempts: u32,
}

impl AnalysisResponse {
    /// Wraps a successfully decoded envelope and extracts its answer text.
    pub fn success(raw_envelope: Value, attempts: u32) -> Self {
        let extracted_text = envelope::extract_text(&raw_envelope);
        Self {
            raw_envelope,
            extracted_text,
            succeeded: true,
            error_message: None,
            status: None,
            attempts,
        }
    }

    /// Records the last failure after the attempt budget ran out.
    pub fn failure(error: &MarketLensError, attempts: u32) -> Self {
        let message = error.to_string();
        Self {
            raw_envelope: json!({ "error": message }),
            extracted_text: FALLBACK_TEXT.to_string(),
            succeeded: false,
            error_message: Some(message),
            status: error.status_code(),
            attempts,
        }
    }

    /// True when the call succeeded but the envelope held no answer text.
    pub fn is_fallback(&self) -> bool {
        self.succeeded && envelope::answer_text(&self.raw_envelope).is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_extracts_answer() {
        let envelope = json!({
            "outputs": [{"outputs": [{"results": {"message": {"text": "hello"}}}]}]
        });
        let response = AnalysisResponse::success(envelope, 1);
        assert!(response.succeeded);
        assert_eq!(response.extracted_text, "hello");
        assert!(!response.is_fallback());
    }

    #[test]
    fn test_success_with_unexpected_shape_uses_fallback() {
        let response = AnalysisResponse::success(json!({"session_id": "abc"}), 2);
        assert!(response.succeeded);
        assert_eq!(response.extracted_text, FALLBACK_TEXT);
        assert!(response.is_fallback());
    }

    #[test]
    fn test_failure_keeps_error_detail() {
        let err = MarketLensError::remote_status(502, "bad gateway");
        let response = AnalysisResponse::failure(&err, 3);
        assert!(!response.succeeded);
        assert_eq!(response.attempts, 3);
        assert_eq!(response.status, Some(502));
        assert_eq!(
            response.error_message.as_deref(),
            Some("API request failed with status 502: bad gateway")
        );
        assert_eq!(
            response.raw_envelope["error"],
            "API request failed with status 502: bad gateway"
        );
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let err = MarketLensError::transport("connection refused");
        let response = AnalysisResponse::failure(&err, 1);
        assert_eq!(response.status, None);
        assert_eq!(
            response.error_message.as_deref(),
            Some("Request failed: connection refused")
        );
    }
}
