//! Retry policy for flow calls.

use std::time::Duration;

use marketlens_core::MarketLensError;
use marketlens_core::config::{RequestSettings, RetryOn};

/// How many attempts to make and which failures deserve another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
    retry_on: RetryOn,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
            retry_on: RetryOn::AnyFailure,
        }
    }
}

impl RetryPolicy {
    /// Total attempts, clamped to at least one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = retry_on;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub fn retry_on(&self) -> RetryOn {
        self.retry_on
    }

    /// Whether attempt number `attempt` (1-based) failing with `error`
    /// should be followed by another attempt.
    pub fn should_retry(&self, error: &MarketLensError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        match self.retry_on {
            RetryOn::AnyFailure => true,
            RetryOn::Transient => error.is_transient(),
        }
    }
}

impl From<&RequestSettings> for RetryPolicy {
    fn from(settings: &RequestSettings) -> Self {
        Self::default()
            .with_max_attempts(settings.max_attempts)
            .with_backoff(Duration::from_secs(settings.backoff_secs))
            .with_retry_on(settings.retry_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retries_any_failure_until_budget() {
        let policy = RetryPolicy::default();
        let not_found = MarketLensError::remote_status(404, "missing");

        assert!(policy.should_retry(&not_found, 1));
        assert!(policy.should_retry(&not_found, 2));
        assert!(!policy.should_retry(&not_found, 3));
    }

    #[test]
    fn test_transient_skips_client_errors() {
        let policy = RetryPolicy::default().with_retry_on(RetryOn::Transient);

        assert!(!policy.should_retry(&MarketLensError::remote_status(400, ""), 1));
        assert!(!policy.should_retry(&MarketLensError::remote_status(401, ""), 1));
        assert!(policy.should_retry(&MarketLensError::remote_status(429, ""), 1));
        assert!(policy.should_retry(&MarketLensError::remote_status(503, ""), 1));
        assert!(policy.should_retry(&MarketLensError::transport("timed out"), 1));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = RetryPolicy::default().with_max_attempts(0);
        assert_eq!(policy.max_attempts(), 1);
        assert!(!policy.should_retry(&MarketLensError::transport("x"), 1));
    }

    #[test]
    fn test_from_settings() {
        let settings = RequestSettings {
            timeout_secs: 5,
            max_attempts: 4,
            backoff_secs: 0,
            retry_on: RetryOn::Transient,
        };
        let policy = RetryPolicy::from(&settings);
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.backoff(), Duration::ZERO);
        assert_eq!(policy.retry_on(), RetryOn::Transient);
    }
}
