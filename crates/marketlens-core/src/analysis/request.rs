//! Analysis request model.

use serde::Serialize;

use super::AnalysisMode;
use crate::comparison::default_metrics;
use crate::error::{MarketLensError, Result};
use crate::platform::default_platforms;

/// A single user-initiated analysis.
///
/// Built fresh per action and validated on construction; fields are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    mode: AnalysisMode,
    subjects: Vec<String>,
    extra_params: Vec<String>,
}

impl AnalysisRequest {
    /// Creates a single-subject request.
    ///
    /// Platform requests start with the default platform selection.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the subject is empty or whitespace only
    /// - `InvalidInput` if `mode` needs two subjects
    pub fn new(mode: AnalysisMode, subject: impl Into<String>) -> Result<Self> {
        if mode.subject_count() != 1 {
            return Err(MarketLensError::invalid_input(format!(
                "{} needs two products",
                mode.title()
            )));
        }

        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(MarketLensError::invalid_input(
                "Please enter a product or brand name!",
            ));
        }

        let extra_params = match mode {
            AnalysisMode::Platforms => default_platforms(),
            _ => Vec::new(),
        };

        Ok(Self {
            mode,
            subjects: vec![subject],
            extra_params,
        })
    }

    /// Creates a comparison request between two products with the default metrics.
    pub fn comparison(first: impl Into<String>, second: impl Into<String>) -> Result<Self> {
        let first = first.into();
        let second = second.into();
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(MarketLensError::invalid_input(
                "Please enter both products for comparison!",
            ));
        }

        Ok(Self {
            mode: AnalysisMode::Comparison,
            subjects: vec![first, second],
            extra_params: default_metrics(),
        })
    }

    /// Replaces the platform or metric selection.
    ///
    /// An empty selection keeps the defaults. Blank entries are dropped.
    pub fn with_extra_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params: Vec<String> = params
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.trim().is_empty())
            .collect();
        if !params.is_empty() {
            self.extra_params = params;
        }
        self
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// All subjects, in input order.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// The first (or only) subject.
    pub fn subject(&self) -> &str {
        &self.subjects[0]
    }

    /// Selected platforms (platform mode) or metrics (comparison mode).
    pub fn extra_params(&self) -> &[String] {
        &self.extra_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_subject() {
        let err = AnalysisRequest::new(AnalysisMode::Themes, "   \n").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_single_subject_comparison() {
        let err = AnalysisRequest::new(AnalysisMode::Comparison, "Pixel").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_comparison_needs_both_products() {
        assert!(AnalysisRequest::comparison("Pixel", " ").is_err());
        let request = AnalysisRequest::comparison("Pixel", "iPhone").unwrap();
        assert_eq!(request.subjects(), &["Pixel".to_string(), "iPhone".to_string()]);
        assert_eq!(request.extra_params(), default_metrics().as_slice());
    }

    #[test]
    fn test_platform_defaults_and_override() {
        let request = AnalysisRequest::new(AnalysisMode::Platforms, "Notion").unwrap();
        assert_eq!(request.extra_params(), &["Google", "YouTube", "Reddit"]);

        let request = request.with_extra_params(["Quora", " "]);
        assert_eq!(request.extra_params(), &["Quora"]);

        let request = request.with_extra_params(Vec::<String>::new());
        assert_eq!(request.extra_params(), &["Quora"]);
    }

    #[test]
    fn test_subject_kept_verbatim() {
        let request = AnalysisRequest::new(AnalysisMode::Overview, " Acme & Co ").unwrap();
        assert_eq!(request.subject(), " Acme & Co ");
    }
}
