//! Analysis use case.
//!
//! `AnalysisUseCase` owns everything one dashboard session needs: the prompt
//! templates, the flow client, the classifier and the session history.

use marketlens_core::analysis::{AnalysisRequest, AnalysisResponse};
use marketlens_core::classify::{Classifier, KeywordClassifier};
use marketlens_core::history::{HistoryEntry, SessionHistory};
use marketlens_core::prompt::PromptBuilder;
use marketlens_core::{MarketLensError, Result};
use marketlens_interaction::FlowClient;

use crate::report::AnalysisReport;

/// What one analysis action produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub response: AnalysisResponse,
    /// `None` when the flow call failed
    pub report: Option<AnalysisReport>,
}

impl AnalysisOutcome {
    pub fn succeeded(&self) -> bool {
        self.response.succeeded
    }
}

/// Runs analyses for one session and records them in its history.
pub struct AnalysisUseCase {
    client: FlowClient,
    prompts: PromptBuilder,
    classifier: Box<dyn Classifier>,
    history: SessionHistory,
}

impl AnalysisUseCase {
    /// Creates a use case with the keyword classifier and an empty history.
    pub fn new(client: FlowClient) -> Result<Self> {
        Ok(Self {
            client,
            prompts: PromptBuilder::new()?,
            classifier: Box::new(KeywordClassifier),
            history: SessionHistory::new(),
        })
    }

    pub fn with_history(mut self, history: SessionHistory) -> Self {
        self.history = history;
        self
    }

    /// Runs one analysis.
    ///
    /// # Errors
    ///
    /// Only local failures are errors: a blank subject or a template that
    /// fails to render. Remote failures come back as an unsuccessful
    /// [`AnalysisOutcome`] and leave the history untouched.
    pub async fn run(&mut self, request: AnalysisRequest) -> Result<AnalysisOutcome> {
        let prompt = self.prompts.build(&request)?;
        if prompt.is_empty() {
            return Err(MarketLensError::invalid_input(
                "Please enter a product or brand name!",
            ));
        }

        let response = self.client.send(&prompt).await;
        if !response.succeeded {
            return Ok(AnalysisOutcome {
                response,
                report: None,
            });
        }

        let report =
            AnalysisReport::build(&request, &response.extracted_text, self.classifier.as_ref());
        let payload = report.history_payload(&request, &response.extracted_text);
        self.history.append(HistoryEntry::new(
            request.mode(),
            request.subjects().to_vec(),
            payload,
        ));

        tracing::info!(
            mode = %request.mode(),
            subjects = ?request.subjects(),
            attempts = response.attempts,
            "Analysis completed"
        );

        Ok(AnalysisOutcome {
            response,
            report: Some(report),
        })
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }
}
