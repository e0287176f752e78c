//! Application layer for marketlens.
//!
//! Turns a user request into a prompt, a flow call, a structured report and
//! a history entry.

pub mod analysis_usecase;
pub mod report;

pub use analysis_usecase::{AnalysisOutcome, AnalysisUseCase};
pub use report::{AnalysisReport, ChartRow, IssueDistribution, PainIssue, SubjectInsights};
