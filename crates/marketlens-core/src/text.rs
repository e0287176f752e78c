//! Small text helpers used when presenting answers.

use serde::Serialize;
use strum::Display;

/// Drops markdown tables from `text`.
///
/// A line containing `|` starts a table; lines are skipped until the next
/// blank line, which is kept.
pub fn strip_tables(text: &str) -> String {
    let mut kept = Vec::new();
    let mut in_table = false;

    for line in text.split('\n') {
        if line.contains('|') {
            in_table = true;
            continue;
        }
        if in_table && line.trim().is_empty() {
            in_table = false;
        }
        if !in_table {
            kept.push(line);
        }
    }

    kept.join("\n")
}

/// Severity of a reported pain point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Severity {
    High,
    Medium,
}

const HIGH_SEVERITY_WORDS: [&str; 4] = ["critical", "major", "significant", "high"];

impl Severity {
    /// `High` when the issue text uses one of the escalation words.
    pub fn of(issue: &str) -> Self {
        let lower = issue.to_lowercase();
        if HIGH_SEVERITY_WORDS.iter().any(|w| lower.contains(w)) {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}
