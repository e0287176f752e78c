//! Session-scoped analysis history.
//!
//! Every completed analysis is appended to the list for its mode and kept
//! for the lifetime of the session. Only the most recent few are shown.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analysis::AnalysisMode;
use crate::classify::CategoryBucket;

/// Entries shown per mode unless configured otherwise.
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// What is remembered about an analysis, depending on its mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum HistoryPayload {
    /// Overview answers are kept verbatim
    RawText(String),
    /// Categorized modes keep their buckets
    Buckets(CategoryBucket),
    /// Platform analyses keep the platforms that were analysed
    Platforms(Vec<String>),
    /// Comparisons keep the metrics that were compared
    Metrics(Vec<String>),
}

/// One finished analysis. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub mode: AnalysisMode,
    pub subjects: Vec<String>,
    pub payload: HistoryPayload,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(mode: AnalysisMode, subjects: Vec<String>, payload: HistoryPayload) -> Self {
        Self {
            mode,
            subjects,
            payload,
            timestamp: Local::now(),
        }
    }

    /// Subjects joined for display, e.g. `Pixel vs iPhone`.
    pub fn title(&self) -> String {
        self.subjects.join(" vs ")
    }
}

/// Per-mode history for one user session.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: BTreeMap<AnalysisMode, Vec<HistoryEntry>>,
    display_limit: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::with_display_limit(DEFAULT_DISPLAY_LIMIT)
    }

    pub fn with_display_limit(display_limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            display_limit,
        }
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.entry(entry.mode).or_default().push(entry);
    }

    /// The last `display_limit` entries for `mode`, newest first.
    pub fn recent(&self, mode: AnalysisMode) -> impl Iterator<Item = &HistoryEntry> {
        self.recent_n(mode, self.display_limit)
    }

    /// The last `n` entries for `mode`, newest first.
    pub fn recent_n(&self, mode: AnalysisMode, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.all(mode).iter().rev().take(n)
    }

    /// Every entry for `mode`, oldest first.
    pub fn all(&self, mode: AnalysisMode) -> &[HistoryEntry] {
        self.entries.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total entries across all modes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
