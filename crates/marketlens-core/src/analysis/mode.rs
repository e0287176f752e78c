//! Analysis modes.
//!
//! Each mode pairs a prompt template with the category set used to bucket
//! the answer text.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::classify::CategorySet;

/// The views offered by the dashboard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AnalysisMode {
    /// Free-form market overview of a single product
    Overview,
    /// Search queries, trends and related searches
    #[strum(to_string = "search-patterns", serialize = "search")]
    SearchPatterns,
    /// Discussion themes, interests, features and perception
    Themes,
    /// Customer pain points grouped by issue family
    #[strum(to_string = "pain-points", serialize = "pain")]
    PainPoints,
    /// Per-platform performance
    Platforms,
    /// Side-by-side comparison of two products
    #[strum(to_string = "comparison", serialize = "compare")]
    Comparison,
}

impl AnalysisMode {
    /// Human-readable view title.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisMode::Overview => "Overview Analysis",
            AnalysisMode::SearchPatterns => "Search Patterns",
            AnalysisMode::Themes => "Key Themes",
            AnalysisMode::PainPoints => "Pain Points",
            AnalysisMode::Platforms => "Platform Analysis",
            AnalysisMode::Comparison => "Comparison",
        }
    }

    /// Number of subjects a request in this mode carries.
    pub fn subject_count(self) -> usize {
        match self {
            AnalysisMode::Comparison => 2,
            _ => 1,
        }
    }

    /// Category set used to bucket the answer, if the mode classifies by category.
    ///
    /// Overview shows the text as-is and comparison scans per subject, so
    /// neither has one. Platforms uses the aspect set inside each platform.
    pub fn category_set(self) -> Option<CategorySet> {
        match self {
            AnalysisMode::SearchPatterns => Some(CategorySet::search_patterns()),
            AnalysisMode::Themes => Some(CategorySet::themes()),
            AnalysisMode::PainPoints => Some(CategorySet::pain_points()),
            AnalysisMode::Platforms => Some(CategorySet::platform_aspects()),
            AnalysisMode::Overview | AnalysisMode::Comparison => None,
        }
    }
}
