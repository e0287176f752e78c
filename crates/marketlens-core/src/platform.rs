//! Platform analysis: per-platform aspect buckets and derived scores.

use serde::Serialize;

use crate::classify::{CategoryBucket, CategorySet, bullet_content};

/// Platforms offered for selection, with what each one is used to judge.
pub const PLATFORM_CATALOG: [(&str, &str); 6] = [
    ("Google", "Search trends and visibility"),
    ("YouTube", "Video content and engagement"),
    ("Reddit", "Community discussions and sentiment"),
    ("Quora", "Q&A and user queries"),
    ("PlayStore", "App performance and reviews"),
    ("Twitter/X", "Social media presence and trends"),
];

/// Points credited per classified item when scoring a platform.
const POINTS_PER_ITEM: usize = 20;

/// The first three catalog platforms.
pub fn default_platforms() -> Vec<String> {
    PLATFORM_CATALOG
        .iter()
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Catalog description for `platform`, if it is a known one.
pub fn describe(platform: &str) -> Option<&'static str> {
    PLATFORM_CATALOG
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(platform))
        .map(|(_, description)| *description)
}

/// Aspect buckets for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSection {
    pub platform: String,
    pub aspects: CategoryBucket,
}

/// Item counts turned into comparable scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformScore {
    pub platform: String,
    pub engagement: usize,
    pub success: usize,
    pub improvement: usize,
}

/// Result of scanning an answer across the selected platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformBreakdown {
    sections: Vec<PlatformSection>,
}

impl PlatformBreakdown {
    pub fn sections(&self) -> &[PlatformSection] {
        &self.sections
    }

    pub fn section(&self, platform: &str) -> Option<&PlatformSection> {
        self.sections.iter().find(|s| s.platform == platform)
    }

    /// Engagement, success and improvement scores per platform, in selection order.
    pub fn scores(&self) -> Vec<PlatformScore> {
        let count = |section: &PlatformSection, label: &str| {
            section.aspects.get(label).map_or(0, <[String]>::len) * POINTS_PER_ITEM
        };
        self.sections
            .iter()
            .map(|section| PlatformScore {
                platform: section.platform.clone(),
                engagement: count(section, "Engagement"),
                success: count(section, "Success"),
                improvement: count(section, "Improvement"),
            })
            .collect()
    }
}

/// Scans `text` with a platform pointer and an aspect pointer.
///
/// A line containing a platform name (case-sensitive) selects that platform.
/// Aspect headers are only recognised once some platform is current, and the
/// aspect pointer carries over when the platform changes. Bullet lines are
/// filed under the current platform and aspect. Repeated items are kept, so
/// they count towards the platform scores.
pub fn classify_platforms(
    text: &str,
    platforms: &[String],
    aspects: &CategorySet,
) -> PlatformBreakdown {
    let mut sections: Vec<PlatformSection> = platforms
        .iter()
        .map(|platform| PlatformSection {
            platform: platform.clone(),
            aspects: CategoryBucket::empty(aspects),
        })
        .collect();

    let mut current_platform: Option<usize> = None;
    let mut current_aspect: Option<usize> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(index) = platforms.iter().position(|p| line.contains(p.as_str())) {
            current_platform = Some(index);
        }

        let Some(platform) = current_platform else {
            continue;
        };

        if let Some(index) = aspects.match_line(line) {
            current_aspect = Some(index);
        }

        if let (Some(aspect), Some(item)) = (current_aspect, bullet_content(line)) {
            sections[platform].aspects.append(aspect, item);
        }
    }

    PlatformBreakdown { sections }
}
