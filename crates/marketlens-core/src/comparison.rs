//! Comparison mode: per-subject insights re-scanned from one shared answer.

use serde::Serialize;

use crate::classify::{is_bullet, strip_markers};

/// Metrics offered for comparison.
pub const COMPARISON_METRICS: [&str; 6] = [
    "Market Share",
    "Brand Sentiment",
    "Customer Satisfaction",
    "Social Media Presence",
    "Price Point",
    "Feature Set",
];

const STRENGTH_KEYWORDS: [&str; 2] = ["strength", "advantage"];
const FEATURE_KEYWORDS: [&str; 2] = ["feature", "specification"];

pub fn default_metrics() -> Vec<String> {
    ["Market Share", "Brand Sentiment", "Social Media Presence"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Lines naming `subject` together with a strength or advantage.
pub fn strength_insights(text: &str, subject: &str) -> Vec<String> {
    let subject = subject.trim().to_lowercase();
    if subject.is_empty() {
        return Vec::new();
    }

    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains(&subject) && STRENGTH_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|line| strip_markers(line).to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Bullet lines following the first mention of features or specifications.
pub fn feature_list(text: &str) -> Vec<String> {
    let mut in_features = false;
    let mut features = Vec::new();

    for line in text.lines() {
        let lower = line.to_lowercase();
        if FEATURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            in_features = true;
        } else if in_features && is_bullet(line.trim()) {
            let feature = strip_markers(line);
            if !feature.is_empty() {
                features.push(feature.to_string());
            }
        }
    }

    features
}

/// How often one metric is mentioned alongside each subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricMentions {
    pub metric: String,
    /// `(subject, lines mentioning both)` in subject order
    pub counts: Vec<(String, usize)>,
}

/// Counts lines that name both the metric and the subject.
///
/// This is the only per-metric figure the answer text supports; no score is
/// invented when the text is silent.
pub fn metric_mentions(text: &str, metrics: &[String], subjects: &[String]) -> Vec<MetricMentions> {
    let lines: Vec<String> = text.lines().map(str::to_lowercase).collect();

    metrics
        .iter()
        .map(|metric| {
            let metric_lower = metric.to_lowercase();
            let counts = subjects
                .iter()
                .map(|subject| {
                    let subject_lower = subject.trim().to_lowercase();
                    let hits = lines
                        .iter()
                        .filter(|l| l.contains(&metric_lower) && l.contains(&subject_lower))
                        .count();
                    (subject.clone(), hits)
                })
                .collect();
            MetricMentions {
                metric: metric.clone(),
                counts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "\
## Product Features
- Pixel: best-in-class camera
- iPhone: tight ecosystem
*
## Competitive Analysis
- Pixel strength: computational photography
- iPhone's key advantage is resale value
- Pixel weakness: battery life
- Pixel has higher market share in Japan
- iPhone leads market share in the US and brand sentiment
";

    #[test]
    fn test_strengths_per_subject() {
        assert_eq!(
            strength_insights(ANSWER, "pixel"),
            vec!["Pixel strength: computational photography"]
        );
        assert_eq!(
            strength_insights(ANSWER, "iPhone"),
            vec!["iPhone's key advantage is resale value"]
        );
        assert!(strength_insights(ANSWER, "Galaxy").is_empty());
    }

    #[test]
    fn test_features_collected_after_mention() {
        let features = feature_list(ANSWER);
        assert_eq!(features[0], "Pixel: best-in-class camera");
        assert_eq!(features[1], "iPhone: tight ecosystem");
        // Collection continues to the end of the text once started.
        assert_eq!(features.len(), 7);
    }

    #[test]
    fn test_no_features_without_mention() {
        assert!(feature_list("- camera\n- battery").is_empty());
    }

    #[test]
    fn test_metric_mentions_are_counted_not_invented() {
        let subjects = vec!["Pixel".to_string(), "iPhone".to_string()];
        let metrics = vec!["Market Share".to_string(), "Price Point".to_string()];
        let mentions = metric_mentions(ANSWER, &metrics, &subjects);

        assert_eq!(mentions[0].metric, "Market Share");
        assert_eq!(
            mentions[0].counts,
            vec![("Pixel".to_string(), 1), ("iPhone".to_string(), 1)]
        );
        assert_eq!(
            mentions[1].counts,
            vec![("Pixel".to_string(), 0), ("iPhone".to_string(), 0)]
        );
    }
}
