//! Structured views of an answer, one shape per analysis mode.

use marketlens_core::analysis::{AnalysisMode, AnalysisRequest};
use marketlens_core::classify::{CategoryBucket, CategorySet, Classifier};
use marketlens_core::comparison::{self, MetricMentions};
use marketlens_core::history::HistoryPayload;
use marketlens_core::platform::{self, PlatformBreakdown, PlatformScore};
use marketlens_core::text::{self, Severity};
use serde::Serialize;

/// One bar of a category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub count: usize,
}

/// A pain point with its estimated severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PainIssue {
    pub category: String,
    pub issue: String,
    pub severity: Severity,
}

/// Issue totals for one pain point category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDistribution {
    pub category: String,
    pub issues: usize,
    pub critical: usize,
}

/// Strength and advantage lines found for one compared subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectInsights {
    pub subject: String,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisReport {
    /// Free text with markdown tables removed
    Overview { text: String },
    /// Search patterns and key themes
    Categorized {
        mode: AnalysisMode,
        buckets: CategoryBucket,
        chart: Vec<ChartRow>,
    },
    PainPoints {
        buckets: CategoryBucket,
        issues: Vec<PainIssue>,
        distribution: Vec<IssueDistribution>,
    },
    Platforms {
        breakdown: PlatformBreakdown,
        scores: Vec<PlatformScore>,
    },
    Comparison {
        subjects: Vec<String>,
        text: String,
        insights: Vec<SubjectInsights>,
        features: Vec<String>,
        metrics: Vec<MetricMentions>,
    },
}

impl AnalysisReport {
    /// Builds the report for `request` from the extracted answer `text`.
    pub fn build(request: &AnalysisRequest, text: &str, classifier: &dyn Classifier) -> Self {
        match request.mode() {
            AnalysisMode::Overview => AnalysisReport::Overview {
                text: text::strip_tables(text),
            },
            mode @ (AnalysisMode::SearchPatterns | AnalysisMode::Themes) => {
                let set = mode.category_set().unwrap_or_else(CategorySet::search_patterns);
                let buckets = classifier.classify(text, &set);
                AnalysisReport::Categorized {
                    mode,
                    chart: chart_rows(&buckets),
                    buckets,
                }
            }
            AnalysisMode::PainPoints => {
                let buckets = classifier.classify(text, &CategorySet::pain_points());
                let issues = pain_issues(&buckets);
                let distribution = buckets
                    .non_empty()
                    .map(|category| IssueDistribution {
                        category: category.label.clone(),
                        issues: category.items.len(),
                        critical: issues
                            .iter()
                            .filter(|i| i.category == category.label && i.severity == Severity::High)
                            .count(),
                    })
                    .collect();
                AnalysisReport::PainPoints {
                    buckets,
                    issues,
                    distribution,
                }
            }
            AnalysisMode::Platforms => {
                let breakdown = platform::classify_platforms(
                    text,
                    request.extra_params(),
                    &CategorySet::platform_aspects(),
                );
                AnalysisReport::Platforms {
                    scores: breakdown.scores(),
                    breakdown,
                }
            }
            AnalysisMode::Comparison => {
                let subjects = request.subjects().to_vec();
                AnalysisReport::Comparison {
                    insights: subjects
                        .iter()
                        .map(|subject| SubjectInsights {
                            subject: subject.clone(),
                            insights: comparison::strength_insights(text, subject),
                        })
                        .collect(),
                    features: comparison::feature_list(text),
                    metrics: comparison::metric_mentions(text, request.extra_params(), &subjects),
                    text: text.to_string(),
                    subjects,
                }
            }
        }
    }

    /// What the session history keeps for this report.
    ///
    /// `raw_text` is the answer as extracted, before any cleanup.
    pub fn history_payload(&self, request: &AnalysisRequest, raw_text: &str) -> HistoryPayload {
        match self {
            AnalysisReport::Overview { .. } => HistoryPayload::RawText(raw_text.to_string()),
            AnalysisReport::Categorized { buckets, .. }
            | AnalysisReport::PainPoints { buckets, .. } => HistoryPayload::Buckets(buckets.clone()),
            AnalysisReport::Platforms { .. } => {
                HistoryPayload::Platforms(request.extra_params().to_vec())
            }
            AnalysisReport::Comparison { .. } => {
                HistoryPayload::Metrics(request.extra_params().to_vec())
            }
        }
    }
}

/// Non-empty categories, largest first. Ties keep category order.
pub fn chart_rows(buckets: &CategoryBucket) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = buckets
        .non_empty()
        .map(|category| ChartRow {
            label: category.label.clone(),
            count: category.items.len(),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn pain_issues(buckets: &CategoryBucket) -> Vec<PainIssue> {
    buckets
        .non_empty()
        .flat_map(|category| {
            category.items.iter().map(|issue| PainIssue {
                category: category.label.clone(),
                issue: issue.clone(),
                severity: Severity::of(issue),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketlens_core::classify::KeywordClassifier;

    fn build(request: &AnalysisRequest, text: &str) -> AnalysisReport {
        AnalysisReport::build(request, text, &KeywordClassifier)
    }

    #[test]
    fn test_chart_rows_sorted_and_skip_empty() {
        let request = AnalysisRequest::new(AnalysisMode::SearchPatterns, "Nike").unwrap();
        let text = "Common Search Queries:\n- nike shoes\n\
                    Search Trends:\n- running\n- air max\n- sale\n\
                    Related Searches:\n- adidas\n";

        let AnalysisReport::Categorized { chart, buckets, .. } = build(&request, text) else {
            panic!("expected categorized report");
        };
        let labels: Vec<_> = chart.iter().map(|r| (r.label.as_str(), r.count)).collect();
        assert_eq!(
            labels,
            vec![
                ("Search Trends", 3),
                ("Common Search Queries", 1),
                ("Related Searches", 1)
            ]
        );
        // Empty categories stay in the buckets.
        assert_eq!(buckets.len(), 5);
    }

    #[test]
    fn test_overview_strips_tables_but_history_keeps_raw() {
        let request = AnalysisRequest::new(AnalysisMode::Overview, "Nike").unwrap();
        let text = "Summary\n| a | b |\n\nEnd";
        let report = build(&request, text);

        assert_eq!(
            report,
            AnalysisReport::Overview {
                text: "Summary\n\nEnd".to_string()
            }
        );
        assert_eq!(
            report.history_payload(&request, text),
            HistoryPayload::RawText(text.to_string())
        );
    }

    #[test]
    fn test_pain_points_severity_and_distribution() {
        let request = AnalysisRequest::new(AnalysisMode::PainPoints, "Acme").unwrap();
        let text = "1. Product Issues:\n- Critical battery drain\n- Slow charging\n\
                    2. Customer Service Issues:\n- Major delays in support\n";

        let AnalysisReport::PainPoints {
            issues,
            distribution,
            ..
        } = build(&request, text)
        else {
            panic!("expected pain points report");
        };

        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[1].severity, Severity::Medium);
        assert_eq!(
            distribution,
            vec![
                IssueDistribution {
                    category: "Product Issues".into(),
                    issues: 2,
                    critical: 1
                },
                IssueDistribution {
                    category: "Customer Service Issues".into(),
                    issues: 1,
                    critical: 1
                },
            ]
        );
    }

    #[test]
    fn test_platform_report_scores_selected_platforms() {
        let request = AnalysisRequest::new(AnalysisMode::Platforms, "Duolingo")
            .unwrap()
            .with_extra_params(["Reddit"]);
        let text = "## Reddit\nUser Engagement Patterns:\n- Active subreddit\n- Daily streak memes\n";

        let report = build(&request, text);
        let AnalysisReport::Platforms { scores, .. } = &report else {
            panic!("expected platforms report");
        };
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].engagement, 40);
        assert_eq!(
            report.history_payload(&request, text),
            HistoryPayload::Platforms(vec!["Reddit".into()])
        );
    }

    #[test]
    fn test_comparison_insights_per_subject() {
        let request = AnalysisRequest::comparison("Coke", "Pepsi").unwrap();
        let text = "- Coke has a strength in global distribution\n\
                    - Pepsi holds an advantage with younger buyers\n\
                    - Pepsi is cheaper\n";

        let AnalysisReport::Comparison {
            insights, metrics, ..
        } = build(&request, text)
        else {
            panic!("expected comparison report");
        };
        assert_eq!(insights[0].insights, vec!["Coke has a strength in global distribution"]);
        assert_eq!(insights[1].insights, vec!["Pepsi holds an advantage with younger buyers"]);
        assert_eq!(metrics.len(), 3);
    }
}
