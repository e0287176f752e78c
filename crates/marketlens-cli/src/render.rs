//! Terminal rendering of reports and history.

use colored::Colorize;
use marketlens_application::{AnalysisOutcome, AnalysisReport, ChartRow};
use marketlens_core::analysis::AnalysisMode;
use marketlens_core::classify::CategoryBucket;
use marketlens_core::history::{HistoryEntry, HistoryPayload, SessionHistory};
use marketlens_core::platform;
use marketlens_core::text::Severity;

/// Width of the longest chart bar, in cells.
const BAR_WIDTH: usize = 40;

/// Renders one analysis outcome.
///
/// With `debug` set the raw envelope follows the report, and failures show
/// the attempt count.
pub fn outcome(mode: AnalysisMode, outcome: &AnalysisOutcome, debug: bool) -> String {
    let mut out = Vec::new();
    out.push(mode.title().bright_magenta().bold().to_string());

    match &outcome.report {
        Some(report) => out.push(report_body(report)),
        None => {
            let message = outcome
                .response
                .error_message
                .as_deref()
                .unwrap_or("Unknown error");
            out.push(format!("Error: {message}").red().to_string());
            if debug {
                let mut detail = format!("attempts: {}", outcome.response.attempts);
                if let Some(status) = outcome.response.status {
                    detail.push_str(&format!(", HTTP status: {status}"));
                }
                out.push(detail.bright_black().to_string());
            }
        }
    }

    if debug {
        out.push("Raw response:".bright_black().to_string());
        out.push(
            serde_json::to_string_pretty(&outcome.response.raw_envelope)
                .unwrap_or_else(|_| outcome.response.raw_envelope.to_string()),
        );
    }

    out.join("\n")
}

/// Renders the body of a successful report.
pub fn report_body(report: &AnalysisReport) -> String {
    match report {
        AnalysisReport::Overview { text } => text.clone(),
        AnalysisReport::Categorized { buckets, chart, .. } => {
            let mut out = vec![buckets_text(buckets)];
            if !chart.is_empty() {
                out.push(String::new());
                out.push(chart_text(chart));
            }
            out.join("\n")
        }
        AnalysisReport::PainPoints {
            issues,
            distribution,
            ..
        } => {
            let mut out = Vec::new();
            let mut category = "";
            for issue in issues {
                if issue.category != category {
                    category = issue.category.as_str();
                    out.push(category.bold().to_string());
                }
                let severity = match issue.severity {
                    Severity::High => format!("[{}]", issue.severity).red(),
                    Severity::Medium => format!("[{}]", issue.severity).yellow(),
                };
                out.push(format!("  {severity} {}", issue.issue));
            }
            if !distribution.is_empty() {
                out.push(String::new());
                out.push("Issue Distribution".bold().to_string());
                for row in distribution {
                    out.push(format!(
                        "  {}: {} issues, {} critical",
                        row.category, row.issues, row.critical
                    ));
                }
            }
            empty_or(out, "No pain points found.")
        }
        AnalysisReport::Platforms { breakdown, scores } => {
            let mut out = Vec::new();
            for section in breakdown.sections() {
                let description = platform::describe(&section.platform).unwrap_or_default();
                out.push(format!(
                    "{} {}",
                    section.platform.bold(),
                    description.bright_black()
                ));
                if section.aspects.is_empty() {
                    out.push("  No analysis available for this platform.".bright_black().to_string());
                } else {
                    out.push(indent(&buckets_text(&section.aspects)));
                }
            }
            if !scores.is_empty() {
                out.push(String::new());
                out.push("Platform Scores".bold().to_string());
                for score in scores {
                    out.push(format!(
                        "  {}: engagement {}, success {}, improvement {}",
                        score.platform, score.engagement, score.success, score.improvement
                    ));
                }
            }
            out.join("\n")
        }
        AnalysisReport::Comparison {
            subjects,
            text,
            insights,
            features,
            metrics,
        } => {
            let mut out = vec![subjects.join(" vs ").bold().to_string(), text.clone()];
            for subject in insights {
                out.push(String::new());
                out.push(format!("Strengths of {}", subject.subject).bold().to_string());
                if subject.insights.is_empty() {
                    out.push("  (none mentioned)".bright_black().to_string());
                }
                for insight in &subject.insights {
                    out.push(format!("  • {insight}"));
                }
            }
            if !features.is_empty() {
                out.push(String::new());
                out.push("Features".bold().to_string());
                out.extend(features.iter().map(|f| format!("  • {f}")));
            }
            if !metrics.is_empty() {
                out.push(String::new());
                out.push("Metric mentions".bold().to_string());
                for metric in metrics {
                    let counts: Vec<String> = metric
                        .counts
                        .iter()
                        .map(|(subject, count)| format!("{subject} {count}"))
                        .collect();
                    out.push(format!("  {}: {}", metric.metric, counts.join(", ")));
                }
            }
            out.join("\n")
        }
    }
}

/// Non-empty categories with their items. Empty categories are omitted.
pub fn buckets_text(buckets: &CategoryBucket) -> String {
    let mut out = Vec::new();
    for category in buckets.non_empty() {
        out.push(category.label.bold().to_string());
        out.extend(category.items.iter().map(|item| format!("  • {item}")));
    }
    empty_or(out, "No categorized items found.")
}

/// Horizontal bars scaled so the largest row spans the full width.
pub fn chart_text(rows: &[ChartRow]) -> String {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0).max(1);
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|row| {
            let cells = (row.count * BAR_WIDTH / max).max(1);
            format!(
                "{:<label_width$}  {} {}",
                row.label,
                "█".repeat(cells).cyan(),
                row.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The last few entries of `mode`, newest first.
pub fn history(history: &SessionHistory, mode: AnalysisMode) -> String {
    let entries: Vec<&HistoryEntry> = history.recent(mode).collect();
    if entries.is_empty() {
        return format!("No previous {} analyses.", mode.title()).bright_black().to_string();
    }

    let mut out = vec![format!("Previous {} analyses", mode.title()).bold().to_string()];
    for entry in entries {
        out.push(format!(
            "  {} {}",
            entry.title().green(),
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_black()
        ));
        match &entry.payload {
            HistoryPayload::RawText(_) => {}
            HistoryPayload::Buckets(buckets) => {
                for category in buckets.non_empty() {
                    out.push(format!("    {}: {} items", category.label, category.items.len()));
                }
            }
            HistoryPayload::Platforms(platforms) => {
                out.push(format!("    Platforms: {}", platforms.join(", ")));
            }
            HistoryPayload::Metrics(metrics) => {
                out.push(format!("    Metrics: {}", metrics.join(", ")));
            }
        }
    }
    out.join("\n")
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn empty_or(lines: Vec<String>, placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.bright_black().to_string()
    } else {
        lines.join("\n")
    }
}
