//! REPL command parsing.
//!
//! ```text
//! /overview Tesla Model 3
//! /platforms Duolingo : Reddit, PlayStore
//! /compare Coke vs Pepsi : Market Share, Price Point
//! /history themes
//! ```

use std::str::FromStr;

use marketlens_core::analysis::{AnalysisMode, AnalysisRequest};
use marketlens_core::comparison::COMPARISON_METRICS;
use marketlens_core::platform::PLATFORM_CATALOG;
use marketlens_core::{MarketLensError, Result};

/// Slash commands offered for completion, in help order.
pub const SLASH_COMMANDS: [&str; 9] = [
    "/overview",
    "/search",
    "/themes",
    "/pain",
    "/platforms",
    "/compare",
    "/history",
    "/debug",
    "/help",
];

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Analyze(AnalysisRequest),
    /// Recent entries of one mode, or of every mode
    History(Option<AnalysisMode>),
    ToggleDebug,
    Help,
    Quit,
}

/// Parses a trimmed, non-empty REPL line.
pub fn parse(line: &str) -> Result<ReplCommand> {
    if line == "quit" || line == "exit" {
        return Ok(ReplCommand::Quit);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Err(MarketLensError::invalid_input(
            "Commands start with '/'. Type /help for the list.",
        ));
    };
    let (command, args) = rest.split_once(' ').unwrap_or((rest, ""));
    let args = args.trim();

    match command {
        "overview" => single(AnalysisMode::Overview, args),
        "search" => single(AnalysisMode::SearchPatterns, args),
        "themes" => single(AnalysisMode::Themes, args),
        "pain" => single(AnalysisMode::PainPoints, args),
        "platforms" => {
            let (subject, options) = split_options(args);
            let catalog = PLATFORM_CATALOG.map(|(name, _)| name);
            let platforms = canonical_choices(&options, catalog, "platform")?;
            let request = AnalysisRequest::new(AnalysisMode::Platforms, subject)?;
            Ok(ReplCommand::Analyze(request.with_extra_params(platforms)))
        }
        "compare" => {
            let (subjects, options) = split_options(args);
            let (first, second) = subjects.split_once(" vs ").unwrap_or((subjects, ""));
            let metrics = canonical_choices(&options, COMPARISON_METRICS, "metric")?;
            let request = AnalysisRequest::comparison(first.trim(), second.trim())?;
            Ok(ReplCommand::Analyze(request.with_extra_params(metrics)))
        }
        "history" if args.is_empty() => Ok(ReplCommand::History(None)),
        "history" => AnalysisMode::from_str(args)
            .map(|mode| ReplCommand::History(Some(mode)))
            .map_err(|_| MarketLensError::invalid_input(format!("Unknown mode: {args}"))),
        "debug" => Ok(ReplCommand::ToggleDebug),
        "help" => Ok(ReplCommand::Help),
        other => Err(MarketLensError::invalid_input(format!(
            "Unknown command: /{other}"
        ))),
    }
}

fn single(mode: AnalysisMode, subject: &str) -> Result<ReplCommand> {
    AnalysisRequest::new(mode, subject).map(ReplCommand::Analyze)
}

/// Splits `subject : a, b` into the subject and its option list.
fn split_options(args: &str) -> (&str, Vec<&str>) {
    match args.split_once(" : ") {
        Some((subject, options)) => (
            subject.trim(),
            options
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .collect(),
        ),
        None => (args, Vec::new()),
    }
}

/// Maps user spellings onto catalog names, rejecting unknown ones.
fn canonical_choices<const N: usize>(
    options: &[&str],
    catalog: [&'static str; N],
    what: &str,
) -> Result<Vec<String>> {
    options
        .iter()
        .map(|option| {
            catalog
                .iter()
                .find(|name| name.eq_ignore_ascii_case(option))
                .map(|name| name.to_string())
                .ok_or_else(|| {
                    MarketLensError::invalid_input(format!(
                        "Unknown {what}: {option} (choose from {})",
                        catalog.join(", ")
                    ))
                })
        })
        .collect()
}

/// Help text listing every command.
pub fn help_text() -> String {
    [
        "/overview <product>                  market overview",
        "/search <product>                    search patterns and trends",
        "/themes <product>                    key discussion themes",
        "/pain <product>                      customer pain points",
        "/platforms <product> [: p1, p2]      per-platform analysis",
        "/compare <a> vs <b> [: m1, m2]       side-by-side comparison",
        "/history [mode]                      recent analyses",
        "/debug                               toggle raw response output",
        "/help                                this list",
        "quit | exit                          leave",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(line: &str) -> AnalysisRequest {
        match parse(line).unwrap() {
            ReplCommand::Analyze(request) => request,
            other => panic!("expected analysis, got {other:?}"),
        }
    }

    #[test]
    fn test_single_subject_commands() {
        let request = analyze("/search Tesla Model 3");
        assert_eq!(request.mode(), AnalysisMode::SearchPatterns);
        assert_eq!(request.subject(), "Tesla Model 3");

        assert_eq!(analyze("/pain Acme").mode(), AnalysisMode::PainPoints);
    }

    #[test]
    fn test_missing_subject_is_invalid_input() {
        let err = parse("/themes").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_platforms_default_and_selected() {
        assert_eq!(
            analyze("/platforms Duolingo").extra_params(),
            ["Google", "YouTube", "Reddit"]
        );
        assert_eq!(
            analyze("/platforms Duolingo : reddit, playstore").extra_params(),
            ["Reddit", "PlayStore"]
        );
        assert!(parse("/platforms Duolingo : MySpace").is_err());
    }

    #[test]
    fn test_compare_with_metrics() {
        let request = analyze("/compare Coke vs Pepsi : price point");
        assert_eq!(request.subjects(), ["Coke", "Pepsi"]);
        assert_eq!(request.extra_params(), ["Price Point"]);

        let err = parse("/compare Coke").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Please enter both products for comparison!"
        );
    }

    #[test]
    fn test_history_and_control_commands() {
        assert_eq!(parse("/history").unwrap(), ReplCommand::History(None));
        assert_eq!(
            parse("/history pain").unwrap(),
            ReplCommand::History(Some(AnalysisMode::PainPoints))
        );
        assert!(parse("/history weather").is_err());
        assert_eq!(parse("/debug").unwrap(), ReplCommand::ToggleDebug);
        assert_eq!(parse("exit").unwrap(), ReplCommand::Quit);
        assert!(parse("hello").is_err());
        assert!(parse("/dance").is_err());
    }
}
