use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Parser, Subcommand};
use marketlens_cli::{bootstrap, logging, render};
use marketlens_core::analysis::{AnalysisMode, AnalysisRequest};
use marketlens_core::comparison::COMPARISON_METRICS;
use marketlens_core::platform::PLATFORM_CATALOG;
use marketlens_infrastructure::MarketLensPaths;

#[derive(Parser)]
#[command(name = "marketlens")]
#[command(about = "MarketLens - product and brand market analysis", long_about = None)]
struct Cli {
    /// Print the raw workflow response alongside results
    #[arg(long, global = true)]
    debug: bool,

    /// Print the outcome as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this directory instead of ~/.config/marketlens
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// General market overview of a product or brand
    Overview { subject: String },
    /// Search queries, trends and related searches
    Search { subject: String },
    /// Main discussion themes and perception
    Themes { subject: String },
    /// Customer pain points with severity
    PainPoints { subject: String },
    /// Performance across platforms
    Platforms {
        subject: String,
        /// Platform to include (repeatable; defaults to Google, YouTube, Reddit)
        #[arg(long = "platform", value_parser = PossibleValuesParser::new(PLATFORM_CATALOG.map(|(name, _)| name)))]
        platforms: Vec<String>,
    },
    /// Compare two products side by side
    Compare {
        first: String,
        second: String,
        /// Metric to compare (repeatable)
        #[arg(long = "metric", value_parser = PossibleValuesParser::new(COMPARISON_METRICS))]
        metrics: Vec<String>,
    },
    /// Show configuration file locations, creating a secret.json template if missing
    ConfigPath,
}

impl Commands {
    fn request(self) -> marketlens_core::Result<Option<AnalysisRequest>> {
        let request = match self {
            Commands::Overview { subject } => AnalysisRequest::new(AnalysisMode::Overview, subject)?,
            Commands::Search { subject } => {
                AnalysisRequest::new(AnalysisMode::SearchPatterns, subject)?
            }
            Commands::Themes { subject } => AnalysisRequest::new(AnalysisMode::Themes, subject)?,
            Commands::PainPoints { subject } => {
                AnalysisRequest::new(AnalysisMode::PainPoints, subject)?
            }
            Commands::Platforms { subject, platforms } => {
                AnalysisRequest::new(AnalysisMode::Platforms, subject)?.with_extra_params(platforms)
            }
            Commands::Compare {
                first,
                second,
                metrics,
            } => AnalysisRequest::comparison(first, second)?.with_extra_params(metrics),
            Commands::ConfigPath => return Ok(None),
        };
        Ok(Some(request))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let paths = MarketLensPaths::new(cli.config_dir.as_deref());

    let Some(request) = cli.command.request()? else {
        return config_path(&paths);
    };

    let mut usecase = bootstrap::build_usecase(&paths)?;
    let mode = request.mode();
    let outcome = usecase.run(request).await?;

    if cli.json {
        let value = serde_json::json!({
            "response": outcome.response,
            "report": outcome.report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render::outcome(mode, &outcome, cli.debug));
    }

    if !outcome.succeeded() {
        bail!("Analysis failed after {} attempts", outcome.response.attempts);
    }
    Ok(())
}

fn config_path(paths: &MarketLensPaths) -> Result<()> {
    let (secret, created) = paths.ensure_secret_file()?;
    println!("config dir:  {}", paths.config_dir()?.display());
    println!("config.toml: {}", paths.config_file()?.display());
    println!("secret.json: {}", secret.display());
    if created {
        println!("Created a secret.json template; fill in the Langflow token and ids.");
    }
    Ok(())
}
