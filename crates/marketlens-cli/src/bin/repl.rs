use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;

use marketlens_application::AnalysisUseCase;
use marketlens_cli::commands::{self, ReplCommand, SLASH_COMMANDS};
use marketlens_cli::{bootstrap, logging, render};
use marketlens_core::analysis::AnalysisMode;
use marketlens_infrastructure::MarketLensPaths;

/// Rustyline helper providing slash command completion, highlighting and hints.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: format!("{cmd} "),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

/// Interactive marketlens session.
///
/// Each analysis runs to completion before the next prompt; history lives
/// for the lifetime of the process.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init_tracing(0);

    let paths = MarketLensPaths::new(None);
    let mut usecase = bootstrap::build_usecase(&paths)?;
    let mut debug = false;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== MarketLens REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type /help for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match commands::parse(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                };

                match command {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => println!("{}", commands::help_text()),
                    ReplCommand::ToggleDebug => {
                        debug = !debug;
                        let state = if debug { "on" } else { "off" };
                        println!("{}", format!("Debug mode {state}").bright_black());
                    }
                    ReplCommand::History(mode) => print_history(&usecase, mode),
                    ReplCommand::Analyze(request) => {
                        let mode = request.mode();
                        let subjects = request.subjects().join(" vs ");
                        println!("{}", format!("Analyzing {subjects}...").bright_black());
                        match usecase.run(request).await {
                            Ok(outcome) => println!("{}", render::outcome(mode, &outcome, debug)),
                            Err(e) => println!("{}", format!("Error: {e}").red()),
                        }
                        println!();
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

fn print_history(usecase: &AnalysisUseCase, mode: Option<AnalysisMode>) {
    let history = usecase.history();
    match mode {
        Some(mode) => println!("{}", render::history(history, mode)),
        None if history.is_empty() => {
            println!("{}", "No analyses yet this session.".bright_black())
        }
        None => {
            for mode in AnalysisMode::iter().filter(|m| !history.all(*m).is_empty()) {
                println!("{}", render::history(history, mode));
            }
        }
    }
}
