//! clubplan CLI
//!
//! Solves a training dataset through the job manager and prints the score
//! and per-session reports.
//!
//! ```text
//! clubplan solve club.json --config solver.toml --seconds 10
//! clubplan demo --seed 7 --json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use thiserror::Error;

use clubplan::report::{render_score_analysis, render_sessions};
use clubplan::{console, demo, solve_request, ClubPlanError, ConfigError, SolveRequest, SolverConfig};

#[derive(Parser)]
#[command(name = "clubplan")]
#[command(version, about = "Weekly training scheduler for youth sports clubs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a dataset read from a JSON file
    Solve {
        /// Dataset with trainers, teams, timeSlots and fieldCapacity
        dataset: PathBuf,

        #[command(flatten)]
        options: SolveOptions,
    },

    /// Solve the built-in demo club
    Demo {
        #[command(flatten)]
        options: SolveOptions,
    },
}

#[derive(Args)]
struct SolveOptions {
    /// Solver configuration file (TOML, or YAML by extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock limit in seconds, overriding the configuration
    #[arg(long)]
    seconds: Option<u64>,

    /// Random seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Print the schedule and reports as JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] ClubPlanError),

    #[error("cannot write JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve { dataset, options } => {
            read_dataset(&dataset).and_then(|request| run(request, &options))
        }
        Commands::Demo { options } => run(demo::demo_club(), &options),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn read_dataset(path: &Path) -> Result<SolveRequest, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Dataset {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(options: &SolveOptions) -> Result<SolverConfig, CliError> {
    let mut config = match &options.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::new(),
    };
    if let Some(seconds) = options.seconds {
        config = config.with_termination_seconds(seconds);
    }
    if let Some(seed) = options.seed {
        config = config.with_random_seed(seed);
    }
    Ok(config)
}

fn run(request: SolveRequest, options: &SolveOptions) -> Result<(), CliError> {
    let config = load_config(options)?;

    if !options.json {
        console::print_banner();
        console::init();
        for issue in request.issues() {
            println!("{} {issue}", "warning:".yellow().bold());
        }
    }

    let output = solve_request(request, config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("{}", "Score analysis".bright_cyan().bold());
    print!("{}", render_score_analysis(&output.score_analysis));
    println!();
    println!("{}", "Sessions".bright_cyan().bold());
    print!("{}", render_sessions(&output.session_analysis));
    Ok(())
}
