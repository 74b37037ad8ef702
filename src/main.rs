//! UPI Fraud Detection - Command-line dashboard
//!
//! # Commands
//!
//! - `upi-fraud simulate` - Generate, score and display synthetic transactions
//! - `upi-fraud generate` - Emit unscored synthetic transactions as JSON lines
//! - `upi-fraud score` - Score transactions read from a JSON file or stdin

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use upi_fraud_detection::{
    config::{AppConfig, LoggingConfig},
    dashboard::{render, Dashboard, Session},
    generator::TransactionGenerator,
};

/// Simulated UPI transaction monitoring with rule-based fraud scoring
#[derive(Parser)]
#[command(name = "upi-fraud")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML); defaults to config/default.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate transactions and show the dashboard
    Simulate {
        /// Number of transactions to simulate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print synthetic transactions as JSON lines, without scoring
    Generate {
        /// Number of transactions to generate
        #[arg(short = 'n', long, default_value_t = 10)]
        count: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score transactions from a JSON file (object, array or JSON lines)
    Score {
        /// Input file; `-` or omitted reads stdin
        input: Option<PathBuf>,

        /// Print scored transactions as JSON lines instead of cards
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load()?,
    };

    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Simulate { count, seed } => {
            if seed.is_some() {
                config.generator.seed = seed;
            }
            simulate(&config, count);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { count, seed } => {
            if seed.is_some() {
                config.generator.seed = seed;
            }
            generate(&config, count)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Score { input, json } => score(&config, input, json),
    }
}

fn init_logging(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("upi_fraud_detection={level}").parse()?)
        .add_directive(format!("upi_fraud={level}").parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
    Ok(())
}

fn simulate(config: &AppConfig, count: u32) {
    info!(
        count = count,
        fraud_pattern_rate = config.generator.fraud_pattern_rate,
        seed = ?config.generator.seed,
        "Starting simulation"
    );

    let mut dashboard = Dashboard::from_config(config);
    let mut session = Session::new();

    for _ in 0..count {
        if let Err(e) = dashboard.simulate(&mut session) {
            warn!(error = %e, "Generated transaction rejected");
        }
    }

    print!(
        "{}",
        render::render_dashboard(&session, config.dashboard.display_limit)
    );
    session.log_summary();
}

fn generate(config: &AppConfig, count: u32) -> Result<()> {
    let mut generator = TransactionGenerator::new(config.generator.clone());

    for _ in 0..count {
        let tx = generator.generate();
        println!("{}", serde_json::to_string(&tx)?);
    }

    info!(count = count, "Generated transactions");
    Ok(())
}

fn score(config: &AppConfig, input: Option<PathBuf>, json: bool) -> Result<ExitCode> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let dashboard = Dashboard::from_config(config);
    let mut session = Session::new();
    let outcome = dashboard.submit_all(&mut session, &text);

    if json {
        for scored in &outcome.scored {
            println!("{}", serde_json::to_string(scored)?);
        }
    } else {
        print!("{}", render::render_dashboard(&session, session.len().max(1)));
    }
    session.log_summary();

    if !outcome.is_clean() {
        error!(
            rejected = outcome.rejected.len(),
            "Some records could not be scored"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
