//! UrbanIntel - city forecast and recommendation engine
//!
//! Runs one forecast cycle per invocation:
//! - `sample` prints a generated city snapshot
//! - `run` forecasts, classifies and recommends
//! - `approve` additionally approves one option and publishes its directive

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use urbanintel_cli::{commands, CliConfig, SnapshotSource};

/// UrbanIntel CLI
#[derive(Parser)]
#[command(name = "urbanintel")]
#[command(about = "UrbanIntel - city forecast and recommendation engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "URBANINTEL_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "URBANINTEL_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "URBANINTEL_LOG_JSON", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated city snapshot as JSON
    Sample {
        /// Generator seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run one forecast cycle
    Run {
        #[command(flatten)]
        input: CycleInput,
    },

    /// Run one cycle and approve one of its recommendations
    Approve {
        /// Recommendation id to approve
        #[arg(long)]
        option: u32,

        /// Operator approving the recommendation
        #[arg(long)]
        operator: String,

        #[command(flatten)]
        input: CycleInput,
    },
}

#[derive(Args)]
struct CycleInput {
    /// City snapshot JSON file
    #[arg(long, conflicts_with = "seed")]
    snapshot: Option<String>,

    /// Generator seed, used when no snapshot file is given
    #[arg(long)]
    seed: Option<u64>,

    /// Model output JSON file; enables the model blend engine
    #[arg(long)]
    model_outputs: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl CycleInput {
    fn source(&self) -> SnapshotSource {
        SnapshotSource {
            path: self.snapshot.clone(),
            seed: self.seed,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.json = true;
    }

    // Initialize tracing on stderr so stdout stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!(?config, "configuration loaded");

    let now = Utc::now();
    let output = match &cli.command {
        Command::Sample { seed } => commands::to_json(&commands::sample(&config, *seed, now)?)?,
        Command::Run { input } => {
            let report =
                commands::run(&config, &input.source(), input.model_outputs.as_deref(), now)?;
            match input.format {
                OutputFormat::Json => commands::to_json(&report)?,
                OutputFormat::Text => commands::render_report(&report),
            }
        }
        Command::Approve {
            option,
            operator,
            input,
        } => {
            let outcome = commands::approve(
                &config,
                &input.source(),
                input.model_outputs.as_deref(),
                *option,
                operator,
                now,
            )?;
            match input.format {
                OutputFormat::Json => commands::to_json(&outcome)?,
                OutputFormat::Text => commands::render_approval(&outcome),
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
