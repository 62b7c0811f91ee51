//! Spark CLI - Command-line interface for the circuit simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, run, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spark")]
#[command(about = "Headless electron-flow simulation of a battery, switch, and bulb circuit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print one line per frame
    Run {
        /// Path to a circuit config file (defaults are used when omitted)
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Override the config's frame rate
        #[arg(long)]
        fps: Option<f64>,

        /// Frame numbers at which to flip the switch (repeatable)
        #[arg(long = "toggle-at", default_values_t = vec![0u64])]
        toggle_at: Vec<u64>,

        /// Pace frames against the wall clock instead of simulated time
        #[arg(long)]
        realtime: bool,

        /// Output format
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Write the default circuit config as TOML
    Config {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a circuit config file
    Validate {
        /// Path to the config file
        config: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

/// `RUST_LOG` when set and valid, otherwise `info`
fn log_filter<E>(from_env: Result<EnvFilter, E>) -> EnvFilter {
    from_env.unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::try_from_default_env()))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            frames,
            fps,
            toggle_at,
            realtime,
            format,
        } => run::run(run::RunArgs {
            config,
            frames,
            fps,
            toggle_at,
            realtime,
            format,
        }),
        Commands::Config { output, force } => config::run(output.as_deref(), force),
        Commands::Validate { config } => validate::run(&config),
    }
}
