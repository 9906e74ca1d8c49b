//! Aegis CLI - tools around the emergency detection engine.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, IntentCommand, ProfileCommand, ReplayCommand};

/// Aegis CLI - tools around the emergency detection engine.
///
/// This tool allows you to:
///   - classify recognized speech into emergency types
///   - replay recorded model traces through the detection engine
///   - inspect or reset an enrolled voice profile
///
/// Configuration is read from ~/.aegis/config.yaml unless --config is given.
#[derive(Parser)]
#[command(name = "aegis")]
#[command(about = "Emergency detection engine CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.aegis/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration
    Config(ConfigCommand),
    /// Classify text into an emergency type
    Intent(IntentCommand),
    /// Replay a recorded trace through the engine
    Replay(ReplayCommand),
    /// Manage the enrolled voice profile
    Profile(ProfileCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli).await,
        Commands::Intent(cmd) => cmd.run(&cli).await,
        Commands::Replay(cmd) => cmd.run(&cli).await,
        Commands::Profile(cmd) => cmd.run(&cli).await,
    }
}
