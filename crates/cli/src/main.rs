use anyhow::Result;
use clap::{Parser, Subcommand};
use devotional_core::DataPaths;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "devotional")]
#[command(about = "Daily devotional generator with history-aware verse selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, stage and record today's devotional
    Run {
        /// Skip the already-sent check (same as TEST_MODE=1)
        #[arg(long)]
        test_mode: bool,
    },
    /// Show history statistics
    Stats {
        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Snapshot the database into the backups directory
    Backup,
    /// Back up, then replace the database with an empty one
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show the last delivery status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { test_mode } => commands::run::run(test_mode).await?,
        Commands::Stats { json } => commands::admin::stats(&DataPaths::from_env(), json)?,
        Commands::Backup => commands::admin::backup(&DataPaths::from_env())?,
        Commands::Reset { force } => commands::admin::reset(&DataPaths::from_env(), force)?,
        Commands::Status => commands::admin::status(&DataPaths::from_env()).await?,
    }

    Ok(())
}
