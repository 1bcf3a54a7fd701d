mod analyze;
mod history;
mod render;

use std::env::VarError;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::history::HistoryCommands;

#[derive(Debug, Parser)]
#[command(name = "socialsave")]
#[command(about = "Analyze social media posts and keep a local archive of the results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the platform a URL belongs to
    Detect {
        /// Post URL
        url: String,
    },
    /// Analyze a post URL and record the result in history
    Analyze {
        /// Post URL
        url: String,
        /// Print the record as JSON instead of a card
        #[arg(long)]
        json: bool,
    },
    /// Browse or clear the local history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Write a JSON archive of one history record
    Export {
        /// Record id, or a unique prefix of it
        id: String,
        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    socialsave_core::load_dotenv();

    // Logs go to stderr so `analyze --json` output stays machine-readable.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(socialsave_core::build_log_level(env_var)))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    dispatch(cli.command, env_var).await
}

fn env_var(key: &str) -> Result<String, VarError> {
    std::env::var(key)
}

/// Run one command. Only `analyze` loads and validates the full
/// configuration; the other commands read at most the data directory.
async fn dispatch<F>(command: Commands, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match command {
        Commands::Detect { url } => {
            println!("{}", socialsave_core::detect_platform(&url));
        }
        Commands::Analyze { url, json } => {
            let config = socialsave_core::build_app_config(&lookup)?;
            analyze::run_analyze(&config, &url, json).await?;
        }
        Commands::History { command } => {
            history::run_history(&socialsave_core::build_data_dir(&lookup), &command)?;
        }
        Commands::Export { id, out } => {
            history::run_export(&socialsave_core::build_data_dir(&lookup), &id, out.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
