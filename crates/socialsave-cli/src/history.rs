//! History and archive command handlers for the CLI.
//!
//! All of these read the persisted cache only; none touch the network.

use std::path::Path;

use clap::Subcommand;
use socialsave_history::{write_archive, FileStore, HistoryCache};

use crate::render;

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List cached records, most recent first
    List,
    /// Show one cached record without re-analyzing it
    Show {
        /// Record id, or a unique prefix of it
        id: String,
    },
    /// Delete every cached record
    Clear,
}

pub(crate) fn open_history(data_dir: &Path) -> HistoryCache<FileStore> {
    HistoryCache::load(FileStore::new(data_dir))
}

/// # Errors
///
/// Returns an error if the requested record does not exist or clearing the
/// persisted cache fails.
pub(crate) fn run_history(data_dir: &Path, command: &HistoryCommands) -> anyhow::Result<()> {
    let mut history = open_history(data_dir);

    match command {
        HistoryCommands::List => {
            if history.is_empty() {
                println!("history is empty; run `analyze <url>` first");
            } else {
                print!("{}", render::history_table(history.entries()));
            }
        }
        HistoryCommands::Show { id } => {
            let post = history
                .resolve(id)
                .ok_or_else(|| anyhow::anyhow!("no history record matches id '{id}'"))?;
            print!("{}", render::card(post));
        }
        HistoryCommands::Clear => {
            let removed = history.len();
            history.clear()?;
            println!("history cleared ({removed} records removed)");
        }
    }

    Ok(())
}

/// Write the archive for the record matching `id` into `out` (or the
/// current directory).
///
/// # Errors
///
/// Returns an error if no record matches or the file cannot be written.
pub(crate) fn run_export(data_dir: &Path, id: &str, out: Option<&Path>) -> anyhow::Result<()> {
    let history = open_history(data_dir);
    let post = history
        .resolve(id)
        .ok_or_else(|| anyhow::anyhow!("no history record matches id '{id}'"))?;

    let path = write_archive(post, out.unwrap_or_else(|| Path::new(".")))?;
    println!("archive written to {}", path.display());
    Ok(())
}
