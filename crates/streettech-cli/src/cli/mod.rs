//! CLI for the StreetTech simulated downloader.

mod clipboard;
mod commands;
mod notifier;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::sync::Arc;
use streettech_core::config::{self, StreettechConfig};
use streettech_core::history::{DirStore, HistoryStore};
use streettech_core::quality::Quality;
use streettech_core::session::Session;

use commands::{
    run_clear_history, run_completions, run_copy, run_download, run_history, run_process,
    run_qualities,
};

/// Top-level CLI for the StreetTech simulated downloader.
#[derive(Debug, Parser)]
#[command(name = "streettech")]
#[command(about = "StreetTech: simulated YouTube downloader with download history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate a YouTube URL and load its (simulated) metadata.
    Process {
        /// youtube.com/watch?v=, youtu.be/ or youtube.com/embed/ URL.
        url: String,
    },

    /// Process a URL, then run the simulated download and record it in history.
    Download {
        /// youtube.com/watch?v=, youtu.be/ or youtube.com/embed/ URL.
        url: String,
        /// Resolution tier (2160p, 1440p, 1080p, 720p, 480p, 360p). Defaults to the configured one.
        #[arg(long, short)]
        quality: Option<Quality>,
    },

    /// Show the download history, newest first.
    History,

    /// Remove all download history.
    ClearHistory,

    /// Copy the URL of a history entry to the clipboard.
    Copy {
        /// 1-based position in `streettech history`.
        index: usize,
    },

    /// List the available quality tiers.
    Qualities,

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Builds a session over the persisted history with console collaborators.
fn build_session(cfg: &StreettechConfig) -> Result<Arc<Session>> {
    let store = match &cfg.storage_dir {
        Some(dir) => DirStore::new(dir),
        None => DirStore::open_default()?,
    };
    tracing::debug!(dir = %store.dir().display(), "history store");
    let history = Arc::new(HistoryStore::load(Arc::new(store)));
    Ok(Arc::new(Session::from_config(
        cfg,
        history,
        Arc::new(notifier::ConsoleNotifier),
        Arc::new(clipboard::Osc52Clipboard),
    )))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell, &mut Cli::command());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        if let CliCommand::Qualities = cli.command {
            return run_qualities(cfg.default_quality);
        }
        let session = build_session(&cfg)?;

        match cli.command {
            CliCommand::Process { url } => run_process(&session, &url).await?,
            CliCommand::Download { url, quality } => {
                let quality = quality.unwrap_or(cfg.default_quality);
                run_download(Arc::clone(&session), &url, quality).await?;
            }
            CliCommand::History => run_history(&session)?,
            CliCommand::ClearHistory => run_clear_history(&session)?,
            CliCommand::Copy { index } => run_copy(&session, index)?,
            CliCommand::Qualities | CliCommand::Completions { .. } => {}
        }

        session.dispose();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
