use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cs_platform::DirsAppDirsAdapter;

use crate::bootstrap::{self, tracing::init_tracing_subscriber};

#[derive(Debug, Parser)]
#[command(name = "clipsync", version, about = "Sync clipboard text between devices")]
pub struct Cli {
    /// Configuration file (default: <config dir>/clipsync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Watch the clipboard and sync it until Ctrl-C (default)
    Run {
        /// Use a process-local store instead of the remote one
        #[arg(long)]
        offline: bool,
    },
    /// Print the deduplicated history once
    History,
    /// Push one text as a new entry
    Push { text: String },
}

pub async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Before tracing, so RUST_LOG and SENTRY_DSN may come from .env
    let dotenv = bootstrap::load_dotenv();

    let app_dirs = match DirsAppDirsAdapter::new().get_app_dirs() {
        Ok(dirs) => Some(dirs),
        Err(err) => {
            eprintln!("Failed to resolve app directories: {err}");
            None
        }
    };
    init_tracing_subscriber(app_dirs.as_ref().map(|dirs| dirs.log_dir()).as_deref())
        .context("Failed to initialize tracing")?;

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env file"),
    }

    let default_config = app_dirs.as_ref().map(|dirs| dirs.config_file());
    let config = bootstrap::resolve_config(cli.config.as_deref(), default_config.as_deref())?;

    match cli.command.unwrap_or(Command::Run { offline: false }) {
        Command::Run { offline } => bootstrap::run_sync(config, offline).await,
        Command::History => bootstrap::print_history(config).await,
        Command::Push { text } => bootstrap::push_text(config, &text).await,
    }
}
