use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpShortenerClient, ShortenerController};
use shared::domain::{DeleteOutcome, ShortKey};
use tracing_subscriber::EnvFilter;

mod config;
mod shell;
mod terminal;

use terminal::{SystemClipboard, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "shortener", about = "Shorten, resolve and delete URLs on a shortening server")]
struct Args {
    /// Base URL of the shortening server.
    #[arg(long)]
    server_url: Option<String>,
    /// How long notifications stay visible, in milliseconds.
    #[arg(long)]
    notify_ms: Option<u64>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Config file; `shortener.toml` in the working directory is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how many URLs the server holds.
    Count,
    Shorten {
        url: String,
    },
    Delete {
        key: String,
    },
    Resolve {
        key: String,
    },
    /// Read commands from stdin (the default).
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(notify_ms) = args.notify_ms {
        settings.notify_duration_ms = notify_ms;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }
    let api = HttpShortenerClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to set up the server client")?;
    tracing::debug!(server = %api.base_url(), ?settings, "loaded settings");
    let controller = ShortenerController::new(
        Arc::new(api),
        Arc::new(TerminalView::default()),
        Arc::new(SystemClipboard::spawn()),
        settings.notify_duration(),
    );

    let succeeded = run_command(&controller, args.command.unwrap_or(Command::Interactive)).await?;

    // The notification line already told the user what went wrong.
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one command; `false` when the action itself failed.
async fn run_command(controller: &ShortenerController, command: Command) -> Result<bool> {
    Ok(match command {
        Command::Count => {
            controller.refresh_count().await;
            true
        }
        Command::Shorten { url } => controller.shorten(&url).await.is_some(),
        Command::Delete { key } => {
            controller.delete(&ShortKey::new(key)).await != DeleteOutcome::Failed
        }
        Command::Resolve { key } => controller.resolve(&ShortKey::new(key)).await.is_some(),
        Command::Interactive => {
            shell::run(controller).await?;
            true
        }
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
