use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::signal;
use wordnote_config::Config;
use wordnote_store::ExportFormat;

pub mod capture;
pub mod commands;
pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod status;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "Translate selections and keep a dated vocabulary log", long_about = None)]
struct Cli {
    /// Profile to load from the profiles directory
    #[arg(short, long, global = true, default_value = profile::MAIN_PROFILE)]
    profile: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read selections and commands from stdin (default)
    Watch,
    /// Translate text once and save it for today
    Translate {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the entries of a day (today by default)
    Day { date: Option<String> },
    /// Show the calendar of a month (current by default)
    Month {
        year: Option<i32>,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Change the source or translation of an entry
    Edit {
        id: String,
        date: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        translation: Option<String>,
    },
    /// Delete an entry
    Remove { id: String, date: String },
    /// Write one day as CSV or TXT
    Export {
        date: Option<String>,
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Cycle which column the day view hides
    HideMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr, stdout is the UI
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = profile::wordnote_root();
    profile::init_user_config(&root)?;
    let config = profile::load_user_profile(&root, &cli.profile)?.with_env();
    let capacity = config.channel_capacity;

    let state = Arc::new(AppState::init(&cli.profile, root, config)?);

    let result = match cli.command.unwrap_or(Command::Watch) {
        Command::Watch => watch(state.clone(), capacity).await,
        Command::Translate { text } => commands::translate(&state, &text.join(" ")).await,
        Command::Day { date } => commands::day(&state, date.as_deref()).await,
        Command::Month { year, month } => commands::month(&state, year, month).await,
        Command::Edit {
            id,
            date,
            source,
            translation,
        } => commands::edit(&state, &id, &date, source, translation).await,
        Command::Remove { id, date } => commands::remove(&state, &id, &date).await,
        Command::Export { date, format, out } => {
            commands::export(&state, date.as_deref(), format, out).await
        }
        Command::HideMode => commands::hide_mode(&state).await,
    };

    state.shutdown().await;
    result
}

async fn watch(state: Arc<AppState>, capacity: usize) -> Result<()> {
    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    Ok(())
}
