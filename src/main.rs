//! Spy Game - CLI entry point

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use spy_game::GameConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            players,
            minutes,
            config,
        } => run_play(config, players, minutes).await,
        Command::Words { config } => print_words(&config),
    }
}

/// Run the game TUI
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    players: Option<usize>,
    minutes: Option<u32>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(players) = players {
        config = config.with_players(players);
    }
    if let Some(minutes) = minutes {
        config = config.with_minutes(minutes);
    }
    config.validate()?;

    initialize_file_tracing(config.log_file())?;
    info!(
        players = config.default_players(),
        minutes = ?config.default_minutes(),
        "Starting spy game"
    );

    spy_game::run_tui(config).await
}

/// Print the active vocabulary, one word per line
fn print_words(config_path: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(config_path)?;
    for word in config.vocabulary()?.words() {
        println!("{}", word);
    }
    Ok(())
}

/// Send logs to a file so they don't interfere with the TUI
fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,spy_game=debug,spy_round=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
