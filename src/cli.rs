//! Command-line interface for spy_game.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spy Game - find the player who doesn't know the word
#[derive(Parser, Debug)]
#[command(name = "spy_game")]
#[command(about = "Pass-the-terminal spy party game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a round in the terminal
    Play {
        /// Pre-fill the number of players
        #[arg(short, long)]
        players: Option<usize>,

        /// Pre-fill the round length in minutes (0 for no timer)
        #[arg(short, long)]
        minutes: Option<u32>,

        /// Path to the game config file
        #[arg(short, long, default_value = "spy_game.toml")]
        config: PathBuf,
    },

    /// Print the words secrets are drawn from
    Words {
        /// Path to the game config file
        #[arg(short, long, default_value = "spy_game.toml")]
        config: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::parse_from(["spy_game", "play"]);
        match cli.command {
            Command::Play {
                players,
                minutes,
                config,
            } => {
                assert_eq!(players, None);
                assert_eq!(minutes, None);
                assert_eq!(config, PathBuf::from("spy_game.toml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_play_overrides() {
        let cli = Cli::parse_from(["spy_game", "play", "-p", "6", "--minutes", "0"]);
        assert!(matches!(
            cli.command,
            Command::Play {
                players: Some(6),
                minutes: Some(0),
                ..
            }
        ));
    }

    #[test]
    fn test_words_custom_config() {
        let cli = Cli::parse_from(["spy_game", "words", "--config", "party.toml"]);
        assert!(matches!(cli.command, Command::Words { config } if config == PathBuf::from("party.toml")));
    }
}
