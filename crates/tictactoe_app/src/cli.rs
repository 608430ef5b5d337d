//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe with a confetti finish", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when it is missing)
    #[arg(short, long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Pre-filled name for X
        #[arg(long)]
        player_x: Option<String>,

        /// Pre-filled name for O
        #[arg(long)]
        player_o: Option<String>,
    },

    /// Replay a move list without a terminal and print the result
    Simulate {
        /// Cell indices 0-8 in play order, e.g. "0,3,1,4,2"
        #[arg(short, long)]
        moves: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Milliseconds of confetti spawning after a win
        #[arg(long, default_value = "1000")]
        celebrate_ms: u64,

        /// Name for X
        #[arg(long)]
        player_x: Option<String>,

        /// Name for O
        #[arg(long)]
        player_o: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
