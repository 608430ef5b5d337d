//! Tic-tac-toe in the terminal, with confetti for the winner.
//!
//! # Architecture
//!
//! - **Config**: [`AppConfig`] loaded from TOML with defaults for every field
//! - **Simulate**: headless replay of a move list via [`run_simulation`]
//! - **TUI**: a [`GameController`] switching between name entry and the board
//!
//! Game rules live in `tictactoe_engine`; particles and their scheduling live
//! in `tictactoe_confetti`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod simulate;
pub mod tui;

pub use config::{AnnouncementDelays, AppConfig, ConfettiSettings, ConfigError, PlayerDefaults};
pub use simulate::{
    ConfettiSummary, MoveListError, MoveRecord, SimulationReport, parse_moves, run_simulation,
};
pub use tui::{BoardScreen, GameController, NameEntryScreen, run_tui};
