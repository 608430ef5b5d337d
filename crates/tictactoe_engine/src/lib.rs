//! Tic-tac-toe engine - the session state machine behind the game.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Square`], [`Player`] and typed [`Position`]s
//! - **Rules**: win detection over the fixed [`WIN_LINES`] and draw detection
//! - **Session**: [`GameSession`] applies moves, reports [`Verdict`]s and
//!   tracks the [`Phase`]
//!
//! The engine owns no presentation. Everything a front end shows (status line,
//! highlighted cells, result announcement) is read back from the session.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameSession, PlayerNames, Verdict};
//!
//! let mut session = GameSession::new();
//! session.start(PlayerNames::from_input("Ada", ""));
//! for index in [0, 3, 1, 4] {
//!     session.apply_index(index);
//! }
//! let outcome = session.apply_index(2);
//! assert!(matches!(outcome.verdict(), Some(Verdict::Won(_))));
//! assert_eq!(session.status_text(), "Ada Wins!");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod names;
mod position;
mod rules;
mod session;
mod types;

pub use names::{DEFAULT_O_NAME, DEFAULT_X_NAME, PlayerNames};
pub use position::Position;
pub use rules::{WIN_LINES, Win, WinLine, find_win, is_full};
pub use session::{GameSession, MoveOutcome, Phase, Rejection, Verdict};
pub use types::{Board, Player, Square};
