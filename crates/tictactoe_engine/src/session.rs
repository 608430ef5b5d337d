//! Session state machine for a two-player game.
//!
//! A [`GameSession`] owns the board, whose turn it is and the session phase.
//! Moves that cannot be played (occupied square, inactive session, index off
//! the board) are ignored rather than reported as errors: the caller gets a
//! [`MoveOutcome::Ignored`] and the session is left untouched.
//!
//! ```text
//! AwaitingStart --start--> InProgress --move--> InProgress
//!                            |  ^
//!               line matched |  | restart
//!                            v  |
//!                       Won / Drawn
//! ```

use super::names::PlayerNames;
use super::position::Position;
use super::rules::{Win, WinLine, find_win, is_full};
use super::types::{Board, Player, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Phase of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// Names not yet entered; no moves accepted.
    #[display("awaiting start")]
    AwaitingStart,
    /// Moves are accepted.
    #[display("in progress")]
    InProgress,
    /// A player completed a line.
    #[display("won")]
    Won,
    /// The board filled up without a completed line.
    #[display("drawn")]
    Drawn,
}

/// Why a move was ignored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Rejection {
    /// The session is not accepting moves.
    #[display("session is not active")]
    Inactive,
    /// The square already holds a mark.
    #[display("square {} is occupied", _0)]
    Occupied(Position),
    /// The cell index is not on the board.
    #[display("index {} is off the board", _0)]
    OutOfRange(usize),
}

/// Result of evaluating the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No terminal condition; `next` is now to move.
    Continue {
        /// The player whose turn it now is.
        next: Player,
    },
    /// A line was completed.
    Won(Win),
    /// The board is full and no line was completed.
    Draw,
}

impl Verdict {
    /// True for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Continue { .. })
    }
}

/// Outcome of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The move was not played; nothing changed.
    Ignored(Rejection),
    /// The move was played.
    Played {
        /// Square that received the mark.
        position: Position,
        /// Player who moved.
        player: Player,
        /// Board evaluation after the move.
        verdict: Verdict,
    },
}

impl MoveOutcome {
    /// The verdict, if the move was played.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            MoveOutcome::Ignored(_) => None,
            MoveOutcome::Played { verdict, .. } => Some(*verdict),
        }
    }

    /// The winning line, if this move won the game.
    pub fn winning_line(&self) -> Option<WinLine> {
        match self.verdict() {
            Some(Verdict::Won(win)) => Some(win.line),
            _ => None,
        }
    }
}

/// One game between two named players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSession {
    /// The board.
    board: Board,
    /// Player whose turn it is (or who just won).
    active_player: Player,
    /// Current phase.
    phase: Phase,
    /// Player names.
    names: PlayerNames,
    /// Completed line, once the game is won.
    winning_line: Option<WinLine>,
    /// Positions played, in order.
    history: Vec<Position>,
}

impl GameSession {
    /// Creates a session waiting for names.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Player::X,
            phase: Phase::AwaitingStart,
            names: PlayerNames::default(),
            winning_line: None,
            history: Vec::new(),
        }
    }

    /// Creates an in-progress session from an arbitrary board.
    ///
    /// The board is not checked for balance, so positions that cannot arise
    /// from play (several completed lines, for instance) can be examined.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, active_player: Player) -> Self {
        Self {
            board,
            active_player,
            phase: Phase::InProgress,
            names: PlayerNames::default(),
            winning_line: None,
            history: Vec::new(),
        }
    }

    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Stores the names and begins play with X to move.
    #[instrument(skip(self))]
    pub fn start(&mut self, names: PlayerNames) {
        info!(x = %names.x(), o = %names.o(), "Starting session");
        self.names = names;
        self.restart();
    }

    /// Clears the board and begins a fresh game with the same names.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn restart(&mut self) {
        debug!("Restarting session");
        self.board = Board::new();
        self.active_player = Player::X;
        self.phase = Phase::InProgress;
        self.winning_line = None;
        self.history.clear();
    }

    /// Plays the active player's mark at a raw cell index (0-8).
    #[instrument(skip(self))]
    pub fn apply_index(&mut self, index: usize) -> MoveOutcome {
        match Position::from_index(index) {
            Some(pos) => self.apply_move(pos),
            None => {
                debug!(index, "Ignoring off-board index");
                MoveOutcome::Ignored(Rejection::OutOfRange(index))
            }
        }
    }

    /// Plays the active player's mark at `pos`, then evaluates the board.
    ///
    /// Returns [`MoveOutcome::Ignored`] without touching any state when the
    /// session is inactive or the square is taken.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn apply_move(&mut self, pos: Position) -> MoveOutcome {
        if !self.is_active() {
            debug!(phase = %self.phase, "Ignoring move on inactive session");
            return MoveOutcome::Ignored(Rejection::Inactive);
        }
        if !self.board.is_empty(pos) {
            debug!("Ignoring move on occupied square");
            return MoveOutcome::Ignored(Rejection::Occupied(pos));
        }

        let player = self.active_player;
        self.board.set(pos, Square::Occupied(player));
        self.history.push(pos);

        let verdict = self.evaluate_terminal();
        MoveOutcome::Played {
            position: pos,
            player,
            verdict,
        }
    }

    /// Evaluates the board for a terminal condition.
    ///
    /// In progress: a completed line ends the game as [`Phase::Won`], a full
    /// board ends it as [`Phase::Drawn`], otherwise the turn passes to the
    /// other player. In any other phase the current result is reported and
    /// nothing changes.
    #[instrument(skip(self))]
    pub fn evaluate_terminal(&mut self) -> Verdict {
        match self.phase {
            Phase::InProgress => {}
            Phase::Won => {
                if let Some(line) = self.winning_line {
                    return Verdict::Won(Win {
                        player: self.active_player,
                        line,
                    });
                }
            }
            Phase::Drawn => return Verdict::Draw,
            Phase::AwaitingStart => {
                return Verdict::Continue {
                    next: self.active_player,
                };
            }
        }

        if let Some(win) = find_win(&self.board) {
            info!(winner = %win.player, line = ?win.line.indices(), "Line completed");
            self.active_player = win.player;
            self.winning_line = Some(win.line);
            self.phase = Phase::Won;
            return Verdict::Won(win);
        }

        if is_full(&self.board) {
            info!("Board full, game drawn");
            self.phase = Phase::Drawn;
            return Verdict::Draw;
        }

        self.active_player = self.active_player.opponent();
        Verdict::Continue {
            next: self.active_player,
        }
    }

    /// The winning player, once the game is won.
    pub fn winner(&self) -> Option<Player> {
        (self.phase == Phase::Won).then_some(self.active_player)
    }

    /// Status line for the current phase.
    pub fn status_text(&self) -> String {
        let name = self.names.name_for(self.active_player);
        match self.phase {
            Phase::AwaitingStart => "Enter player names to start".to_string(),
            Phase::InProgress => format!("{name}'s Turn"),
            Phase::Won => format!("{name} Wins!"),
            Phase::Drawn => "Draw!".to_string(),
        }
    }

    /// Announcement shown once the game is over.
    pub fn result_message(&self) -> Option<String> {
        match self.phase {
            Phase::Won => Some(format!(
                "{} Wins!",
                self.names.name_for(self.active_player)
            )),
            Phase::Drawn => Some("It's a Draw!".to_string()),
            Phase::AwaitingStart | Phase::InProgress => None,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
