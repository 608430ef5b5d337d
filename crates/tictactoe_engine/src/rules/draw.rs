//! Full-board detection.

use crate::{Board, Square};
use tracing::instrument;

/// True when no square is left to play.
///
/// Callers check for a completed line first; a full board only means a draw
/// when there is none.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}
