//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three positions that win the game when they all hold the same mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// The positions of this line, in board order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// True if `pos` is one of the three cells.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// All winning lines, in the order they are checked: rows, columns, diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinLine([
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ]),
    WinLine([
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ]),
    // Columns
    WinLine([
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ]),
    WinLine([
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ]),
    WinLine([
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ]),
    // Diagonals
    WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// A completed line and the player who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Owner of the line.
    pub player: Player,
    /// The completed line.
    pub line: WinLine,
}

/// Finds the first completed line in [`WIN_LINES`] order.
///
/// Boards with several completed lines report only the first one.
#[instrument(skip(board))]
pub fn find_win(board: &Board) -> Option<Win> {
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = line.positions();
        let player = board.get(a).player()?;
        (board.get(b).player() == Some(player) && board.get(c).player() == Some(player))
            .then_some(Win {
                player,
                line: *line,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(find_win(&Board::new()), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for player in [Player::X, Player::O] {
            for line in WIN_LINES {
                let mut board = Board::new();
                for pos in line.positions() {
                    board.set(pos, Square::Occupied(player));
                }
                assert_eq!(find_win(&board), Some(Win { player, line }));
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::O));
        board.set(Position::TopRight, Square::Occupied(Player::X));
        assert_eq!(find_win(&board), None);
    }

    #[test]
    fn test_first_line_in_order_wins_ties() {
        // X X X / X . . / X . .  completes row 0 and column 0.
        let mut board = Board::new();
        for pos in [
            Position::TopLeft,
            Position::TopCenter,
            Position::TopRight,
            Position::MiddleLeft,
            Position::BottomLeft,
        ] {
            board.set(pos, Square::Occupied(Player::X));
        }
        let win = find_win(&board).expect("two lines complete");
        assert_eq!(win.line.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_line_contains() {
        assert!(WIN_LINES[6].contains(Position::Center));
        assert!(!WIN_LINES[6].contains(Position::TopRight));
    }
}
