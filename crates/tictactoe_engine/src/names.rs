//! Display names for the two seats.

use super::types::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Name shown for X when none is entered.
pub const DEFAULT_X_NAME: &str = "Player X";
/// Name shown for O when none is entered.
pub const DEFAULT_O_NAME: &str = "Player O";

/// Resolved names for both players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerNames {
    /// Name for player X.
    x: String,
    /// Name for player O.
    o: String,
}

impl PlayerNames {
    /// Resolves raw input: trims whitespace and falls back to the default for blank entries.
    #[instrument]
    pub fn from_input(x: &str, o: &str) -> Self {
        let names = Self {
            x: resolve(x, DEFAULT_X_NAME),
            o: resolve(o, DEFAULT_O_NAME),
        };
        debug!(x = %names.x, o = %names.o, "Resolved player names");
        names
    }

    /// Name of the given player.
    pub fn name_for(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            x: DEFAULT_X_NAME.to_string(),
            o: DEFAULT_O_NAME.to_string(),
        }
    }
}

fn resolve(raw: &str, fallback: &str) -> String {
    match raw.trim() {
        "" => fallback.to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_fall_back() {
        let names = PlayerNames::from_input("", "   \t");
        assert_eq!(names, PlayerNames::default());
    }

    #[test]
    fn test_names_are_trimmed() {
        let names = PlayerNames::from_input("  Ada ", "Grace");
        assert_eq!(names.name_for(Player::X), "Ada");
        assert_eq!(names.name_for(Player::O), "Grace");
    }
}
