//! Screen trait and transition type for the game's screen state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;
use tictactoe_engine::PlayerNames;

/// Poll timeout used when a screen has nothing animated.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`GameController`](super::GameController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Begin a game with the entered names.
    StartGame {
        /// Resolved player names.
        names: PlayerNames,
    },
    /// Return to name entry.
    BackToNameEntry,
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    /// Advances time-driven state. Called once per loop iteration.
    fn on_tick(&mut self) {}

    /// Reacts to a terminal resize.
    fn on_resize(&mut self, _columns: u16, _rows: u16) {}

    /// How long the controller may block waiting for input.
    fn poll_timeout(&self) -> Duration {
        IDLE_POLL
    }
}
