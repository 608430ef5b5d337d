//! Game controller: the state machine driving the terminal screens.

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Terminal, backend::Backend};
use tictactoe_confetti::SystemClock;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{BoardScreen, NameEntryScreen};

/// Pause between loop iterations so the task yields to the runtime.
const LOOP_YIELD: Duration = Duration::from_millis(1);

/// Active screen in the state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Entering player names.
    NameEntry(NameEntryScreen),
    /// Playing, or celebrating.
    Board(BoardScreen),
}

impl ActiveScreen {
    fn screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::NameEntry(s) => s,
            ActiveScreen::Board(s) => s,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::NameEntry(s) => s,
            ActiveScreen::Board(s) => s,
        }
    }
}

/// Controller that drives the screen state machine.
///
/// Call [`GameController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct GameController {
    config: AppConfig,
}

impl GameController {
    /// Creates a new controller.
    #[instrument(skip(config))]
    pub fn new(config: AppConfig) -> Self {
        info!("Creating GameController");
        Self { config }
    }

    /// The first screen: name entry, pre-filled from configuration.
    pub fn initial_screen(&self) -> ActiveScreen {
        ActiveScreen::NameEntry(NameEntryScreen::new(self.config.players()))
    }

    /// Runs the event loop until the user quits.
    ///
    /// Each iteration advances the active screen's timers, redraws, then waits
    /// for input no longer than the screen's next deadline.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting game event loop");

        let mut screen = self.initial_screen();

        loop {
            screen.screen_mut().on_tick();
            terminal.draw(|f| screen.screen().render(f))?;

            if event::poll(screen.screen().poll_timeout())? {
                match event::read()? {
                    // Skip key release events (crossterm fires both press and release).
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        let transition = screen.screen_mut().handle_key(key);
                        let size = terminal.size()?;
                        screen = match self.apply_transition(
                            transition,
                            screen,
                            size.width,
                            size.height,
                        ) {
                            Some(next) => next,
                            None => {
                                info!("Quitting");
                                return Ok(());
                            }
                        };
                    }
                    Event::Resize(columns, rows) => {
                        debug!(columns, rows, "Terminal resized");
                        screen.screen_mut().on_resize(columns, rows);
                    }
                    _ => {}
                }
            }

            sleep(LOOP_YIELD).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    pub fn apply_transition(
        &self,
        transition: ScreenTransition,
        current: ActiveScreen,
        columns: u16,
        rows: u16,
    ) -> Option<ActiveScreen> {
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::StartGame { names } => {
                info!(x = %names.x(), o = %names.o(), "Navigating to Board");
                Some(ActiveScreen::Board(BoardScreen::new(
                    names,
                    &self.config,
                    SystemClock::new(),
                    columns,
                    rows,
                )))
            }

            ScreenTransition::BackToNameEntry => {
                info!("Navigating to NameEntry");
                let next = match current {
                    ActiveScreen::Board(mut board) => {
                        board.leave();
                        NameEntryScreen::with_names(board.session().names())
                    }
                    ActiveScreen::NameEntry(_) => NameEntryScreen::new(self.config.players()),
                };
                Some(ActiveScreen::NameEntry(next))
            }

            ScreenTransition::Quit => {
                if let ActiveScreen::Board(mut board) = current {
                    board.leave();
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::PlayerNames;

    #[test]
    fn test_start_game_opens_board_with_names() {
        let controller = GameController::new(AppConfig::default());
        let next = controller.apply_transition(
            ScreenTransition::StartGame {
                names: PlayerNames::from_input("Ada", "Grace"),
            },
            controller.initial_screen(),
            80,
            24,
        );
        let Some(ActiveScreen::Board(board)) = next else {
            panic!("expected board screen");
        };
        assert_eq!(board.session().status_text(), "Ada's Turn");
    }

    #[test]
    fn test_back_to_names_keeps_previous_names() {
        let controller = GameController::new(AppConfig::default());
        let board = controller
            .apply_transition(
                ScreenTransition::StartGame {
                    names: PlayerNames::from_input("Ada", ""),
                },
                controller.initial_screen(),
                80,
                24,
            )
            .expect("board");
        let next = controller.apply_transition(ScreenTransition::BackToNameEntry, board, 80, 24);
        let Some(ActiveScreen::NameEntry(entry)) = next else {
            panic!("expected name entry");
        };
        assert_eq!(entry.x_input(), "Ada");
        assert_eq!(entry.o_input(), "Player O");
    }

    #[test]
    fn test_quit_ends_loop() {
        let controller = GameController::new(AppConfig::default());
        let next =
            controller.apply_transition(ScreenTransition::Quit, controller.initial_screen(), 80, 24);
        assert!(next.is_none());
    }
}
