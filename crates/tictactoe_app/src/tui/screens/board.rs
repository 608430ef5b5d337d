//! In-game screen: the board, the status line, the result modal and the confetti.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use std::time::Duration;
use tictactoe_confetti::{Celebration, Clock, SystemClock};
use tictactoe_engine::{GameSession, MoveOutcome, PlayerNames, Position, Verdict};
use tracing::{debug, info, instrument};

use crate::config::{AnnouncementDelays, AppConfig, ConfettiSettings};
use crate::tui::input::{digit_position, is_interrupt, move_cursor};
use crate::tui::screen::{IDLE_POLL, Screen, ScreenTransition};
use crate::tui::ui::{ConfettiLayer, draw_board, draw_help, draw_modal, draw_status, draw_title};

/// A game in progress, and the celebration after it.
#[derive(Debug)]
pub struct BoardScreen<C: Clock + Clone = SystemClock> {
    session: GameSession,
    celebration: Celebration<C>,
    clock: C,
    cursor: Position,
    announcement_due: Option<Duration>,
    modal: Option<String>,
    delays: AnnouncementDelays,
    confetti: ConfettiSettings,
}

impl<C: Clock + Clone> BoardScreen<C> {
    /// Starts a game between `names` on a terminal of `columns` x `rows`.
    #[instrument(skip(config, clock))]
    pub fn new(names: PlayerNames, config: &AppConfig, clock: C, columns: u16, rows: u16) -> Self {
        let mut session = GameSession::new();
        session.start(names);
        let celebration = Celebration::new(
            config.confetti().celebration(),
            config.confetti().viewport(columns, rows),
            clock.clone(),
        );
        Self {
            session,
            celebration,
            clock,
            cursor: Position::Center,
            announcement_due: None,
            modal: None,
            delays: config.announcement().clone(),
            confetti: config.confetti().clone(),
        }
    }

    /// The game.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The celebration.
    pub fn celebration(&self) -> &Celebration<C> {
        &self.celebration
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Result announcement, once it is showing.
    pub fn modal(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    /// Plays at `pos` and reacts to the outcome.
    #[instrument(skip(self))]
    pub fn play(&mut self, pos: Position) -> MoveOutcome {
        self.cursor = pos;
        let outcome = self.session.apply_move(pos);
        match outcome.verdict() {
            Some(Verdict::Won(win)) => {
                info!(winner = %win.player, "Game won, starting celebration");
                self.celebration.start();
                self.schedule_announcement(self.delays.win());
            }
            Some(Verdict::Draw) => {
                info!("Game drawn");
                self.schedule_announcement(self.delays.draw());
            }
            Some(Verdict::Continue { .. }) => {}
            None => debug!(?outcome, "Move ignored"),
        }
        outcome
    }

    /// Clears the board for another game between the same players.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!("New game");
        self.celebration.stop();
        self.session.restart();
        self.announcement_due = None;
        self.modal = None;
    }

    /// Stops the celebration before leaving the screen.
    pub fn leave(&mut self) {
        self.celebration.stop();
        self.announcement_due = None;
    }

    fn schedule_announcement(&mut self, delay: Duration) {
        self.announcement_due = Some(self.clock.now() + delay);
        debug!(delay_ms = delay.as_millis() as u64, "Announcement scheduled");
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => {
                self.new_game();
                ScreenTransition::Stay
            }
            KeyCode::Esc => {
                self.leave();
                ScreenTransition::BackToNameEntry
            }
            KeyCode::Char('q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

impl<C: Clock + Clone> Screen for BoardScreen<C> {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let names = self.session.names();
        draw_title(frame, chunks[0], &format!("{} (X) vs {} (O)", names.x(), names.o()));

        let cursor = self.session.is_active().then_some(self.cursor);
        draw_board(
            frame,
            chunks[1],
            self.session.board(),
            cursor,
            *self.session.winning_line(),
        );
        draw_status(frame, chunks[2], &self.session);
        draw_help(
            frame,
            chunks[3],
            "Arrows: Move | Enter/1-9: Place | r: Restart | Esc: Names | q: Quit",
        );

        if let Some(message) = &self.modal {
            draw_modal(frame, area, message);
        }

        frame.render_widget(
            ConfettiLayer::new(
                self.celebration.particles(),
                *self.confetti.cell_width(),
                *self.confetti.cell_height(),
            ),
            area,
        );
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if is_interrupt(&key) {
            self.leave();
            return ScreenTransition::Quit;
        }
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.play(self.cursor);
            }
            KeyCode::Char('r') => self.new_game(),
            KeyCode::Char('q') => return ScreenTransition::Quit,
            KeyCode::Esc => {
                self.leave();
                return ScreenTransition::BackToNameEntry;
            }
            code => {
                if let Some(pos) = digit_position(code) {
                    self.play(pos);
                }
            }
        }
        ScreenTransition::Stay
    }

    fn on_tick(&mut self) {
        self.celebration.poll();
        if let Some(due) = self.announcement_due
            && self.clock.now() >= due
        {
            self.announcement_due = None;
            self.modal = self.session.result_message();
            info!(message = ?self.modal, "Showing result");
        }
    }

    #[instrument(skip(self))]
    fn on_resize(&mut self, columns: u16, rows: u16) {
        self.celebration
            .resize(self.confetti.viewport(columns, rows));
    }

    fn poll_timeout(&self) -> Duration {
        let now = self.clock.now();
        let announcement = self.announcement_due.map(|due| due.saturating_sub(now));
        [self.celebration.until_next(), announcement]
            .into_iter()
            .flatten()
            .fold(IDLE_POLL, Duration::min)
    }
}
