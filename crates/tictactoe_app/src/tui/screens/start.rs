//! Name entry screen shown before the first game.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{DEFAULT_O_NAME, DEFAULT_X_NAME, Player, PlayerNames};
use tracing::{debug, info, instrument};

use crate::config::PlayerDefaults;
use crate::tui::input::is_interrupt;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{center_rect, draw_help, draw_title, player_color};

/// Longest name accepted from the keyboard.
pub const MAX_NAME_LEN: usize = 24;

/// Two name fields, one per player.
#[derive(Debug, Clone, Getters)]
pub struct NameEntryScreen {
    x_input: String,
    o_input: String,
    focus: Player,
}

impl NameEntryScreen {
    /// Creates the screen with pre-filled names.
    #[instrument(skip(defaults))]
    pub fn new(defaults: &PlayerDefaults) -> Self {
        debug!("Initializing NameEntryScreen");
        Self {
            x_input: defaults.x().clone(),
            o_input: defaults.o().clone(),
            focus: Player::X,
        }
    }

    /// Creates the screen showing the names of the previous game.
    pub fn with_names(names: &PlayerNames) -> Self {
        Self {
            x_input: names.x().clone(),
            o_input: names.o().clone(),
            focus: Player::X,
        }
    }

    /// Names as they would be resolved now.
    pub fn names(&self) -> PlayerNames {
        PlayerNames::from_input(&self.x_input, &self.o_input)
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Player::X => &mut self.x_input,
            Player::O => &mut self.o_input,
        }
    }

    fn draw_input(&self, frame: &mut Frame, area: ratatui::layout::Rect, player: Player) {
        let (value, placeholder) = match player {
            Player::X => (&self.x_input, DEFAULT_X_NAME),
            Player::O => (&self.o_input, DEFAULT_O_NAME),
        };
        let focused = self.focus == player;
        let border = if focused {
            Style::default().fg(player_color(player))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if value.is_empty() && !focused {
            Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
        } else if focused {
            Paragraph::new(format!("{}_", value)).style(Style::default().fg(Color::White))
        } else {
            Paragraph::new(value.as_str()).style(Style::default().fg(Color::White))
        };
        let title = format!("Player {} name", player.mark());
        frame.render_widget(
            text.block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            ),
            area,
        );
    }
}

impl Screen for NameEntryScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        draw_title(frame, chunks[0], "Tic Tac Toe");

        let form = center_rect(chunks[1], 40, 6);
        let fields = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(form);
        self.draw_input(frame, fields[0], Player::X);
        self.draw_input(frame, fields[1], Player::O);

        draw_help(frame, chunks[2], "Tab: Switch | Enter: Next/Start | Esc: Quit");
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if is_interrupt(&key) {
            return ScreenTransition::Quit;
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                let input = self.focused_input();
                if input.chars().count() < MAX_NAME_LEN {
                    input.push(c);
                }
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                ScreenTransition::Stay
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.opponent();
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.focus {
                Player::X => {
                    self.focus = Player::O;
                    ScreenTransition::Stay
                }
                Player::O => {
                    let names = self.names();
                    info!(x = %names.x(), o = %names.o(), "Names entered");
                    ScreenTransition::StartGame { names }
                }
            },
            KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
