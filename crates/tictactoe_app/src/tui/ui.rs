//! Stateless rendering helpers for the board, status line, result modal and confetti.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use tictactoe_confetti::Particle;
use tictactoe_engine::{Board, GameSession, Phase, Player, Position, Square, WinLine};

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Color used for a player's mark and name.
pub fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    }
}

/// Renders the title bar.
pub fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// Renders the 3x3 grid centered in `area`.
///
/// `cursor` is drawn only when given; cells of `winning` are highlighted.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    winning: Option<WinLine>,
) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(rows[row * 2]);

        for col in 0..3 {
            if let Some(pos) = Position::from_index(row * 3 + col) {
                let highlighted = winning.is_some_and(|line| line.contains(pos));
                draw_cell(frame, cols[col * 2], board.get(pos), pos, cursor == Some(pos), highlighted);
            }
            if col < 2 {
                let sep = Paragraph::new(vec![Line::from("│"); CELL_HEIGHT as usize])
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(sep, cols[col * 2 + 1]);
            }
        }

        if row < 2 {
            let sep = Paragraph::new("─".repeat(BOARD_WIDTH as usize))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    square: Square,
    pos: Position,
    under_cursor: bool,
    highlighted: bool,
) {
    let (symbol, mut style) = match square {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(player) => (
            player.mark().to_string(),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ),
    };

    if highlighted {
        style = style.bg(Color::Yellow).fg(Color::Black);
    } else if under_cursor {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let lines = vec![Line::from(""), Line::from(symbol), Line::from("")];
    let paragraph = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Renders the status line, with the player's name in the player's color.
pub fn draw_status(frame: &mut Frame, area: Rect, session: &GameSession) {
    let color = match session.phase() {
        Phase::InProgress | Phase::Won => player_color(*session.active_player()),
        Phase::Drawn | Phase::AwaitingStart => Color::Yellow,
    };
    let status = Paragraph::new(Line::from(Span::styled(
        session.status_text(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Renders a one-line key reference.
pub fn draw_help(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

/// Renders the result announcement over the board.
pub fn draw_modal(frame: &mut Frame, area: Rect, message: &str) {
    let modal_area = center_rect(area, 40, 7);
    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "n/Enter: New Game | Esc: Names | q: Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let modal = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Game Over")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(modal, modal_area);
}

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

/// Paints particles over whatever is already in the buffer.
///
/// Particle coordinates are surface units; one terminal cell covers
/// `cell_width` x `cell_height` of them. Only the cells a particle lands on
/// are touched, so the board and modal stay visible underneath.
#[derive(Debug, Clone, Copy)]
pub struct ConfettiLayer<'a> {
    particles: &'a [Particle],
    cell_width: f32,
    cell_height: f32,
}

impl<'a> ConfettiLayer<'a> {
    /// Creates a layer for `particles`.
    pub fn new(particles: &'a [Particle], cell_width: f32, cell_height: f32) -> Self {
        Self {
            particles,
            cell_width,
            cell_height,
        }
    }

    /// Terminal cell a particle lands on, relative to the layer's origin.
    pub fn cell_of(&self, particle: &Particle) -> Option<(u16, u16)> {
        if particle.x < 0.0 || particle.y < 0.0 {
            return None;
        }
        let col = (particle.x / self.cell_width).floor();
        let row = (particle.y / self.cell_height).floor();
        if col > f32::from(u16::MAX) || row > f32::from(u16::MAX) {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

/// Glyph for a particle: larger pieces are solid, spinning ones alternate shape.
pub fn particle_glyph(particle: &Particle) -> &'static str {
    let flat = (particle.rotation.rem_euclid(180.0) / 45.0) as u32 % 2 == 0;
    match (particle.size, flat) {
        (s, true) if s >= 10.0 => "▬",
        (s, false) if s >= 10.0 => "▮",
        (s, true) if s >= 4.0 => "▪",
        (s, false) if s >= 4.0 => "◆",
        _ => "·",
    }
}

impl Widget for ConfettiLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for particle in self.particles {
            let Some((col, row)) = self.cell_of(particle) else {
                continue;
            };
            if col >= area.width || row >= area.height {
                continue;
            }
            let (r, g, b) = particle.color.rgb();
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(particle_glyph(particle));
                cell.set_fg(Color::Rgb(r, g, b));
            }
        }
    }
}
