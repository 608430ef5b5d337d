//! Headless replay of a move list, including the celebration that follows a win.

use derive_more::{Display, Error};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;
use tictactoe_confetti::{Celebration, Clock, ManualClock};
use tictactoe_engine::{GameSession, MoveOutcome, Phase, Player, PlayerNames, Verdict};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;

/// Terminal size assumed when sizing confetti without a terminal.
pub const HEADLESS_COLUMNS: u16 = 80;
/// Terminal rows assumed when sizing confetti without a terminal.
pub const HEADLESS_ROWS: u16 = 24;

/// Error parsing a `--moves` list.
#[derive(Debug, Clone, Display, Error)]
#[display("Move list error: {} at {}:{}", message, file, line)]
pub struct MoveListError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MoveListError {
    /// Creates a new move list error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Parses cell indices separated by commas or whitespace.
///
/// Indices are not range-checked here; the session ignores off-board cells.
#[instrument]
pub fn parse_moves(input: &str) -> Result<Vec<usize>, MoveListError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<usize>().map_err(|e| {
                MoveListError::new(format!("'{}' is not a cell index: {}", token, e))
            })
        })
        .collect()
}

/// One replayed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Requested cell index.
    pub index: usize,
    /// Player who moved, if the move was accepted.
    pub player: Option<Player>,
    /// What happened.
    pub outcome: String,
}

impl MoveRecord {
    fn from_outcome(index: usize, outcome: &MoveOutcome, names: &PlayerNames) -> Self {
        match outcome {
            MoveOutcome::Ignored(rejection) => Self {
                index,
                player: None,
                outcome: format!("ignored ({})", rejection),
            },
            MoveOutcome::Played {
                player, verdict, ..
            } => {
                let outcome = match verdict {
                    Verdict::Continue { next } => format!("{}'s turn", names.name_for(*next)),
                    Verdict::Won(win) => format!("{} wins", names.name_for(win.player)),
                    Verdict::Draw => "draw".to_string(),
                };
                Self {
                    index,
                    player: Some(*player),
                    outcome,
                }
            }
        }
    }
}

/// Summary of the celebration that ran after a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfettiSummary {
    /// Particles spawned in total.
    pub spawned: usize,
    /// Animation steps taken.
    pub frames: u64,
    /// Largest number of particles alive at once.
    pub peak: usize,
    /// Milliseconds of spawning before it was stopped.
    pub celebrate_ms: u64,
    /// Milliseconds until the last particle expired.
    pub drained_after_ms: u64,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Resolved player names.
    pub names: PlayerNames,
    /// Per-move results.
    pub moves: Vec<MoveRecord>,
    /// Final board as text.
    pub board: String,
    /// Final phase.
    pub phase: Phase,
    /// Final status line.
    pub status: String,
    /// Result announcement, if the game ended.
    pub result: Option<String>,
    /// Delay before the announcement appears.
    pub announcement_after_ms: Option<u64>,
    /// Cells of the winning line.
    pub winning_line: Option<[usize; 3]>,
    /// Celebration summary, present after a win.
    pub confetti: Option<ConfettiSummary>,
}

impl SimulationReport {
    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (turn, record) in self.moves.iter().enumerate() {
            let who = record.player.map(|p| p.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                "{:>2}. cell {} {:<1} -> {}",
                turn + 1,
                record.index,
                who,
                record.outcome
            );
        }
        let _ = writeln!(out);
        out.push_str(&self.board);
        let _ = writeln!(out);
        let _ = writeln!(out, "Status: {}", self.status);
        if let Some(result) = &self.result {
            let delay = self.announcement_after_ms.unwrap_or_default();
            let _ = writeln!(out, "Announcement after {} ms: {}", delay, result);
        }
        if let Some(line) = self.winning_line {
            let _ = writeln!(out, "Winning line: {:?}", line);
        }
        if let Some(confetti) = &self.confetti {
            let _ = writeln!(
                out,
                "Confetti: {} spawned over {} ms, peak {}, {} frames, clear after {} ms",
                confetti.spawned,
                confetti.celebrate_ms,
                confetti.peak,
                confetti.frames,
                confetti.drained_after_ms
            );
        }
        out
    }
}

/// Replays `moves` from a fresh game.
///
/// A win runs the celebration on a manual clock: particles spawn for
/// `celebrate`, then the run continues until the last one expires.
#[instrument(skip(config), fields(moves = moves.len()))]
pub fn run_simulation(
    moves: &[usize],
    names: PlayerNames,
    config: &AppConfig,
    celebrate: Duration,
) -> SimulationReport {
    let mut session = GameSession::new();
    session.start(names);

    let mut records = Vec::with_capacity(moves.len());
    for &index in moves {
        let outcome = session.apply_index(index);
        debug!(index, ?outcome, "Replayed move");
        records.push(MoveRecord::from_outcome(index, &outcome, session.names()));
    }

    let announcement_after_ms = match session.phase() {
        Phase::Won => Some(*config.announcement().win_ms()),
        Phase::Drawn => Some(*config.announcement().draw_ms()),
        Phase::AwaitingStart | Phase::InProgress => None,
    };

    let confetti = session
        .winner()
        .map(|_| celebrate_headless(config, celebrate));

    info!(phase = %session.phase(), status = %session.status_text(), "Simulation finished");

    SimulationReport {
        names: session.names().clone(),
        moves: records,
        board: session.board().display(),
        phase: *session.phase(),
        status: session.status_text(),
        result: session.result_message(),
        announcement_after_ms,
        winning_line: session.winning_line().map(|line| line.indices()),
        confetti,
    }
}

#[instrument(skip(config))]
fn celebrate_headless(config: &AppConfig, celebrate: Duration) -> ConfettiSummary {
    let clock = ManualClock::new();
    let viewport = config.confetti().viewport(HEADLESS_COLUMNS, HEADLESS_ROWS);
    let mut party = Celebration::new(config.confetti().celebration(), viewport, clock.clone());

    party.start();
    let mut spawned = 0;
    let mut peak = 0;
    loop {
        if party.is_spawning() && clock.now() >= celebrate {
            party.stop_spawning();
        }
        let Some(mut wait) = party.until_next() else {
            break;
        };
        if party.is_spawning() {
            wait = wait.min(celebrate.saturating_sub(clock.now()));
        }
        clock.advance(wait);

        let report = party.poll();
        spawned += report.spawned;
        peak = peak.max(report.live);
    }

    let summary = ConfettiSummary {
        spawned,
        frames: party.ticks(),
        peak,
        celebrate_ms: celebrate.as_millis() as u64,
        drained_after_ms: clock.now().as_millis() as u64,
    };
    debug!(?summary, "Headless celebration drained");
    summary
}
