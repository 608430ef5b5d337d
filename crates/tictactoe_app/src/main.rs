//! Tic-tac-toe - terminal game and headless replay.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use tictactoe_app::{AppConfig, parse_moves, run_simulation, run_tui};
use tictactoe_engine::PlayerNames;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { player_x, player_o } => {
            config.override_players(player_x, player_o);
            run_tui(config).await
        }
        Command::Simulate {
            moves,
            json,
            celebrate_ms,
            player_x,
            player_o,
        } => run_simulate(&config, &moves, json, celebrate_ms, player_x, player_o),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Replays a move list and prints the report.
#[instrument(skip(config))]
fn run_simulate(
    config: &AppConfig,
    moves: &str,
    json: bool,
    celebrate_ms: u64,
    player_x: Option<String>,
    player_o: Option<String>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let moves = parse_moves(moves)?;
    let names = PlayerNames::from_input(
        player_x.as_deref().unwrap_or(config.players().x()),
        player_o.as_deref().unwrap_or(config.players().o()),
    );
    info!(moves = moves.len(), "Running simulation");

    let report = run_simulation(&moves, names, config, Duration::from_millis(celebrate_ms));
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
