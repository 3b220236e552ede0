//! Strictly Turns - CLI
//!
//! Plays exactly one game between a threaded X and a threaded O and prints
//! the board after every accepted move.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Format};
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};
use strictly_turns::{GameEvent, GameState, play_match, player_seeds};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the game.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

/// Plays one game and prints it in the requested format.
#[instrument(skip_all, fields(format = ?cli.format))]
fn run(cli: Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, x = %cli.x_strategy, o = %cli.o_strategy, "Starting game");
    let [x_seed, o_seed] = player_seeds(seed);

    let (tx, rx) = std::sync::mpsc::channel();
    let game = GameState::with_events(tx);

    let show_moves = cli.format == Format::Text && !cli.quiet;
    let printer = thread::Builder::new()
        .name("board-printer".to_string())
        .spawn(move || print_moves(rx, show_moves))
        .context("Failed to spawn board printer")?;

    let result = play_match(
        &game,
        cli.x_strategy.selector(x_seed),
        cli.o_strategy.selector(o_seed),
    );
    // Dropping the game closes the event channel so the printer drains and exits.
    drop(game);
    printer
        .join()
        .map_err(|_| anyhow!("Board printer panicked"))?;

    let report = result.context("Match aborted")?;
    match cli.format {
        Format::Text => {
            if cli.quiet {
                println!("{}", report.board());
            }
            println!("{}", report.result_line());
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Prints the board after every accepted move until the channel closes.
fn print_moves(events: Receiver<GameEvent>, show_moves: bool) {
    for event in events {
        match event {
            GameEvent::MoveAccepted { ply, mv, board } => {
                debug!(ply, %mv, "Move event");
                if show_moves {
                    println!("{}", board);
                }
            }
            GameEvent::GameOver { status } => {
                debug!(%status, "Game over event");
            }
            GameEvent::Aborted { player } => {
                debug!(%player, "Abort event");
            }
        }
    }
}

/// Seed derived from the wall clock.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        // Past u64 nanoseconds (year 2554) seconds are still a fine seed.
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or_else(|_| elapsed.as_secs()))
        .unwrap_or_default()
}
