//! Command-line interface for strictly_turns.

use clap::{Parser, ValueEnum};
use strictly_turns::Strategy;

/// Strictly Turns - two threaded players take alternating turns at tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "strictly_turns")]
#[command(about = "Plays one game of tic-tac-toe between two threads", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Master random seed (defaults to the current time)
    #[arg(long, env = "STRICTLY_TURNS_SEED")]
    pub seed: Option<u64>,

    /// Move-selection policy for X
    #[arg(long, value_enum, default_value_t = Strategy::Sequential)]
    pub x_strategy: Strategy,

    /// Move-selection policy for O
    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    pub o_strategy: Strategy,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only print the final board and result (text format)
    #[arg(short, long)]
    pub quiet: bool,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Boards after every move, then `Draw!` or `Winner: <symbol>`
    Text,
    /// The final match report as JSON
    Json,
}
