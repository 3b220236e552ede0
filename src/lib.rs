//! Strictly Turns - two threads, one board, strictly alternating turns.
//!
//! Each player runs on its own OS thread and blocks until it may move.
//! A single monitor owns the board, the turn marker and the game status.
//!
//! # Architecture
//!
//! - **Monitor**: [`GameState`] guards all shared state with one mutex and
//!   wakes waiters through a condition variable
//! - **Actors**: [`Actor`] waits for its turn, then drives a policy until a
//!   claim is accepted
//! - **Policies**: [`MoveSelector`] implementations choose cells
//! - **Orchestrator**: [`play_match`] runs both actors to completion
//!
//! # Example
//!
//! ```
//! use strictly_turns::{GameState, Sequential, Strategy, play_match};
//!
//! let game = GameState::new();
//! let report = play_match(
//!     &game,
//!     Box::new(Sequential::new()),
//!     Strategy::Random.selector(42),
//! )?;
//! assert!(report.status().is_over());
//! # Ok::<(), strictly_turns::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod actor;
mod games;
mod orchestrator;
mod players;

// Crate-level exports - Actors
pub use actor::{Actor, ActorReport};

// Crate-level exports - Orchestration
pub use orchestrator::{MatchReport, play_match};

// Crate-level exports - Move selection
pub use players::{MoveSelector, Random, RandomEmpty, Sequential, Strategy, player_seeds};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameEvent, GameSnapshot, GameState, GameStatus, Invariant, InvariantSet,
    InvariantViolation, Move, MoveError, MoveErrorKind, MoveOutcome, Player, Position, Rejection,
    Square, TurnInvariants, Wake, invariants, rules,
};
