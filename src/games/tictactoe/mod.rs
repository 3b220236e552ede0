//! Tic-tac-toe played by two threads against one shared monitor.

mod action;
mod events;
pub mod invariants;
mod monitor;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError, MoveErrorKind, MoveOutcome, Rejection};
pub use events::GameEvent;
pub use invariants::{Invariant, InvariantSet, InvariantViolation, TurnInvariants};
pub use monitor::{GameSnapshot, GameState, Wake};
pub use position::Position;
pub use types::{Board, GameStatus, Player, Square};
