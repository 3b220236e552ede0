//! Move types and move outcomes for tic-tac-toe.
//!
//! A rejected claim is an ordinary outcome the caller retries around.
//! Only malformed coordinates surface as a [`MoveError`].

use super::{GameStatus, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a well-formed claim was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The square already carries a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(Position),
    /// The game reached a terminal state before this claim.
    #[display("Game is already over")]
    GameOver,
    /// An actor abandoned the game.
    #[display("Game was aborted")]
    Aborted,
}

/// Result of a well-formed claim on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mark was placed; `status` is the game status right after it.
    Accepted {
        /// Status after the move was applied.
        status: GameStatus,
    },
    /// Nothing changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Returns true if the move mutated the board.
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Kinds of move faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveErrorKind {
    /// Coordinates outside the 3x3 grid.
    #[display("Invalid move: ({}, {}) is off the board", row, col)]
    InvalidMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// Move fault with location tracking.
///
/// Retrying cannot fix the cause, so callers propagate it instead of
/// looping.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Move error: {} at {}:{}", kind, file, line)]
pub struct MoveError {
    /// What went wrong.
    pub kind: MoveErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MoveError {
    /// Creates a new move error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: MoveErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an off-board coordinate pair.
    #[track_caller]
    pub fn invalid_move(row: usize, col: usize) -> Self {
        Self::new(MoveErrorKind::InvalidMove { row, col })
    }
}
