//! Exhaustive row-major scan.

use super::MoveSelector;
use crate::games::tictactoe::{Board, Position};
use tracing::debug;

/// Picks the first empty square, scanning rows top to bottom.
#[derive(Debug, Clone, Default)]
pub struct Sequential;

impl Sequential {
    /// Creates a new sequential policy.
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelector for Sequential {
    fn select_cell(&mut self, board: &Board) -> (usize, usize) {
        // A full board means the game is over; the monitor rejects
        // whatever we propose, so the first square is as good as any.
        let pos = Position::ALL
            .into_iter()
            .find(|pos| board.is_empty(*pos))
            .unwrap_or(Position::TopLeft);
        debug!(%pos, "Sequential pick");
        pos.coords()
    }

    fn name(&self) -> &str {
        "sequential"
    }
}
