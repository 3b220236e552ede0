//! Randomized policies. Each owns its random source so a seed reproduces
//! the same game.

use super::MoveSelector;
use crate::games::tictactoe::{Board, Position};
use derive_new::new;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Uniform over all nine squares, occupied or not.
///
/// The actor retries until a proposal lands on an empty square. On a 3x3
/// board that takes a handful of draws at worst.
#[derive(Debug, Clone, new)]
pub struct Random {
    rng: ChaCha8Rng,
}

impl MoveSelector for Random {
    fn select_cell(&mut self, _board: &Board) -> (usize, usize) {
        let cell = (self.rng.gen_range(0..3), self.rng.gen_range(0..3));
        debug!(row = cell.0, col = cell.1, "Random pick");
        cell
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Uniform over the empty squares only, so every proposal is claimable
/// unless the board changed underneath it.
#[derive(Debug, Clone, new)]
pub struct RandomEmpty {
    rng: ChaCha8Rng,
}

impl MoveSelector for RandomEmpty {
    fn select_cell(&mut self, board: &Board) -> (usize, usize) {
        let open = Position::valid_moves(board);
        let pos = open
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Position::TopLeft);
        debug!(%pos, open = open.len(), "Random empty pick");
        pos.coords()
    }

    fn name(&self) -> &str {
        "random-empty"
    }
}
