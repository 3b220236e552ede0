//! Move-selection policies.
//!
//! An actor asks its policy for a cell, tries to claim it, and asks again
//! until a claim is accepted. Policies only read the board; the monitor
//! decides what is legal.

mod random;
mod sequential;

pub use random::{Random, RandomEmpty};
pub use sequential::Sequential;

use crate::games::tictactoe::Board;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Trait for policies that choose where to move.
pub trait MoveSelector: Send {
    /// Proposes a cell as `(row, col)` for the current board.
    ///
    /// Called repeatedly until the monitor accepts a proposal.
    fn select_cell(&mut self, board: &Board) -> (usize, usize);

    /// Returns the policy's display name.
    fn name(&self) -> &str;
}

/// Built-in policies selectable by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// First empty square in row-major order.
    Sequential,
    /// Uniform over all nine squares, retried until one is free.
    Random,
    /// Uniform over the empty squares only.
    RandomEmpty,
}

impl Strategy {
    /// Builds a boxed selector. `seed` feeds the random policies.
    pub fn selector(self, seed: u64) -> Box<dyn MoveSelector> {
        match self {
            Strategy::Sequential => Box::new(Sequential::new()),
            Strategy::Random => Box::new(Random::new(ChaCha8Rng::seed_from_u64(seed))),
            Strategy::RandomEmpty => Box::new(RandomEmpty::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }
}

/// Derives one seed per player from a master seed.
pub fn player_seeds(master: u64) -> [u64; 2] {
    let mut rng = ChaCha8Rng::seed_from_u64(master);
    [rng.next_u64(), rng.next_u64()]
}
