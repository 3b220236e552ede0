//! History consistency invariant: the board is exactly the replayed history.

use super::super::{GameSnapshot, Square};
use super::Invariant;

/// Invariant: every move in history owns its square and nothing else is
/// marked.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSnapshot> for HistoryConsistentInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        let board = snapshot.board();

        let occupied = board
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        occupied == snapshot.history().len()
            && snapshot
                .history()
                .iter()
                .all(|mv| board.get(mv.position) == Square::Occupied(mv.player))
    }

    fn description() -> &'static str {
        "Board marks match the move history"
    }
}
