//! Events published by the game monitor.

use super::{Board, GameStatus, Move, Player};
use serde::{Deserialize, Serialize};

/// Something observable happened to the shared game.
///
/// Events are sent from inside the monitor's critical section, so a
/// receiver sees them in exactly the order the moves were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A move was accepted.
    MoveAccepted {
        /// 1-based count of accepted moves so far.
        ply: usize,
        /// The accepted move.
        mv: Move,
        /// Board right after the move.
        board: Board,
    },
    /// The game reached a terminal state.
    GameOver {
        /// Final status.
        status: GameStatus,
    },
    /// An actor stopped with an error before the game ended.
    Aborted {
        /// The actor that gave up.
        player: Player,
    },
}
