//! Runs one game between two threaded actors.

use crate::actor::{Actor, ActorReport};
use crate::games::tictactoe::{Board, GameState, GameStatus, Move, MoveError, Player};
use crate::players::MoveSelector;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::{info, instrument};

/// Final state of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchReport {
    /// Final status.
    status: GameStatus,
    /// Final board.
    board: Board,
    /// Accepted moves in order.
    history: Vec<Move>,
    /// Per-actor statistics, X first.
    actors: [ActorReport; 2],
}

impl MatchReport {
    /// The line printed at the end of a game: `Draw!` or `Winner: <symbol>`.
    pub fn result_line(&self) -> String {
        self.status.to_string()
    }
}

/// Plays `game` to completion with one thread per player.
///
/// `player_x` and `player_o` choose cells for X and O. Both threads borrow
/// `game`; the function returns after both have exited.
///
/// # Errors
///
/// Returns the first [`MoveError`] raised by either actor. The failing actor
/// aborts the game, which releases the other one.
#[instrument(skip_all, fields(x = player_x.name(), o = player_o.name()))]
pub fn play_match(
    game: &GameState,
    player_x: Box<dyn MoveSelector + '_>,
    player_o: Box<dyn MoveSelector + '_>,
) -> Result<MatchReport, MoveError> {
    info!("Starting match");

    let (x, o) = thread::scope(|s| {
        let x = s.spawn(|| Actor::new(game, Player::X, player_x).play());
        let o = s.spawn(|| Actor::new(game, Player::O, player_o).play());
        (join(x), join(o))
    });

    let report = MatchReport {
        status: game.status(),
        board: game.board(),
        history: game.history(),
        actors: [x?, o?],
    };
    info!(status = %report.status, moves = report.history.len(), "Match finished");
    Ok(report)
}

/// Joins an actor thread, re-raising its panic on this thread.
fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::MoveErrorKind;
    use crate::players::{Sequential, Strategy, player_seeds};

    /// Always proposes a cell off the board.
    struct OffBoard;

    impl MoveSelector for OffBoard {
        fn select_cell(&mut self, _board: &Board) -> (usize, usize) {
            (5, 5)
        }

        fn name(&self) -> &str {
            "off-board"
        }
    }

    #[test]
    fn test_sequential_vs_sequential_is_deterministic() {
        // X: (0,0) (0,2) (1,1) (2,0) -- O: (0,1) (1,0) (1,2)
        // X completes the anti-diagonal on its fourth move.
        let game = GameState::new();
        let report = play_match(&game, Box::new(Sequential::new()), Box::new(Sequential::new())).unwrap();
        assert_eq!(*report.status(), GameStatus::Won(Player::X));
        assert_eq!(report.history().len(), 7);
        assert_eq!(report.result_line(), "Winner: X");
    }

    #[test]
    fn test_off_board_x_aborts_match() {
        let game = GameState::new();
        let err = play_match(&game, Box::new(OffBoard), Box::new(Sequential::new())).unwrap_err();
        assert_eq!(err.kind, MoveErrorKind::InvalidMove { row: 5, col: 5 });
        assert!(game.is_aborted());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_off_board_o_aborts_match() {
        let game = GameState::new();
        let err = play_match(&game, Box::new(Sequential::new()), Box::new(OffBoard)).unwrap_err();
        assert_eq!(err.kind, MoveErrorKind::InvalidMove { row: 5, col: 5 });
        assert!(game.is_aborted());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_report_counts_match_history() {
        let game = GameState::new();
        let [x_seed, o_seed] = player_seeds(11);
        let report = play_match(
            &game,
            Strategy::Random.selector(x_seed),
            Strategy::RandomEmpty.selector(o_seed),
        )
        .unwrap();

        let [x, o] = report.actors();
        assert_eq!(x.accepted() + o.accepted(), report.history().len());
        assert_eq!(*o.attempts(), *o.accepted());
        assert!(x.attempts() >= x.accepted());
    }
}
