//! Alternating turn invariant: the turn marker flips once per accepted move.

use super::super::{GameSnapshot, Player};
use super::Invariant;

/// Invariant: the turn marker flips on every accepted move.
///
/// X holds the marker after an even number of accepted moves and O after an
/// odd number, even once the game is over. The monitor does not check who
/// made each move, so out-of-turn claims keep this invariant intact.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSnapshot> for AlternatingTurnInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        let expected = if snapshot.history().len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };
        *snapshot.current_turn() == expected
    }

    fn description() -> &'static str {
        "Turn marker flips on every accepted move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{GameState, Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&GameSnapshot::new()));
    }

    #[test]
    fn test_holds_after_winning_move() {
        let game = GameState::new();
        for (player, row, col) in [
            (Player::X, 0, 0),
            (Player::O, 1, 0),
            (Player::X, 0, 1),
            (Player::O, 1, 1),
            (Player::X, 0, 2),
        ] {
            assert!(game.attempt_move(player, row, col).unwrap());
        }
        let snapshot = game.snapshot();
        assert!(AlternatingTurnInvariant::holds(&snapshot));
        assert_eq!(*snapshot.current_turn(), Player::O);
    }

    #[test]
    fn test_same_player_twice_holds() {
        let game = GameState::new();
        assert!(game.attempt_move(Player::X, 0, 0).unwrap());
        assert!(game.attempt_move(Player::X, 1, 1).unwrap());
        let snapshot = game.snapshot();
        assert_eq!(*snapshot.current_turn(), Player::X);
        assert!(AlternatingTurnInvariant::holds(&snapshot));
    }

    #[test]
    fn test_unflipped_marker_violates() {
        let mut snapshot = GameSnapshot::new();
        snapshot.history = vec![Move::new(Player::X, Position::TopLeft)];
        assert!(!AlternatingTurnInvariant::holds(&snapshot));
    }
}
