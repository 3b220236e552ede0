//! Terminal status invariant: the status agrees with the board.

use super::super::rules::{has_line, is_full};
use super::super::{GameSnapshot, GameStatus, Player};
use super::Invariant;

/// Invariant: `Won` means the last mover holds a line, `Draw` means a full
/// board without lines, `InProgress` means neither.
pub struct TerminalStatusInvariant;

impl Invariant<GameSnapshot> for TerminalStatusInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        let board = snapshot.board();
        let x_line = has_line(board, Player::X);
        let o_line = has_line(board, Player::O);

        match *snapshot.status() {
            GameStatus::Won(winner) => {
                has_line(board, winner)
                    && !has_line(board, winner.opponent())
                    && snapshot.history().last().map(|mv| mv.player) == Some(winner)
            }
            GameStatus::Draw => is_full(board) && !x_line && !o_line,
            GameStatus::InProgress => !is_full(board) && !x_line && !o_line,
        }
    }

    fn description() -> &'static str {
        "Status matches the board (win before draw)"
    }
}
