//! Shared game monitor.
//!
//! [`GameState`] owns the board, the turn marker, the status and the move
//! history behind a single mutex. Every operation takes the lock once, so
//! no caller can observe a half-applied move. A condition variable paired
//! with the same mutex lets an actor sleep until it may move or the game
//! is over.

use super::action::{Move, MoveError, MoveOutcome, Rejection};
use super::events::GameEvent;
use super::invariants::assert_invariants;
use super::rules;
use super::{Board, GameStatus, Player, Position, Square};
use derive_getters::Getters;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use tracing::{debug, info, instrument, warn};

/// Why [`GameState::wait_for_turn`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The caller may move now.
    Turn,
    /// The game ended; the caller must not move.
    GameOver(GameStatus),
    /// The other actor gave up; the caller must not move.
    Aborted,
}

/// Everything the lock guards, updated as one unit.
///
/// [`GameState::snapshot`] hands out a consistent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSnapshot {
    /// The board.
    pub(crate) board: Board,
    /// Player who may move next.
    pub(crate) current_turn: Player,
    /// Game status.
    pub(crate) status: GameStatus,
    /// Accepted moves, in order.
    pub(crate) history: Vec<Move>,
    /// Set once an actor stops with an error before the game ended.
    pub(crate) aborted: bool,
}

impl GameSnapshot {
    pub(crate) fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            aborted: false,
        }
    }

    fn eligible(&self, player: Player) -> bool {
        self.current_turn == player || self.status.is_over() || self.aborted
    }
}

/// Monitor guarding one game of tic-tac-toe shared by two threads.
#[derive(Debug)]
pub struct GameState {
    shared: Mutex<GameSnapshot>,
    turn_changed: Condvar,
    events: Option<Sender<GameEvent>>,
}

impl GameState {
    /// Creates a new game. X moves first.
    #[instrument]
    pub fn new() -> Self {
        Self {
            shared: Mutex::new(GameSnapshot::new()),
            turn_changed: Condvar::new(),
            events: None,
        }
    }

    /// Creates a new game that publishes a [`GameEvent`] for every accepted
    /// move and for the end of the game.
    #[instrument(skip(events))]
    pub fn with_events(events: Sender<GameEvent>) -> Self {
        Self {
            events: Some(events),
            ..Self::new()
        }
    }

    /// Attempts to place `player`'s mark at (`row`, `col`).
    ///
    /// Returns `Ok(true)` if the move was accepted and `Ok(false)` if the
    /// square is occupied, the game is over or the game was aborted; no
    /// rejection changes any state. Whose turn it is does not matter here;
    /// actors keep to their turns through [`GameState::wait_for_turn`].
    ///
    /// # Errors
    ///
    /// Returns an `InvalidMove` error if the coordinates are off the board.
    #[track_caller]
    pub fn attempt_move(&self, player: Player, row: usize, col: usize) -> Result<bool, MoveError> {
        Ok(self.try_move(player, row, col)?.is_accepted())
    }

    /// Attempts a move and reports the detailed outcome.
    ///
    /// On acceptance the board is marked, win is evaluated before draw, the
    /// turn flips (even when the move ended the game) and every waiter is
    /// woken.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidMove` error if the coordinates are off the board.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn try_move(
        &self,
        player: Player,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, MoveError> {
        let Some(pos) = Position::from_coords(row, col) else {
            warn!(%player, row, col, "Off-board move");
            return Err(MoveError::invalid_move(row, col));
        };

        let mut shared = self.shared.lock();

        if shared.status.is_over() {
            warn!(%player, %pos, status = %shared.status, "Move after game over rejected");
            return Ok(MoveOutcome::Rejected(Rejection::GameOver));
        }
        if shared.aborted {
            debug!(%player, %pos, "Move after abort rejected");
            return Ok(MoveOutcome::Rejected(Rejection::Aborted));
        }
        if !shared.board.is_empty(pos) {
            debug!(%player, %pos, "Square occupied");
            return Ok(MoveOutcome::Rejected(Rejection::Occupied(pos)));
        }

        let mv = Move::new(player, pos);
        shared.board.set(pos, Square::Occupied(player));
        shared.history.push(mv);

        if rules::has_line(&shared.board, player) {
            shared.status = GameStatus::Won(player);
        } else if rules::is_full(&shared.board) {
            shared.status = GameStatus::Draw;
        }
        shared.current_turn = shared.current_turn.opponent();
        assert_invariants(&shared);

        debug!(%mv, ply = shared.history.len(), next = %shared.current_turn, "Move accepted");
        self.publish(&shared, mv);

        let status = shared.status;
        if status.is_over() {
            info!(%status, moves = shared.history.len(), "Game over");
        }
        drop(shared);
        self.turn_changed.notify_all();

        Ok(MoveOutcome::Accepted { status })
    }

    /// Sends events for an accepted move while the caller still holds the lock.
    fn publish(&self, shared: &GameSnapshot, mv: Move) {
        let Some(events) = &self.events else {
            return;
        };
        let mut sent = events
            .send(GameEvent::MoveAccepted {
                ply: shared.history.len(),
                mv,
                board: shared.board.clone(),
            })
            .is_ok();
        if sent && shared.status.is_over() {
            sent = events
                .send(GameEvent::GameOver {
                    status: shared.status,
                })
                .is_ok();
        }
        if !sent {
            debug!("Event receiver dropped");
        }
    }

    /// Marks the game as abandoned by `player` and wakes every waiter.
    ///
    /// Waiters return [`Wake::Aborted`] and later claims are rejected. A game
    /// that already ended keeps its status.
    #[instrument(skip(self))]
    pub fn abort(&self, player: Player) {
        let mut shared = self.shared.lock();
        if shared.aborted {
            return;
        }
        shared.aborted = true;
        warn!(%player, status = %shared.status, moves = shared.history.len(), "Game aborted");

        if let Some(events) = &self.events
            && events.send(GameEvent::Aborted { player }).is_err()
        {
            debug!("Event receiver dropped");
        }
        drop(shared);
        self.turn_changed.notify_all();
    }

    /// True once an actor aborted the game.
    pub fn is_aborted(&self) -> bool {
        self.shared.lock().aborted
    }

    /// Checks all rows, columns and diagonals for three `player` marks.
    #[instrument(skip(self))]
    pub fn evaluate_win(&self, player: Player) -> bool {
        rules::has_line(&self.shared.lock().board, player)
    }

    /// True iff no empty square remains.
    #[instrument(skip(self))]
    pub fn evaluate_draw(&self) -> bool {
        rules::is_full(&self.shared.lock().board)
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.shared.lock().status.is_over()
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        self.shared.lock().status
    }

    /// The winner, if the game was won.
    pub fn winner(&self) -> Option<Player> {
        self.status().winner()
    }

    /// Player who may move next. Carries no meaning once the game is over.
    pub fn current_turn(&self) -> Player {
        self.shared.lock().current_turn
    }

    /// Snapshot of the board.
    pub fn board(&self) -> Board {
        self.shared.lock().board.clone()
    }

    /// Snapshot of the accepted moves, in order.
    pub fn history(&self) -> Vec<Move> {
        self.shared.lock().history.clone()
    }

    /// Consistent copy of board, turn, status and history taken under one
    /// lock acquisition.
    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.lock().clone()
    }

    /// Blocks until it is `player`'s turn, the game is over or the game was
    /// aborted.
    ///
    /// The predicate is re-checked under the lock after every wake-up, so
    /// spurious wake-ups and broadcasts meant for the other player put the
    /// caller back to sleep.
    #[instrument(skip(self))]
    pub fn wait_for_turn(&self, player: Player) -> Wake {
        let mut shared = self.shared.lock();
        while !shared.eligible(player) {
            self.turn_changed.wait(&mut shared);
        }

        if shared.status.is_over() {
            debug!(%player, status = %shared.status, "Woke to finished game");
            Wake::GameOver(shared.status)
        } else if shared.aborted {
            debug!(%player, "Woke to aborted game");
            Wake::Aborted
        } else {
            debug!(%player, "Turn acquired");
            Wake::Turn
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn play(game: &GameState, moves: &[(Player, usize, usize)]) {
        for &(player, row, col) in moves {
            assert!(
                game.attempt_move(player, row, col).unwrap(),
                "{} at ({}, {}) should be accepted",
                player,
                row,
                col
            );
        }
    }

    #[test]
    fn test_new_game_starts_with_x() {
        let game = GameState::new();
        assert_eq!(game.current_turn(), Player::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_accepted_move_flips_turn() {
        let game = GameState::new();
        assert!(game.attempt_move(Player::X, 1, 1).unwrap());
        assert_eq!(game.current_turn(), Player::O);
        assert_eq!(game.board().get(Position::Center), Square::Occupied(Player::X));
    }

    #[test]
    fn test_occupied_square_rejected_without_change() {
        let game = GameState::new();
        play(&game, &[(Player::X, 0, 0)]);
        let before = game.board();

        let outcome = game.try_move(Player::O, 0, 0).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::Occupied(Position::TopLeft)));
        assert_eq!(game.board(), before);
        assert_eq!(game.current_turn(), Player::O);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_off_board_is_invalid_move() {
        let game = GameState::new();
        let err = game.attempt_move(Player::X, 0, 3).unwrap_err();
        assert_eq!(
            err.kind,
            crate::games::tictactoe::MoveErrorKind::InvalidMove { row: 0, col: 3 }
        );
        assert_eq!(game.current_turn(), Player::X);
    }

    #[test]
    fn test_turn_flips_into_terminal_state() {
        let game = GameState::new();
        play(
            &game,
            &[
                (Player::X, 0, 0),
                (Player::O, 1, 0),
                (Player::X, 0, 1),
                (Player::O, 1, 1),
                (Player::X, 0, 2),
            ],
        );
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.current_turn(), Player::O);
    }

    #[test]
    fn test_out_of_turn_claim_is_accepted() {
        let game = GameState::new();
        play(&game, &[(Player::X, 0, 0), (Player::X, 1, 1)]);
        assert_eq!(game.current_turn(), Player::X);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_out_of_turn_claim_wakes_waiter() {
        let game = GameState::new();
        play(&game, &[(Player::X, 0, 0)]);
        thread::scope(|s| {
            let waiter = s.spawn(|| game.wait_for_turn(Player::X));
            thread::sleep(Duration::from_millis(20));
            // X moves again while O holds the turn; the flip hands it back.
            assert!(game.attempt_move(Player::X, 2, 2).unwrap());
            assert_eq!(waiter.join().unwrap(), Wake::Turn);
        });
    }

    #[test]
    fn test_abort_releases_waiter() {
        let game = GameState::new();
        thread::scope(|s| {
            let waiter = s.spawn(|| game.wait_for_turn(Player::O));
            thread::sleep(Duration::from_millis(20));
            game.abort(Player::X);
            assert_eq!(waiter.join().unwrap(), Wake::Aborted);
        });
        assert!(game.is_aborted());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_moves_rejected_after_abort() {
        let game = GameState::new();
        game.abort(Player::O);
        assert_eq!(
            game.try_move(Player::X, 0, 0).unwrap(),
            MoveOutcome::Rejected(Rejection::Aborted)
        );
        assert_eq!(game.board(), Board::new());
        assert_eq!(game.current_turn(), Player::X);
    }

    #[test]
    fn test_abort_after_game_over_keeps_status() {
        let game = GameState::new();
        play(
            &game,
            &[
                (Player::X, 0, 0),
                (Player::O, 1, 0),
                (Player::X, 0, 1),
                (Player::O, 1, 1),
                (Player::X, 0, 2),
            ],
        );
        game.abort(Player::O);
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(
            game.wait_for_turn(Player::X),
            Wake::GameOver(GameStatus::Won(Player::X))
        );
    }

    #[test]
    fn test_abort_publishes_event() {
        let (tx, rx) = mpsc::channel();
        let game = GameState::with_events(tx);
        game.abort(Player::X);
        game.abort(Player::X);
        drop(game);
        let events: Vec<GameEvent> = rx.iter().collect();
        assert_eq!(events, vec![GameEvent::Aborted { player: Player::X }]);
    }

    #[test]
    fn test_wait_returns_immediately_when_eligible() {
        let game = GameState::new();
        assert_eq!(game.wait_for_turn(Player::X), Wake::Turn);
    }

    #[test]
    fn test_waiter_wakes_on_turn_flip() {
        let game = GameState::new();
        thread::scope(|s| {
            let waiter = s.spawn(|| game.wait_for_turn(Player::O));
            thread::sleep(Duration::from_millis(20));
            assert!(game.attempt_move(Player::X, 2, 2).unwrap());
            assert_eq!(waiter.join().unwrap(), Wake::Turn);
        });
    }

    #[test]
    fn test_waiter_wakes_on_game_over_without_turn() {
        let game = GameState::new();
        // X: (0,0) (0,1) ; O: (1,0) (1,1). X to move.
        play(
            &game,
            &[
                (Player::X, 0, 0),
                (Player::O, 1, 0),
                (Player::X, 0, 1),
                (Player::O, 1, 1),
            ],
        );
        thread::scope(|s| {
            // X's winning move hands the turn to O and ends the game in
            // the same step; O must see the end, not a turn.
            let waiter = s.spawn(|| game.wait_for_turn(Player::O));
            thread::sleep(Duration::from_millis(20));
            assert!(game.attempt_move(Player::X, 0, 2).unwrap());
            assert_eq!(
                waiter.join().unwrap(),
                Wake::GameOver(GameStatus::Won(Player::X))
            );
        });
    }

    #[test]
    fn test_events_follow_acceptance_order() {
        let (tx, rx) = mpsc::channel();
        let game = GameState::with_events(tx);
        play(
            &game,
            &[
                (Player::X, 0, 0),
                (Player::O, 1, 0),
                (Player::X, 0, 1),
                (Player::O, 1, 1),
                (Player::X, 0, 2),
            ],
        );
        // A rejected move publishes nothing.
        assert!(!game.attempt_move(Player::O, 2, 2).unwrap());
        drop(game);

        let events: Vec<GameEvent> = rx.iter().collect();
        assert_eq!(events.len(), 6);
        for (i, event) in events.iter().take(5).enumerate() {
            match event {
                GameEvent::MoveAccepted { ply, .. } => assert_eq!(*ply, i + 1),
                other => panic!("Expected MoveAccepted, got {:?}", other),
            }
        }
        assert_eq!(
            events[5],
            GameEvent::GameOver {
                status: GameStatus::Won(Player::X)
            }
        );
    }

    #[test]
    fn test_dropped_receiver_does_not_block_moves() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let game = GameState::with_events(tx);
        assert!(game.attempt_move(Player::X, 0, 0).unwrap());
    }
}
