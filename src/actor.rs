//! One player's thread of control.

use crate::games::tictactoe::{GameState, MoveError, MoveOutcome, Player, Rejection, Wake};
use crate::players::MoveSelector;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// What one actor did during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ActorReport {
    /// The actor's mark.
    player: Player,
    /// Name of the move-selection policy.
    policy: String,
    /// Times the actor was woken for its turn.
    turns: usize,
    /// Calls to the monitor, accepted or not.
    attempts: usize,
    /// Accepted moves.
    accepted: usize,
}

/// A player bound to a shared game and a move-selection policy.
///
/// The actor only borrows the game; the monitor owns every piece of game
/// state.
pub struct Actor<'a> {
    game: &'a GameState,
    player: Player,
    selector: Box<dyn MoveSelector + 'a>,
}

impl<'a> Actor<'a> {
    /// Creates a new actor.
    pub fn new(game: &'a GameState, player: Player, selector: Box<dyn MoveSelector + 'a>) -> Self {
        Self {
            game,
            player,
            selector,
        }
    }

    /// Returns the actor's mark.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Plays until the game is over.
    ///
    /// Each iteration waits for the turn, then proposes cells until the
    /// monitor accepts one. Waking to a finished or aborted game exits
    /// without any further move attempt.
    ///
    /// # Errors
    ///
    /// Returns the policy's [`MoveError`] if it proposes an off-board cell.
    /// The game is aborted first so the other actor stops waiting.
    #[instrument(skip(self), fields(player = %self.player, policy = self.selector.name()))]
    pub fn play(mut self) -> Result<ActorReport, MoveError> {
        info!("Actor started");
        let result = self.run();
        if let Err(err) = &result {
            error!(%err, "Actor failed");
            self.game.abort(self.player);
        }
        result
    }

    fn run(&mut self) -> Result<ActorReport, MoveError> {
        let mut turns = 0;
        let mut attempts = 0;
        let mut accepted = 0;

        while !self.game.is_over() {
            match self.game.wait_for_turn(self.player) {
                Wake::Turn => {}
                Wake::GameOver(status) => {
                    debug!(%status, "Woke to finished game");
                    break;
                }
                Wake::Aborted => {
                    warn!("Woke to aborted game");
                    break;
                }
            }
            turns += 1;

            loop {
                let board = self.game.board();
                let (row, col) = self.selector.select_cell(&board);
                attempts += 1;
                match self.game.try_move(self.player, row, col)? {
                    MoveOutcome::Accepted { .. } => {
                        accepted += 1;
                        break;
                    }
                    MoveOutcome::Rejected(Rejection::GameOver) => {
                        warn!("Game ended during our turn");
                        break;
                    }
                    MoveOutcome::Rejected(Rejection::Aborted) => {
                        warn!("Game aborted during our turn");
                        break;
                    }
                    MoveOutcome::Rejected(Rejection::Occupied(pos)) => {
                        debug!(%pos, "Retrying after occupied square");
                    }
                }
            }
        }

        info!(turns, attempts, accepted, "Actor finished");
        Ok(ActorReport {
            player: self.player,
            policy: self.selector.name().to_string(),
            turns,
            attempts,
            accepted,
        })
    }
}

impl std::fmt::Debug for Actor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("player", &self.player)
            .field("policy", &self.selector.name())
            .finish()
    }
}
