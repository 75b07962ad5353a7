//! Uniform random move selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Coord;
use crate::core::{CascadeError, GameRng, Player};
use crate::rules::{Game, MoveOutcome};
use crate::session::SessionHooks;

/// Picks uniformly among the legal moves of a game.
///
/// Deterministic per seed.
#[derive(Clone, Debug)]
pub struct RandomMover {
    rng: GameRng,
}

/// How a playout ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playout {
    /// Moves applied during the playout.
    pub moves: usize,
    /// Set if the game was decided within the move budget.
    pub winner: Option<Player>,
}

impl RandomMover {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// A random legal move for `player`, or `None` if they have none.
    pub fn choose_move<H: SessionHooks>(&mut self, game: &Game<H>, player: Player) -> Option<Coord> {
        let moves = game.legal_moves(player);
        self.rng.choose(&moves).copied()
    }

    /// Play random moves for whoever is to move until the game ends or
    /// `max_moves` have been applied.
    pub fn play_out<H: SessionHooks>(&mut self, game: &mut Game<H>, max_moves: usize) -> Result<Playout, CascadeError> {
        let mut moves = 0;

        while moves < max_moves {
            let Some(player) = game.state().active_player() else {
                break;
            };
            let Some((x, y)) = self.choose_move(game, player) else {
                break;
            };
            if let MoveOutcome::Rejected(reason) = game.apply_move(x, y, player)? {
                debug!(%reason, "random move rejected");
                break;
            }
            moves += 1;
        }

        Ok(Playout {
            moves,
            winner: game.winner(),
        })
    }
}
