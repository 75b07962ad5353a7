//! Turn sequencing, elimination and win detection.
//!
//! ## States
//!
//! `Turn(p)` for each seat, `Won(p)` for each seat (absorbing), and
//! `Undefined`. The machine starts at `Turn(Player::One)`.
//!
//! ## Advancing
//!
//! After a move by `p`:
//! 1. resolve the cascade for `p`
//! 2. recount scores; seats at zero are eliminated for good
//! 3. if all but one seat is eliminated, that seat has won
//! 4. otherwise pass the turn to the next seat, skipping eliminated ones

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::Board;
use crate::cascade::{CascadeObserver, CascadeReport, ChainReactionResolver};
use crate::core::{CascadeError, GameState, Player, PlayerCount, PlayerMap, PlayerSet};

/// Result of a score recount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    /// Owned-cell count per active seat.
    pub scores: PlayerMap<u32>,
    /// Seats eliminated by this recount.
    pub eliminated: PlayerSet,
    /// Set only by the recount that decided the game.
    pub winner: Option<Player>,
}

/// Result of advancing past one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub cascade: CascadeReport,
    pub update: ScoreUpdate,
    /// State after the advance.
    pub state: GameState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStateMachine {
    player_count: PlayerCount,
    current: GameState,
    lost: PlayerSet,
}

impl TurnStateMachine {
    #[must_use]
    pub fn new(player_count: PlayerCount) -> Self {
        Self {
            player_count,
            current: GameState::default(),
            lost: PlayerSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.current
    }

    #[must_use]
    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    #[must_use]
    pub fn lost_players(&self) -> PlayerSet {
        self.lost
    }

    #[must_use]
    pub fn is_eliminated(&self, player: Player) -> bool {
        self.lost.contains(player)
    }

    /// All seats but one are eliminated.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.lost.len() + 1 == self.player_count.get()
    }

    /// Is it `player`'s turn?
    #[must_use]
    pub fn accepts(&self, player: Player) -> bool {
        self.current == GameState::Turn(player)
    }

    /// Recount scores, record eliminations and detect a winner.
    pub fn update_scores(&mut self, board: &Board) -> ScoreUpdate {
        let scores = board.scores(self.player_count);
        let mut eliminated = PlayerSet::new();

        for player in self.player_count.players() {
            if scores[player] == 0 && self.lost.insert(player) {
                info!(%player, "player eliminated");
                eliminated.insert(player);
            }
        }

        let winner = self.settle_winner();
        ScoreUpdate {
            scores,
            eliminated,
            winner,
        }
    }

    /// Resolve the cascade started by `acting`'s move, recount, and pass the turn.
    pub fn advance<O>(
        &mut self,
        acting: Player,
        board: &mut Board,
        resolver: &ChainReactionResolver,
        observer: &mut O,
    ) -> Result<TurnReport, CascadeError>
    where
        O: CascadeObserver + ?Sized,
    {
        let cascade = resolver.resolve(board, acting, observer)?;
        let mut update = self.update_scores(board);

        // A move that empties the whole board knocks out every seat at
        // once; the mover is the last one standing.
        if self.lost.len() == self.player_count.get() && !self.current.is_terminal() {
            self.lost.remove(acting);
            update.eliminated.remove(acting);
            update.winner = self.settle_winner();
        }

        if !self.current.is_terminal() {
            self.pass_turn(acting);
        }

        Ok(TurnReport {
            cascade,
            update,
            state: self.current,
        })
    }

    /// Move the turn off a seat that was eliminated while holding it.
    ///
    /// Recounts outside a move (snapshot catch-up) can knock out the seat to
    /// move; the turn then goes to the next seat still in play.
    pub(crate) fn skip_eliminated(&mut self) {
        if let GameState::Turn(holder) = self.current {
            if self.lost.contains(holder) {
                self.pass_turn(holder);
            }
        }
    }

    /// Hand the turn to the seat after `acting`, skipping eliminated seats.
    fn pass_turn(&mut self, acting: Player) {
        let mut next = acting.next(self.player_count);
        for _ in 0..self.player_count.get() {
            if !self.lost.contains(next) {
                break;
            }
            next = next.next(self.player_count);
        }
        self.current = GameState::Turn(next);
    }

    /// Move to `Won` if the game just became decided.
    fn settle_winner(&mut self) -> Option<Player> {
        if self.current.is_terminal() || !self.is_decided() {
            return None;
        }
        let winner = self.player_count.players().find(|&p| !self.lost.contains(p))?;
        info!(%winner, "game decided");
        self.current = GameState::Won(winner);
        Some(winner)
    }
}
