//! Game progression state.
//!
//! Exactly one `GameState` is current at any time:
//! - `Turn(p)`: seat `p` may move
//! - `Won(p)`: seat `p` won; absorbing, no transitions out
//! - `Undefined`: result of mapping an unowned value to a turn

use serde::{Deserialize, Serialize};

use super::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Turn(Player),
    Won(Player),
    Undefined,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Turn(Player::One)
    }
}

impl GameState {
    /// Turn state for an optional owner; unowned maps to `Undefined`.
    ///
    /// ```
    /// use clonium_engine::core::{GameState, Player};
    ///
    /// assert_eq!(GameState::for_owner(Some(Player::Two)), GameState::Turn(Player::Two));
    /// assert_eq!(GameState::for_owner(None), GameState::Undefined);
    /// ```
    #[must_use]
    pub fn for_owner(owner: Option<Player>) -> Self {
        owner.map_or(GameState::Undefined, GameState::Turn)
    }

    /// Seat whose turn it is, if any.
    #[must_use]
    pub fn active_player(self) -> Option<Player> {
        match self {
            GameState::Turn(p) => Some(p),
            _ => None,
        }
    }

    /// Winning seat, if the game is over.
    #[must_use]
    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::Won(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won(_))
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Turn(p) => write!(f, "{p} to move"),
            GameState::Won(p) => write!(f, "{p} won"),
            GameState::Undefined => write!(f, "undefined"),
        }
    }
}
