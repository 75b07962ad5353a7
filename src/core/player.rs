//! Player slots and per-player data storage.
//!
//! ## Player
//!
//! One of four fixed seats. "Unowned" is expressed as `Option<Player>`
//! wherever a cell may have no owner.
//!
//! ## PlayerCount
//!
//! The number of active seats in a game (2-4). Turn cycling and elimination
//! bookkeeping only ever look at the first `PlayerCount` seats.
//!
//! ## PlayerSet / PlayerMap
//!
//! A 4-bit seat set (eliminations, lobby presence) and a seat-indexed
//! `Vec`-backed map (scores).

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::ConfigError;

/// One of the four player seats, in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
    Three,
    Four,
}

impl Player {
    /// All four seats in turn order.
    pub const ALL: [Player; 4] = [Player::One, Player::Two, Player::Three, Player::Four];

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
            Player::Three => 2,
            Player::Four => 3,
        }
    }

    /// 1-based seat number, as used on the wire.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Seat for a 1-based number, `None` outside `1..=4`.
    ///
    /// ```
    /// use clonium_engine::core::Player;
    ///
    /// assert_eq!(Player::from_number(3), Some(Player::Three));
    /// assert_eq!(Player::from_number(0), None);
    /// assert_eq!(Player::from_number(5), None);
    /// ```
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            3 => Some(Player::Three),
            4 => Some(Player::Four),
            _ => None,
        }
    }

    /// Seat that moves after this one.
    ///
    /// Cycles 1 → 2 → 3 → 4 → 1, wrapping back to seat 1 after the last
    /// active seat. Eliminations are not considered here.
    ///
    /// ```
    /// use clonium_engine::core::{Player, PlayerCount};
    ///
    /// assert_eq!(Player::Two.next(PlayerCount::Two), Player::One);
    /// assert_eq!(Player::Two.next(PlayerCount::Three), Player::Three);
    /// assert_eq!(Player::Four.next(PlayerCount::Four), Player::One);
    /// ```
    #[must_use]
    pub fn next(self, count: PlayerCount) -> Player {
        let next = self.index() + 1;
        if next >= count.get() {
            Player::One
        } else {
            Player::ALL[next]
        }
    }

    /// Is this seat in play for a game with `count` seats?
    #[must_use]
    pub fn is_active(self, count: PlayerCount) -> bool {
        self.index() < count.get()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Number of active seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCount {
    #[default]
    Two,
    Three,
    Four,
}

impl PlayerCount {
    /// Number of seats as a plain integer.
    #[must_use]
    pub const fn get(self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
        }
    }

    /// Iterate over the active seats in turn order.
    pub fn players(self) -> impl Iterator<Item = Player> {
        Player::ALL.into_iter().take(self.get())
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = ConfigError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            4 => Ok(PlayerCount::Four),
            other => Err(ConfigError::UnsupportedPlayerCount(other)),
        }
    }
}

/// A set of seats, stored as a 4-bit mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSet(u8);

impl PlayerSet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a seat. Returns `true` if it was not already present.
    pub fn insert(&mut self, player: Player) -> bool {
        let bit = 1 << player.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// Remove a seat. Returns `true` if it was present.
    pub fn remove(&mut self, player: Player) -> bool {
        let bit = 1 << player.index();
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        removed
    }

    #[must_use]
    pub const fn contains(self, player: Player) -> bool {
        self.0 & (1 << player.index()) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the seats in turn order.
    pub fn iter(self) -> impl Iterator<Item = Player> {
        Player::ALL.into_iter().filter(move |&p| self.contains(p))
    }
}

impl std::fmt::Debug for PlayerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Per-player data storage with O(1) access.
///
/// One entry per active seat. Indexing with an inactive seat panics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(count: PlayerCount, factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: count.players().map(factory).collect(),
        }
    }

    /// Create a map with default values.
    pub fn with_default(count: PlayerCount) -> Self
    where
        T: Default,
    {
        Self::new(count, |_| T::default())
    }

    /// Number of active seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
