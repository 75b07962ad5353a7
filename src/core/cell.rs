//! A single board tile.
//!
//! Coordinates and playability are fixed at creation. Ownership and value
//! change only through `increment` and `explode`.
//!
//! ## Invariants
//!
//! - An unplayable cell never has an owner or a nonzero value.
//! - A playable cell has an owner iff its value is nonzero. `explode`
//!   clears the owner together with the value, so a cell left behind by an
//!   explosion is empty until a neighbor's explosion lands on it.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Value at which a cell becomes critical and explodes.
pub const CRITICAL_MASS: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    x: usize,
    y: usize,
    playable: bool,
    owner: Option<Player>,
    value: u8,
}

impl Cell {
    /// Playable, unowned cell.
    #[must_use]
    pub const fn empty(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            playable: true,
            owner: None,
            value: 0,
        }
    }

    /// Hole in the board.
    #[must_use]
    pub const fn unplayable(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            playable: false,
            owner: None,
            value: 0,
        }
    }

    /// Playable cell owned by `player` with the given value.
    ///
    /// Panics if `value` is zero, since owned cells always hold a value.
    #[must_use]
    pub fn owned(x: usize, y: usize, player: Player, value: u8) -> Self {
        assert!(value > 0, "owned cell must have a nonzero value");
        Self {
            x,
            y,
            playable: true,
            owner: Some(player),
            value,
        }
    }

    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    #[must_use]
    pub const fn playable(&self) -> bool {
        self.playable
    }

    #[must_use]
    pub const fn owner(&self) -> Option<Player> {
        self.owner
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.playable && self.owner.is_none()
    }

    #[must_use]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    /// Claim the cell for `player` and add one to its value.
    ///
    /// Panics on an unplayable cell: callers check playability first.
    pub fn increment(&mut self, player: Player) {
        assert!(
            self.playable,
            "increment on unplayable cell ({}, {})",
            self.x, self.y
        );
        self.owner = Some(player);
        self.value = self.value.saturating_add(1);
    }

    /// Burst a critical cell, leaving it empty.
    ///
    /// Panics if the value has not reached `CRITICAL_MASS`.
    pub fn explode(&mut self) {
        assert!(
            self.value >= CRITICAL_MASS,
            "explode on non-critical cell ({}, {}) with value {}",
            self.x,
            self.y,
            self.value
        );
        self.value = 0;
        self.owner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_unplayable() {
        let empty = Cell::empty(2, 3);
        assert_eq!((empty.x(), empty.y()), (2, 3));
        assert!(empty.playable());
        assert!(empty.is_empty());
        assert_eq!(empty.owner(), None);
        assert_eq!(empty.value(), 0);

        let hole = Cell::unplayable(0, 0);
        assert!(!hole.playable());
        assert!(!hole.is_empty());
        assert_eq!(hole.owner(), None);
    }

    #[test]
    fn test_increment_claims_cell() {
        let mut cell = Cell::owned(1, 1, Player::Two, 2);
        cell.increment(Player::One);

        assert_eq!(cell.owner(), Some(Player::One));
        assert_eq!(cell.value(), 3);
        assert!(cell.is_owned_by(Player::One));
    }

    #[test]
    #[should_panic(expected = "increment on unplayable cell")]
    fn test_increment_unplayable_panics() {
        let mut hole = Cell::unplayable(4, 4);
        hole.increment(Player::One);
    }

    #[test]
    fn test_explode_clears_cell() {
        let mut cell = Cell::owned(0, 0, Player::Three, 3);
        cell.increment(Player::Three);
        assert_eq!(cell.value(), CRITICAL_MASS);

        cell.explode();

        assert_eq!(cell.value(), 0);
        assert_eq!(cell.owner(), None);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_explode_over_critical() {
        let mut cell = Cell::owned(0, 0, Player::One, 5);
        cell.explode();
        assert!(cell.is_empty());
    }

    #[test]
    #[should_panic(expected = "explode on non-critical cell")]
    fn test_explode_below_threshold_panics() {
        let mut cell = Cell::owned(0, 0, Player::One, 3);
        cell.explode();
    }

    #[test]
    #[should_panic(expected = "nonzero value")]
    fn test_owned_zero_value_panics() {
        let _ = Cell::owned(0, 0, Player::One, 0);
    }
}
