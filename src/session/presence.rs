//! Lobby presence per seat.
//!
//! The room transport reports joins and leaves per seat; repeated reports
//! for the same seat are ignored. `present` is the headcount the board
//! screen shows while waiting for a full table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Player, PlayerCount, PlayerSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    joined: PlayerSet,
    present: usize,
}

impl Presence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join. Returns `false` if the seat was already present.
    pub fn join(&mut self, player: Player) -> bool {
        if !self.joined.insert(player) {
            return false;
        }
        self.present += 1;
        debug!(%player, present = self.present, "player joined");
        true
    }

    /// Record a leave. Returns `false` if the seat was already absent.
    pub fn leave(&mut self, player: Player) -> bool {
        if !self.joined.remove(player) {
            return false;
        }
        self.present = self.present.saturating_sub(1);
        debug!(%player, present = self.present, "player left");
        true
    }

    /// Lower the headcount to what the transport says is connected.
    ///
    /// Never raises it: joins are only counted through `join`.
    pub fn reconcile(&mut self, connected: usize) {
        if connected < self.present {
            debug!(from = self.present, to = connected, "presence reconciled");
            self.present = connected;
        }
    }

    #[must_use]
    pub fn present(&self) -> usize {
        self.present
    }

    #[must_use]
    pub fn is_joined(&self, player: Player) -> bool {
        self.joined.contains(player)
    }

    /// Every seat of a `count`-player game is present.
    #[must_use]
    pub fn is_full(&self, count: PlayerCount) -> bool {
        self.present >= count.get()
    }
}
