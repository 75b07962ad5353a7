//! Game configuration.
//!
//! Games are configured at startup with a `GameConfig`:
//! - how many seats are active
//! - which cells count as critical during cascade analysis
//! - how many cascade rounds may run before resolution is declared stuck
//!
//! Configs are serializable so a lobby can hand the same settings to every
//! peer.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerCount;

/// Default cap on cascade rounds for a single move.
pub const DEFAULT_MAX_CASCADE_ROUNDS: usize = 10_000;

/// Which cells the cascade analysis treats as critical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalRule {
    /// `value >= CRITICAL_MASS`. A cell pushed past the threshold in one
    /// round still explodes in the next.
    #[default]
    AtLeast,
    /// `value == CRITICAL_MASS`. Cells that overshoot the threshold stay
    /// inert. Kept for bug-compatible replays against older clients.
    Exact,
}

impl CriticalRule {
    /// Does a cell with this value explode?
    #[must_use]
    pub fn is_critical(self, value: u8) -> bool {
        match self {
            CriticalRule::AtLeast => value >= super::cell::CRITICAL_MASS,
            CriticalRule::Exact => value == super::cell::CRITICAL_MASS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Active seats (2-4).
    pub player_count: PlayerCount,

    /// Critical-cell detection rule.
    pub critical_rule: CriticalRule,

    /// Rounds a single cascade may run before it is reported as stuck.
    pub max_cascade_rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: PlayerCount::Two,
            critical_rule: CriticalRule::AtLeast,
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Config for `player_count` seats with default rules.
    pub fn new(player_count: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            player_count: PlayerCount::try_from(player_count)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_player_count(mut self, count: PlayerCount) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_critical_rule(mut self, rule: CriticalRule) -> Self {
        self.critical_rule = rule;
        self
    }

    #[must_use]
    pub fn with_max_cascade_rounds(mut self, rounds: usize) -> Self {
        self.max_cascade_rounds = rounds;
        self
    }

    /// Check settings that the type system does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cascade_rounds == 0 {
            return Err(ConfigError::ZeroCascadeLimit);
        }
        Ok(())
    }
}
