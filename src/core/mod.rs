//! Core engine types: players, cells, game state, configuration, errors, RNG.
//!
//! These are the leaf types every other module builds on.

pub mod player;
pub mod cell;
pub mod state;
pub mod config;
pub mod error;
pub mod rng;

pub use player::{Player, PlayerCount, PlayerMap, PlayerSet};
pub use cell::{Cell, CRITICAL_MASS};
pub use state::GameState;
pub use config::{CriticalRule, GameConfig, DEFAULT_MAX_CASCADE_ROUNDS};
pub use error::{CascadeError, ConfigError, EngineError, LayoutError, SetupError, SyncError};
pub use rng::GameRng;
