//! # clonium-engine
//!
//! Simulation core for a 2-4 player chain-reaction territory game.
//!
//! Players take turns adding one to a cell they own. A cell that reaches
//! critical mass (4) explodes: it empties and every playable orthogonal
//! neighbor gains one and changes hands to the mover. Explosions cascade
//! until the board is stable. A player with no cells left is out for good;
//! the last one standing wins.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same moves on the same starting board give the
//!    same result on every peer. Remote play replays moves; snapshots are
//!    only for catch-up.
//!
//! 2. **Rejections Are Data**: an invalid move is a `MoveOutcome`, not an
//!    error. Errors are reserved for bad input payloads, bad configuration,
//!    and cascades that refuse to settle.
//!
//! 3. **No Transport**: sessions plug in through `SessionHooks`; the engine
//!    never sleeps, renders or sends anything.
//!
//! ## Modules
//!
//! - `core`: players, cells, game state, configuration, errors, RNG
//! - `board`: board shapes and the cell grid
//! - `cascade`: chain-reaction resolution
//! - `rules`: the `Game` facade, move validation, turn order, victory
//! - `sync`: owned-cell snapshots for remote peers
//! - `session`: hooks, lobby presence and the move gate
//! - `ai`: random mover for simulated playouts

pub mod ai;
pub mod board;
pub mod cascade;
pub mod core;
pub mod rules;
pub mod session;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    CascadeError, Cell, ConfigError, CriticalRule, EngineError, GameConfig, GameRng, GameState, LayoutError, Player,
    PlayerCount, PlayerMap, PlayerSet, SetupError, SyncError, CRITICAL_MASS,
};

pub use crate::board::{Board, Coord, Layout, PlayableMask};

pub use crate::cascade::{CascadeObserver, CascadeReport, ChainReactionResolver};

pub use crate::rules::{Game, GameBuilder, MoveOutcome, MoveRecord, MoveRejection, MoveReport, TurnStateMachine};

pub use crate::sync::{StateSynchronizer, SyncRecord};

pub use crate::session::{MoveGate, NoopHooks, Presence, SessionHooks};

pub use crate::ai::RandomMover;
