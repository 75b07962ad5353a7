//! Error types.
//!
//! Only genuinely exceptional outcomes live here. A rejected move is a
//! normal game event and is reported through `MoveOutcome` instead.

use super::player::Player;
use crate::rules::MoveRejection;

/// Board-shape construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{axis} must be between 1 and {max} inclusive, got {value}")]
    DimensionOutOfRange {
        axis: &'static str,
        value: usize,
        max: usize,
    },

    #[error("inner rectangle {inner_width}x{inner_height} does not fit inside {outer_width}x{outer_height}")]
    InnerLargerThanOuter {
        outer_width: usize,
        outer_height: usize,
        inner_width: usize,
        inner_height: usize,
    },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("layout has no playable cell")]
    NoPlayableCells,
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported player count {0} (expected 2, 3 or 4)")]
    UnsupportedPlayerCount(usize),

    #[error("cascade round limit must be at least 1")]
    ZeroCascadeLimit,
}

/// Invalid starting position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("starting cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },

    #[error("starting cell ({x}, {y}) is not playable")]
    Unplayable { x: usize, y: usize },

    #[error("starting cell ({x}, {y}) has value {value}, expected 1..=3")]
    InvalidValue { x: usize, y: usize, value: u8 },

    #[error("{0} is not seated in this game")]
    InactivePlayer(Player),

    #[error("{0} has no starting cell")]
    MissingStart(Player),
}

/// Chain-reaction resolution did not reach a fixed point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CascadeError {
    #[error("cascade still unstable after {limit} rounds")]
    RoundLimitExceeded { limit: usize },
}

/// Rejected state-synchronization payload.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("malformed text payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed binary payload: {0}")]
    Binary(#[from] bincode::Error),

    #[error("record ({x}, {y}) is outside the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("record ({x}, {y}) targets an unplayable cell")]
    Unplayable { x: u8, y: u8 },

    #[error("record ({x}, {y}) names unknown player {player}")]
    UnknownPlayer { x: u8, y: u8, player: u8 },

    #[error("record ({x}, {y}) names {player}, who is not seated")]
    InactivePlayer { x: u8, y: u8, player: Player },

    #[error("record ({x}, {y}) has zero value")]
    ZeroValue { x: u8, y: u8 },

    #[error("record ({x}, {y}) appears more than once")]
    DuplicateCell { x: u8, y: u8 },
}

/// Umbrella error for the engine's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Cascade(#[from] CascadeError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("replayed move {sequence} was rejected: {reason}")]
    ReplayRejected { sequence: u32, reason: MoveRejection },
}
