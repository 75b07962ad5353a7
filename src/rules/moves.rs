//! Move records and outcomes.
//!
//! Rejection is an ordinary outcome (wrong turn, someone else's cell, a
//! double click while the board is busy) and is reported as data, never as
//! an error.

use serde::{Deserialize, Serialize};

use crate::cascade::CascadeReport;
use crate::core::{GameState, Player, PlayerMap, PlayerSet};

/// An accepted move, as kept in the game history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 0-based position in the history.
    pub sequence: u32,
    pub player: Player,
    pub x: usize,
    pub y: usize,
}

/// Why a move was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The game has a winner.
    GameOver,
    /// An earlier cascade failed to settle; the game accepts no more moves.
    Faulted,
    /// It is not this player's turn.
    NotYourTurn { expected: GameState, actual: Player },
    OutOfBounds,
    Unplayable,
    /// Players may only add to cells they already own.
    NotOwned,
    /// A "remote" move claimed to come from this peer's own seat.
    RemoteIsLocal,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::GameOver => write!(f, "game is over"),
            MoveRejection::Faulted => write!(f, "game is faulted"),
            MoveRejection::NotYourTurn { expected, actual } => {
                write!(f, "{actual} moved but state is {expected}")
            }
            MoveRejection::OutOfBounds => write!(f, "cell is outside the board"),
            MoveRejection::Unplayable => write!(f, "cell is not playable"),
            MoveRejection::NotOwned => write!(f, "cell is not owned by the mover"),
            MoveRejection::RemoteIsLocal => write!(f, "remote move from the local seat"),
        }
    }
}

/// Everything that happened as a result of one accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub record: MoveRecord,
    pub cascade: CascadeReport,
    pub scores: PlayerMap<u32>,
    /// Seats knocked out by this move.
    pub eliminated: PlayerSet,
    /// Set when this move decided the game.
    pub winner: Option<Player>,
    /// State after the move.
    pub state: GameState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(MoveReport),
    Rejected(MoveRejection),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&MoveReport> {
        match self {
            MoveOutcome::Applied(report) => Some(report),
            MoveOutcome::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            MoveOutcome::Applied(_) => None,
            MoveOutcome::Rejected(reason) => Some(*reason),
        }
    }
}
