//! Game rules: move validation, turn order, elimination and victory.
//!
//! `Game` is the entry point. `TurnStateMachine` can also be driven
//! directly over a bare `Board` when no move validation is wanted.

mod game;
mod moves;
mod turn;

pub use game::{Game, GameBuilder, CORNER_START_VALUE};
pub use moves::{MoveOutcome, MoveRecord, MoveRejection, MoveReport};
pub use turn::{ScoreUpdate, TurnReport, TurnStateMachine};
