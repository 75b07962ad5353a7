//! Callbacks into the surrounding session (UI, room transport).

use crate::board::{Board, Coord};
use crate::cascade::CascadeObserver;
use crate::core::Player;
use crate::rules::MoveRecord;

/// Notifications a running game sends to its session.
///
/// All methods default to doing nothing.
pub trait SessionHooks {
    /// A cascade round finished. Animation pacing belongs here.
    fn on_cascade_round(&mut self, _round: usize, _exploded: &[Coord], _board: &Board) {}

    /// A move and its cascade are fully resolved. An online session
    /// broadcasts its snapshot from here when the move was its own.
    fn on_move_resolved(&mut self, _record: &MoveRecord, _board: &Board) {}

    /// The game was decided. Fired exactly once per game; tear down the
    /// room here.
    fn on_game_over(&mut self, _winner: Player) {}
}

/// Hooks that ignore everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}

/// Forwards cascade rounds to a session's hooks.
pub(crate) struct HookRelay<'a, H: ?Sized>(pub &'a mut H);

impl<H: SessionHooks + ?Sized> CascadeObserver for HookRelay<'_, H> {
    fn on_round(&mut self, round: usize, exploded: &[Coord], board: &Board) {
        self.0.on_cascade_round(round, exploded, board);
    }
}
