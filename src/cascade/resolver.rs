//! Chain-reaction resolution.
//!
//! After every accepted move the board is driven to a fixed point:
//!
//! 1. **Analyse**: collect every owned cell the `CriticalRule` marks critical.
//! 2. Nothing critical: done.
//! 3. **Resolve**: explode each collected cell, then increment each of its
//!    playable neighbors for the moving player.
//! 4. Repeat.
//!
//! Each explosion removes at least `CRITICAL_MASS` from the board and hands
//! out at most that much, so total value never grows and it shrinks whenever
//! an edge or corner cell explodes. The round cap turns any cascade that
//! still fails to settle into a `CascadeError` instead of a hang.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::board::{Board, Coord};
use crate::core::{CascadeError, CriticalRule, GameConfig, Player, DEFAULT_MAX_CASCADE_ROUNDS};

/// Called after every resolved round.
///
/// This is the pacing hook: a UI can animate or delay here. The resolver
/// itself never waits.
pub trait CascadeObserver {
    /// `round` is 1-based; `exploded` lists the cells burst in that round.
    fn on_round(&mut self, round: usize, exploded: &[Coord], board: &Board);
}

/// Observer that ignores every round.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl CascadeObserver for NoopObserver {
    fn on_round(&mut self, _round: usize, _exploded: &[Coord], _board: &Board) {}
}

/// Summary of one full cascade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Rounds that exploded at least one cell.
    pub rounds: usize,
    /// Total explosions across all rounds.
    pub explosions: usize,
    /// Increments that took a cell away from another player.
    pub captures: usize,
}

impl CascadeReport {
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.rounds == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainReactionResolver {
    rule: CriticalRule,
    max_rounds: usize,
}

impl Default for ChainReactionResolver {
    fn default() -> Self {
        Self::new(CriticalRule::default(), DEFAULT_MAX_CASCADE_ROUNDS)
    }
}

impl ChainReactionResolver {
    #[must_use]
    pub fn new(rule: CriticalRule, max_rounds: usize) -> Self {
        Self { rule, max_rounds }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.critical_rule, config.max_cascade_rounds)
    }

    #[must_use]
    pub fn rule(&self) -> CriticalRule {
        self.rule
    }

    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Critical cells in row-major order.
    #[must_use]
    pub fn analyse(&self, board: &Board) -> Vec<Coord> {
        board
            .cells()
            .filter(|c| c.owner().is_some() && self.rule.is_critical(c.value()))
            .map(|c| (c.x(), c.y()))
            .collect()
    }

    /// Explode `critical` in order, crediting every neighbor to `player`.
    ///
    /// Returns the number of captures made.
    pub fn resolve_round(&self, board: &mut Board, critical: &[Coord], player: Player) -> usize {
        let mut captures = 0;
        for &(x, y) in critical {
            board.explode(x, y);
            for (nx, ny) in board.neighbors(x, y) {
                if board
                    .cell(nx, ny)
                    .and_then(|c| c.owner())
                    .is_some_and(|owner| owner != player)
                {
                    captures += 1;
                }
                board.increment(nx, ny, player);
            }
        }
        captures
    }

    /// Run analyse/resolve rounds until the board is stable.
    pub fn resolve<O>(&self, board: &mut Board, player: Player, observer: &mut O) -> Result<CascadeReport, CascadeError>
    where
        O: CascadeObserver + ?Sized,
    {
        let mut report = CascadeReport::default();

        loop {
            let critical = self.analyse(board);
            if critical.is_empty() {
                return Ok(report);
            }
            if report.rounds == self.max_rounds {
                warn!(limit = self.max_rounds, pending = critical.len(), "cascade round limit exceeded");
                return Err(CascadeError::RoundLimitExceeded {
                    limit: self.max_rounds,
                });
            }

            report.captures += self.resolve_round(board, &critical, player);
            report.explosions += critical.len();
            report.rounds += 1;

            trace!(round = report.rounds, exploded = critical.len(), %player, "cascade round");
            observer.on_round(report.rounds, &critical, board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Layout, PlayableMask};
    use crate::core::Cell;

    fn rect(width: usize, height: usize) -> Board {
        Board::from_layout(&Layout::Rectangular { width, height }).unwrap()
    }

    fn place(board: &mut Board, x: usize, y: usize, player: Player, value: u8) {
        board.set_cell(x, y, Cell::owned(x, y, player, value));
    }

    #[derive(Default)]
    struct Recorder {
        rounds: Vec<(usize, Vec<Coord>)>,
    }

    impl CascadeObserver for Recorder {
        fn on_round(&mut self, round: usize, exploded: &[Coord], _board: &Board) {
            self.rounds.push((round, exploded.to_vec()));
        }
    }

    #[test]
    fn test_analyse_selects_owned_critical_cells() {
        let mut board = rect(3, 3);
        place(&mut board, 0, 0, Player::One, 4);
        place(&mut board, 2, 2, Player::Two, 3);
        place(&mut board, 1, 1, Player::Two, 5);

        let resolver = ChainReactionResolver::default();
        assert_eq!(resolver.analyse(&board), vec![(0, 0), (1, 1)]);

        let exact = ChainReactionResolver::new(CriticalRule::Exact, 10);
        assert_eq!(exact.analyse(&board), vec![(0, 0)]);
    }

    #[test]
    fn test_quiet_board_resolves_immediately() {
        let mut board = rect(3, 3);
        place(&mut board, 1, 1, Player::One, 3);

        let report = ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut NoopObserver)
            .unwrap();

        assert!(report.is_quiet());
        assert_eq!(board.cell(1, 1).unwrap().value(), 3);
    }

    #[test]
    fn test_center_explosion_captures_all_neighbors() {
        let mut board = rect(3, 3);
        place(&mut board, 1, 1, Player::One, 4);
        place(&mut board, 1, 0, Player::Two, 2);

        let report = ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut NoopObserver)
            .unwrap();

        assert_eq!(report.rounds, 1);
        assert_eq!(report.explosions, 1);
        assert_eq!(report.captures, 1);
        assert!(board.cell(1, 1).unwrap().is_empty());
        assert_eq!(board.cell(1, 0).unwrap().value(), 3);
        for (x, y) in [(0, 1), (1, 0), (2, 1), (1, 2)] {
            assert_eq!(board.cell(x, y).unwrap().owner(), Some(Player::One));
        }
    }

    #[test]
    fn test_chain_across_rounds() {
        let mut board = rect(3, 1);
        place(&mut board, 0, 0, Player::One, 4);
        place(&mut board, 1, 0, Player::Two, 3);

        let mut recorder = Recorder::default();
        let report = ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut recorder)
            .unwrap();

        assert_eq!(report.rounds, 2);
        assert_eq!(recorder.rounds, vec![(1, vec![(0, 0)]), (2, vec![(1, 0)])]);
        assert_eq!(board.to_string(), "11 .. 11\n");
    }

    #[test]
    fn test_round_limit_is_reported() {
        let mut board = rect(3, 1);
        place(&mut board, 0, 0, Player::One, 4);
        place(&mut board, 1, 0, Player::One, 3);

        let result = ChainReactionResolver::new(CriticalRule::AtLeast, 1).resolve(&mut board, Player::One, &mut NoopObserver);

        assert_eq!(result, Err(CascadeError::RoundLimitExceeded { limit: 1 }));
    }

    #[test]
    fn test_overshoot_explodes_only_with_at_least_rule() {
        // Two critical cells both feed (1, 1), pushing it from 3 to 5 in
        // a single round.
        let build = || {
            let mut board = rect(3, 3);
            place(&mut board, 1, 0, Player::One, 4);
            place(&mut board, 0, 1, Player::One, 4);
            place(&mut board, 1, 1, Player::Two, 3);
            board
        };

        let mut exact_board = build();
        ChainReactionResolver::new(CriticalRule::Exact, 100)
            .resolve(&mut exact_board, Player::One, &mut NoopObserver)
            .unwrap();
        assert_eq!(exact_board.cell(1, 1).unwrap().value(), 5);

        let mut board = build();
        ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut NoopObserver)
            .unwrap();
        assert!(ChainReactionResolver::default().analyse(&board).is_empty());
        assert!(board.cells().all(|c| c.value() < 4));
    }

    #[test]
    fn test_isolated_cell_loses_all_value() {
        let mask = PlayableMask::from_rows(vec![vec![true, false, true]]).unwrap();
        let mut board = Board::new(mask);
        place(&mut board, 0, 0, Player::One, 4);

        let report = ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut NoopObserver)
            .unwrap();

        assert_eq!(report.explosions, 1);
        assert_eq!(board.total_value(), 0);
    }

    #[test]
    fn test_full_board_avalanche_settles() {
        let mut board = rect(12, 12);
        for y in 0..12 {
            for x in 0..12 {
                place(&mut board, x, y, Player::Two, 3);
            }
        }
        board.increment(5, 5, Player::One);

        let before = board.total_value();
        let report = ChainReactionResolver::default()
            .resolve(&mut board, Player::One, &mut NoopObserver)
            .unwrap();

        assert!(report.rounds > 1);
        assert!(board.total_value() <= before);
        assert!(board.cells().all(|c| c.value() < 4));
        assert_eq!(board.score(Player::Two) + board.score(Player::One), board.occupied_count() as u32);
    }
}
