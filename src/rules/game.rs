//! The game facade.
//!
//! `Game` owns the board, the turn state machine and the configuration, and
//! is the only place moves enter the engine. Each accepted move runs to
//! completion (increment, cascade, recount, turn pass) before the call
//! returns.
//!
//! ## Example
//!
//! ```
//! use clonium_engine::board::Layout;
//! use clonium_engine::core::{GameState, Player};
//! use clonium_engine::rules::GameBuilder;
//!
//! let mut game = GameBuilder::from_layout(&Layout::Rectangular { width: 6, height: 6 })
//!     .unwrap()
//!     .corner_starts()
//!     .build()
//!     .unwrap();
//!
//! let outcome = game.apply_move(0, 0, Player::One).unwrap();
//! assert!(outcome.is_applied());
//! assert_eq!(game.state(), GameState::Turn(Player::Two));
//! ```

use im::Vector;
use tracing::{debug, error, instrument};

use super::moves::{MoveOutcome, MoveRecord, MoveRejection, MoveReport};
use super::turn::{ScoreUpdate, TurnStateMachine};
use crate::board::{Board, Coord, Layout, PlayableMask};
use crate::cascade::ChainReactionResolver;
use crate::core::{
    CascadeError, Cell, EngineError, GameConfig, GameState, LayoutError, Player, PlayerCount, PlayerMap, SetupError,
};
use crate::session::{HookRelay, NoopHooks, SessionHooks};
use crate::sync::{StateSynchronizer, SyncRecord};

/// Value of every cell placed by `GameBuilder::corner_starts`.
pub const CORNER_START_VALUE: u8 = 3;

/// Builder for creating a `Game`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    mask: PlayableMask,
    config: GameConfig,
    corners: bool,
    starts: Vec<(usize, usize, Player, u8)>,
    local_player: Option<Player>,
}

impl GameBuilder {
    pub fn new(mask: PlayableMask) -> Self {
        Self {
            mask,
            config: GameConfig::default(),
            corners: false,
            starts: Vec::new(),
            local_player: None,
        }
    }

    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        Ok(Self::new(layout.mask()?))
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn players(mut self, count: PlayerCount) -> Self {
        self.config = self.config.with_player_count(count);
        self
    }

    /// Give `player` a starting cell. Later starts on the same cell win.
    pub fn start(mut self, x: usize, y: usize, player: Player, value: u8) -> Self {
        self.starts.push((x, y, player, value));
        self
    }

    /// One cell of value 3 per seat in the board corners: player 1 top-left,
    /// 2 bottom-right, 3 top-right, 4 bottom-left.
    pub fn corner_starts(mut self) -> Self {
        self.corners = true;
        self
    }

    /// Seat played by this peer. Without one the game is hot-seat.
    pub fn local_player(mut self, player: Player) -> Self {
        self.local_player = Some(player);
        self
    }

    pub fn build(&self) -> Result<Game, EngineError> {
        self.build_with_hooks(NoopHooks)
    }

    pub fn build_with_hooks<H: SessionHooks>(&self, hooks: H) -> Result<Game<H>, EngineError> {
        self.config.validate()?;
        let count = self.config.player_count;

        if let Some(local) = self.local_player {
            if !local.is_active(count) {
                return Err(SetupError::InactivePlayer(local).into());
            }
        }

        let mut board = Board::new(self.mask.clone());
        for (x, y, player, value) in self.corner_cells().chain(self.starts.iter().copied()) {
            if !board.in_bounds(x, y) {
                return Err(SetupError::OutOfBounds { x, y }.into());
            }
            if !board.can_play(x, y) {
                return Err(SetupError::Unplayable { x, y }.into());
            }
            if !(1..=3).contains(&value) {
                return Err(SetupError::InvalidValue { x, y, value }.into());
            }
            if !player.is_active(count) {
                return Err(SetupError::InactivePlayer(player).into());
            }
            board.set_cell(x, y, Cell::owned(x, y, player, value));
        }

        if let Some(player) = count.players().find(|&p| board.score(p) == 0) {
            return Err(SetupError::MissingStart(player).into());
        }

        Ok(Game {
            config: self.config,
            board,
            turns: TurnStateMachine::new(count),
            resolver: ChainReactionResolver::from_config(&self.config),
            history: Vector::new(),
            local_player: self.local_player,
            hooks,
            faulted: false,
        })
    }

    fn corner_cells(&self) -> impl Iterator<Item = (usize, usize, Player, u8)> + '_ {
        let (right, bottom) = (self.mask.width() - 1, self.mask.height() - 1);
        self.config
            .player_count
            .players()
            .filter(move |_| self.corners)
            .map(move |player| {
                let (x, y) = match player {
                    Player::One => (0, 0),
                    Player::Two => (right, bottom),
                    Player::Three => (right, 0),
                    Player::Four => (0, bottom),
                };
                (x, y, player, CORNER_START_VALUE)
            })
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Game<H: SessionHooks = NoopHooks> {
    config: GameConfig,
    board: Board,
    turns: TurnStateMachine,
    resolver: ChainReactionResolver,
    history: Vector<MoveRecord>,
    local_player: Option<Player>,
    hooks: H,
    /// Set once a cascade failed to settle.
    faulted: bool,
}

impl Game {
    /// Rebuild a game by replaying `moves` on a fresh build.
    ///
    /// Every peer running the same moves from the same builder reaches the
    /// same board.
    pub fn replay(builder: &GameBuilder, moves: &[MoveRecord]) -> Result<Game, EngineError> {
        let mut game = builder.build()?;
        for record in moves {
            if let MoveOutcome::Rejected(reason) = game.apply_move(record.x, record.y, record.player)? {
                return Err(EngineError::ReplayRejected {
                    sequence: record.sequence,
                    reason,
                });
            }
        }
        Ok(game)
    }
}

impl<H: SessionHooks> Game<H> {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.turns.state()
    }

    #[must_use]
    pub fn turns(&self) -> &TurnStateMachine {
        &self.turns
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn local_player(&self) -> Option<Player> {
        self.local_player
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.board.scores(self.config.player_count)
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.state().winner()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state().is_terminal()
    }

    /// A cascade failed to settle; no further moves are accepted.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Why `player` may not add to `(x, y)` right now, if anything.
    fn check_move(&self, x: usize, y: usize, player: Player) -> Option<MoveRejection> {
        let state = self.state();
        if self.faulted {
            Some(MoveRejection::Faulted)
        } else if state.is_terminal() {
            Some(MoveRejection::GameOver)
        } else if !self.turns.accepts(player) {
            Some(MoveRejection::NotYourTurn {
                expected: state,
                actual: player,
            })
        } else if !self.board.in_bounds(x, y) {
            Some(MoveRejection::OutOfBounds)
        } else if !self.board.can_play(x, y) {
            Some(MoveRejection::Unplayable)
        } else if !self.board.cell(x, y).is_some_and(|c| c.is_owned_by(player)) {
            Some(MoveRejection::NotOwned)
        } else {
            None
        }
    }

    /// Add one to `(x, y)` for `player` and resolve everything that follows.
    ///
    /// Invalid moves come back as `MoveOutcome::Rejected` and leave the game
    /// untouched. An `Err` means the cascade hit the round limit; the game is
    /// faulted from then on.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, x: usize, y: usize, player: Player) -> Result<MoveOutcome, CascadeError> {
        if let Some(reason) = self.check_move(x, y, player) {
            debug!(%reason, "move rejected");
            return Ok(MoveOutcome::Rejected(reason));
        }

        self.board.increment(x, y, player);
        let turn = self
            .turns
            .advance(player, &mut self.board, &self.resolver, &mut HookRelay(&mut self.hooks))
            .map_err(|err| {
                error!(%err, "cascade did not settle, game faulted");
                self.faulted = true;
                err
            })?;

        let record = MoveRecord {
            sequence: self.history.len() as u32,
            player,
            x,
            y,
        };
        self.history.push_back(record);
        debug!(
            rounds = turn.cascade.rounds,
            captures = turn.cascade.captures,
            state = %turn.state,
            "move applied"
        );

        self.hooks.on_move_resolved(&record, &self.board);
        if let Some(winner) = turn.update.winner {
            self.hooks.on_game_over(winner);
        }

        Ok(MoveOutcome::Applied(MoveReport {
            record,
            cascade: turn.cascade,
            scores: turn.update.scores,
            eliminated: turn.update.eliminated,
            winner: turn.update.winner,
            state: turn.state,
        }))
    }

    /// A move received from another peer.
    pub fn apply_remote_move(&mut self, x: usize, y: usize, player: Player) -> Result<MoveOutcome, CascadeError> {
        if self.local_player == Some(player) {
            debug!(%player, "remote move claims the local seat");
            return Ok(MoveOutcome::Rejected(MoveRejection::RemoteIsLocal));
        }
        self.apply_move(x, y, player)
    }

    /// A move from this peer: the local seat online, whoever is to move
    /// in hot-seat play.
    pub fn play(&mut self, x: usize, y: usize) -> Result<MoveOutcome, CascadeError> {
        match self.local_player.or_else(|| self.state().active_player()) {
            Some(player) => self.apply_move(x, y, player),
            None if self.faulted => Ok(MoveOutcome::Rejected(MoveRejection::Faulted)),
            None => Ok(MoveOutcome::Rejected(MoveRejection::GameOver)),
        }
    }

    /// Cells `player` may add to now, row-major. Empty when it is not their turn.
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> Vec<Coord> {
        if self.faulted || !self.turns.accepts(player) {
            return Vec::new();
        }
        self.board.owned_cells(player).map(|c| (c.x(), c.y())).collect()
    }

    /// JSON snapshot of every owned cell.
    pub fn sync_snapshot(&self) -> Result<String, EngineError> {
        Ok(StateSynchronizer::encode_text(&self.board)?)
    }

    /// Bincode snapshot of every owned cell.
    pub fn sync_snapshot_binary(&self) -> Result<Vec<u8>, EngineError> {
        Ok(StateSynchronizer::encode_binary(&self.board)?)
    }

    /// Overlay a JSON snapshot and recount scores.
    pub fn apply_snapshot(&mut self, data: &str) -> Result<ScoreUpdate, EngineError> {
        let records = StateSynchronizer::decode_text(data)?;
        self.overlay(&records)
    }

    /// Overlay a bincode snapshot and recount scores.
    pub fn apply_snapshot_binary(&mut self, data: &[u8]) -> Result<ScoreUpdate, EngineError> {
        let records = StateSynchronizer::decode_binary(data)?;
        self.overlay(&records)
    }

    fn overlay(&mut self, records: &[SyncRecord]) -> Result<ScoreUpdate, EngineError> {
        StateSynchronizer::check_seats(records, self.config.player_count)?;
        StateSynchronizer::deserialize(&mut self.board, records)?;

        let update = self.turns.update_scores(&self.board);
        match update.winner {
            Some(winner) => self.hooks.on_game_over(winner),
            None => self.turns.skip_eliminated(),
        }
        Ok(update)
    }
}
