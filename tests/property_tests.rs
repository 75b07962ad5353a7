//! Property tests over random playouts and random boards.

use proptest::prelude::*;

use clonium_engine::ai::RandomMover;
use clonium_engine::board::{Board, Layout};
use clonium_engine::cascade::{CascadeObserver, ChainReactionResolver};
use clonium_engine::core::{Cell, Player, PlayerCount, CRITICAL_MASS};
use clonium_engine::rules::{Game, GameBuilder};

fn layout_strategy() -> impl Strategy<Value = Layout> {
    prop_oneof![
        (2usize..=8, 2usize..=8).prop_map(|(width, height)| Layout::Rectangular { width, height }),
        (4usize..=10, 4usize..=10, 1usize..=2, 1usize..=2).prop_map(|(w, h, iw, ih)| Layout::TwoRectangles {
            outer_width: w,
            outer_height: h,
            inner_width: iw,
            inner_height: ih,
        }),
        (6usize..=12, 6usize..=12, 1usize..=2).prop_map(|(width, height, square_side)| {
            Layout::RectangleWithSquares {
                width,
                height,
                square_side,
            }
        }),
    ]
}

fn player_count_strategy() -> impl Strategy<Value = PlayerCount> {
    prop_oneof![Just(PlayerCount::Two), Just(PlayerCount::Three), Just(PlayerCount::Four)]
}

fn new_game(layout: &Layout, count: PlayerCount) -> Game {
    GameBuilder::from_layout(layout)
        .unwrap()
        .players(count)
        .corner_starts()
        .build()
        .unwrap()
}

/// Random owned cells over a full rectangle, some already critical.
fn board_strategy() -> impl Strategy<Value = Board> {
    (1usize..=12, 1usize..=12)
        .prop_flat_map(|(width, height)| {
            let cells = prop::collection::vec((0u8..=4, 0usize..=6), width * height);
            (Just(width), Just(height), cells)
        })
        .prop_map(|(width, height, cells)| {
            let mut board = Board::from_layout(&Layout::Rectangular { width, height }).unwrap();
            for (i, (player, value)) in cells.into_iter().enumerate() {
                let (x, y) = (i % width, i / width);
                if let (Some(player), true) = (Player::from_number(player), value > 0) {
                    board.set_cell(x, y, Cell::owned(x, y, player, value as u8));
                }
            }
            board
        })
}

/// Checks that a round never adds value to the board.
struct EnergyCheck {
    last: u64,
    grew: bool,
}

impl CascadeObserver for EnergyCheck {
    fn on_round(&mut self, _round: usize, _exploded: &[(usize, usize)], board: &Board) {
        let total = board.total_value();
        self.grew |= total > self.last;
        self.last = total;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Scores always add up to the number of occupied cells, and every
    /// playable cell is owned exactly when it holds a value.
    #[test]
    fn prop_scores_match_occupancy(
        layout in layout_strategy(),
        count in player_count_strategy(),
        seed in any::<u64>(),
    ) {
        let mut game = new_game(&layout, count);
        let mut mover = RandomMover::new(seed);

        for _ in 0..60 {
            let playout = mover.play_out(&mut game, 1).unwrap();
            let total: u32 = game.scores().iter().map(|(_, s)| *s).sum();
            prop_assert_eq!(total as usize, game.board().occupied_count());

            for cell in game.board().cells().filter(|c| c.playable()) {
                prop_assert_eq!(cell.owner().is_some(), cell.value() > 0);
                prop_assert!(cell.value() < CRITICAL_MASS);
            }
            if playout.moves == 0 {
                break;
            }
        }
    }

    /// Eliminated seats stay eliminated and never get the turn again.
    #[test]
    fn prop_eliminated_never_move(
        layout in layout_strategy(),
        count in player_count_strategy(),
        seed in any::<u64>(),
    ) {
        let mut game = new_game(&layout, count);
        let mut mover = RandomMover::new(seed);
        let mut lost = game.turns().lost_players();

        for _ in 0..200 {
            if mover.play_out(&mut game, 1).unwrap().moves == 0 {
                break;
            }
            let now = game.turns().lost_players();
            for player in lost.iter() {
                prop_assert!(now.contains(player));
            }
            if let Some(active) = game.state().active_player() {
                prop_assert!(!now.contains(active));
            }
            lost = now;
        }

        if let Some(winner) = game.winner() {
            prop_assert_eq!(lost.len() + 1, count.get());
            prop_assert!(!lost.contains(winner));
        }
    }

    /// Any board up to 12x12 settles well inside the default cap, and no
    /// round ever adds value.
    #[test]
    fn prop_cascade_terminates(board in board_strategy(), acting in 1u8..=4) {
        let mut board = board;
        let player = Player::from_number(acting).unwrap();
        let before = board.total_value();
        let mut check = EnergyCheck { last: before, grew: false };

        let report = ChainReactionResolver::default().resolve(&mut board, player, &mut check);

        prop_assert!(report.is_ok());
        prop_assert!(!check.grew);
        prop_assert!(board.total_value() <= before);
        prop_assert!(ChainReactionResolver::default().analyse(&board).is_empty());
    }

    /// A snapshot applied to a fresh board of the same shape reproduces
    /// every owned cell.
    #[test]
    fn prop_snapshot_round_trip(
        layout in layout_strategy(),
        count in player_count_strategy(),
        seed in any::<u64>(),
        moves in 0usize..40,
    ) {
        let mut game = new_game(&layout, count);
        RandomMover::new(seed).play_out(&mut game, moves).unwrap();

        let text = game.board().serialize().unwrap();
        let mut fresh = Board::from_layout(&layout).unwrap();
        fresh.deserialize(&text).unwrap();
        prop_assert_eq!(&fresh, game.board());

        let binary = game.sync_snapshot_binary().unwrap();
        let mut peer = new_game(&layout, count);
        peer.apply_snapshot_binary(&binary).unwrap();
        for cell in game.board().cells().filter(|c| c.owner().is_some()) {
            prop_assert_eq!(peer.board().cell(cell.x(), cell.y()), Some(cell));
        }
    }

    /// Replaying the move log reproduces the game.
    #[test]
    fn prop_replay_is_deterministic(
        layout in layout_strategy(),
        count in player_count_strategy(),
        seed in any::<u64>(),
    ) {
        let builder = GameBuilder::from_layout(&layout).unwrap().players(count).corner_starts();
        let mut game = builder.build().unwrap();
        RandomMover::new(seed).play_out(&mut game, 50).unwrap();

        let moves: Vec<_> = game.history().iter().copied().collect();
        let replayed = Game::replay(&builder, &moves).unwrap();

        prop_assert_eq!(replayed.board(), game.board());
        prop_assert_eq!(replayed.state(), game.state());
    }
}
