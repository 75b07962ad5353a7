//! Chain-reaction resolution.
//!
//! ## Example
//!
//! ```
//! use clonium_engine::board::{Board, Layout};
//! use clonium_engine::cascade::{ChainReactionResolver, NoopObserver};
//! use clonium_engine::core::Player;
//!
//! let mut board = Board::from_layout(&Layout::Rectangular { width: 3, height: 3 }).unwrap();
//! for _ in 0..4 {
//!     board.increment(1, 1, Player::One);
//! }
//!
//! let report = ChainReactionResolver::default()
//!     .resolve(&mut board, Player::One, &mut NoopObserver)
//!     .unwrap();
//!
//! assert_eq!(report.explosions, 1);
//! assert_eq!(board.score(Player::One), 4);
//! ```

mod resolver;

pub use resolver::{CascadeObserver, CascadeReport, ChainReactionResolver, NoopObserver};
