//! Board geometry: playability masks, named layouts and the cell grid.

mod grid;
mod layout;

pub use grid::{Board, Coord, Neighbors};
pub use layout::{Layout, PlayableMask, MAX_HEIGHT, MAX_WIDTH};
