//! The cell grid.
//!
//! `Board` owns every `Cell` for the lifetime of a game. Cells are created
//! once from the playability mask and only ever replaced by cells with the
//! same coordinates and playability.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::layout::{Layout, PlayableMask};
use crate::core::{Cell, LayoutError, Player, PlayerCount, PlayerMap, SyncError};
use crate::sync::StateSynchronizer;

/// `(x, y)` grid position.
pub type Coord = (usize, usize);

/// Up to four orthogonal neighbors.
pub type Neighbors = SmallVec<[Coord; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    mask: PlayableMask,
    /// Row-major, `cells[y * width + x]`.
    cells: Vec<Cell>,
}

impl Board {
    /// Empty board over the given mask.
    #[must_use]
    pub fn new(mask: PlayableMask) -> Self {
        let cells = (0..mask.height())
            .flat_map(|y| (0..mask.width()).map(move |x| (x, y)))
            .map(|(x, y)| {
                if mask.is_playable(x, y) {
                    Cell::empty(x, y)
                } else {
                    Cell::unplayable(x, y)
                }
            })
            .collect();

        Self { mask, cells }
    }

    /// Empty board for a named layout.
    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        Ok(Self::new(layout.mask()?))
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.mask.height()
    }

    #[must_use]
    pub fn mask(&self) -> &PlayableMask {
        &self.mask
    }

    #[must_use]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// In bounds and playable.
    #[must_use]
    pub fn can_play(&self, x: usize, y: usize) -> bool {
        self.mask.is_playable(x, y)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// Replace the cell at `(x, y)`.
    ///
    /// Panics if the position is out of bounds, the cell carries other
    /// coordinates, or its playability disagrees with the mask.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(self.in_bounds(x, y), "set_cell out of bounds at ({x}, {y})");
        assert_eq!((cell.x(), cell.y()), (x, y), "cell coordinates do not match position");
        assert_eq!(
            cell.playable(),
            self.mask.is_playable(x, y),
            "cell playability disagrees with mask at ({x}, {y})"
        );
        let index = self.index(x, y);
        self.cells[index] = cell;
    }

    /// Increment the cell at `(x, y)` for `player`.
    ///
    /// Panics if the cell is out of bounds or unplayable.
    pub fn increment(&mut self, x: usize, y: usize, player: Player) {
        assert!(self.in_bounds(x, y), "increment out of bounds at ({x}, {y})");
        let index = self.index(x, y);
        self.cells[index].increment(player);
    }

    /// Explode the cell at `(x, y)`.
    pub(crate) fn explode(&mut self, x: usize, y: usize) {
        let index = self.index(x, y);
        self.cells[index].explode();
    }

    /// Playable orthogonal neighbors, in west, north, east, south order.
    ///
    /// ```
    /// use clonium_engine::board::{Board, Layout};
    ///
    /// let board = Board::from_layout(&Layout::Rectangular { width: 3, height: 3 }).unwrap();
    /// assert_eq!(board.neighbors(0, 0).len(), 2);
    /// assert_eq!(board.neighbors(1, 0).len(), 3);
    /// assert_eq!(board.neighbors(1, 1).as_slice(), &[(0, 1), (1, 0), (2, 1), (1, 2)]);
    /// ```
    #[must_use]
    pub fn neighbors(&self, x: usize, y: usize) -> Neighbors {
        let mut result = Neighbors::new();
        if x > 0 && self.can_play(x - 1, y) {
            result.push((x - 1, y));
        }
        if y > 0 && self.can_play(x, y - 1) {
            result.push((x, y - 1));
        }
        if self.can_play(x + 1, y) {
            result.push((x + 1, y));
        }
        if self.can_play(x, y + 1) {
            result.push((x, y + 1));
        }
        result
    }

    /// Neighbor cells of `(x, y)`, same order as `neighbors`.
    pub fn neighbor_cells(&self, x: usize, y: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.neighbors(x, y)
            .into_iter()
            .map(move |(nx, ny)| &self.cells[self.index(nx, ny)])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells owned by `player`, row-major.
    pub fn owned_cells(&self, player: Player) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.is_owned_by(player))
    }

    /// Number of cells owned by `player`.
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.owned_cells(player).count() as u32
    }

    /// Scores for every active seat.
    #[must_use]
    pub fn scores(&self, count: PlayerCount) -> PlayerMap<u32> {
        let mut scores = PlayerMap::with_default(count);
        for owner in self.cells.iter().filter_map(Cell::owner) {
            if owner.is_active(count) {
                scores[owner] += 1;
            }
        }
        scores
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.mask.playable_count()
    }

    /// Playable cells holding a nonzero value.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.playable() && c.value() > 0).count()
    }

    /// Sum of all cell values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.value())).sum()
    }

    /// Textual sync payload of every owned cell.
    pub fn serialize(&self) -> Result<String, SyncError> {
        StateSynchronizer::encode_text(self)
    }

    /// Overlay a textual sync payload. Returns the number of cells written.
    pub fn deserialize(&mut self, data: &str) -> Result<usize, SyncError> {
        StateSynchronizer::apply_text(self, data)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width() + x
    }
}

impl std::fmt::Display for Board {
    /// `##` hole, `..` empty, otherwise seat number then value.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width()) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell.owner() {
                    _ if !cell.playable() => "##".to_string(),
                    None => "..".to_string(),
                    Some(p) => format!("{}{}", p.number(), cell.value()),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
