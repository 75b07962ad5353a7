//! Board shapes.
//!
//! A layout only decides which cells are playable. Every generator checks
//! its dimensions against `MAX_WIDTH`/`MAX_HEIGHT` and fails instead of
//! clamping.

use serde::{Deserialize, Serialize};

use crate::core::LayoutError;

pub const MAX_WIDTH: usize = 12;
pub const MAX_HEIGHT: usize = 12;

/// Thickness of the always-playable ring in `RectangleWithSquares`.
const RING: i64 = 2;

/// Fixed `width × height` playability mask, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayableMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl PlayableMask {
    /// Build a mask from explicit rows (`rows[y][x]`).
    ///
    /// ```
    /// use clonium_engine::board::PlayableMask;
    ///
    /// let mask = PlayableMask::from_rows(vec![
    ///     vec![true, false],
    ///     vec![true, true],
    /// ]).unwrap();
    /// assert_eq!(mask.width(), 2);
    /// assert!(!mask.is_playable(1, 0));
    /// ```
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimension("height", height, MAX_HEIGHT)?;
        check_dimension("width", width, MAX_WIDTH)?;

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: width,
                });
            }
        }

        let cells: Vec<bool> = rows.into_iter().flatten().collect();
        Self::checked(width, height, cells)
    }

    fn from_fn(width: usize, height: usize, playable: impl Fn(i64, i64) -> bool) -> Result<Self, LayoutError> {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x as i64, y as i64)))
            .map(|(x, y)| playable(x, y))
            .collect();
        Self::checked(width, height, cells)
    }

    fn checked(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, LayoutError> {
        if !cells.iter().any(|&c| c) {
            return Err(LayoutError::NoPlayableCells);
        }
        Ok(Self { width, height, cells })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Playability at `(x, y)`; out-of-bounds is unplayable.
    #[must_use]
    pub fn is_playable(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Named board shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Every cell playable.
    Rectangular { width: usize, height: usize },

    /// Outer rectangle with a centered inner hole.
    TwoRectangles {
        outer_width: usize,
        outer_height: usize,
        inner_width: usize,
        inner_height: usize,
    },

    /// Rectangle with a playable outer ring and cross, leaving four
    /// `square_side × square_side` holes inside the ring's corners.
    RectangleWithSquares {
        width: usize,
        height: usize,
        square_side: usize,
    },
}

impl Layout {
    /// Generate the playability mask.
    pub fn mask(&self) -> Result<PlayableMask, LayoutError> {
        match *self {
            Layout::Rectangular { width, height } => {
                check_dimension("width", width, MAX_WIDTH)?;
                check_dimension("height", height, MAX_HEIGHT)?;
                PlayableMask::from_fn(width, height, |_, _| true)
            }

            Layout::TwoRectangles {
                outer_width,
                outer_height,
                inner_width,
                inner_height,
            } => {
                check_dimension("outer width", outer_width, MAX_WIDTH)?;
                check_dimension("outer height", outer_height, MAX_HEIGHT)?;
                check_dimension("inner width", inner_width, MAX_WIDTH)?;
                check_dimension("inner height", inner_height, MAX_HEIGHT)?;
                if inner_width > outer_width || inner_height > outer_height {
                    return Err(LayoutError::InnerLargerThanOuter {
                        outer_width,
                        outer_height,
                        inner_width,
                        inner_height,
                    });
                }

                let off_x = ((outer_width - inner_width) / 2) as i64;
                let off_y = ((outer_height - inner_height) / 2) as i64;
                let (iw, ih) = (inner_width as i64, inner_height as i64);

                PlayableMask::from_fn(outer_width, outer_height, |x, y| {
                    x < off_x || y < off_y || x - off_x >= iw || y - off_y >= ih
                })
            }

            Layout::RectangleWithSquares {
                width,
                height,
                square_side,
            } => {
                check_dimension("width", width, MAX_WIDTH)?;
                check_dimension("height", height, MAX_HEIGHT)?;

                let (w, h, s) = (width as i64, height as i64, square_side as i64);

                PlayableMask::from_fn(width, height, |x, y| {
                    let on_ring = x < RING || y < RING || x >= w - RING || y >= h - RING;
                    let on_cross = (x >= RING + s && x < w - RING - s) || (y >= RING + s && y < h - RING - s);
                    on_ring || on_cross
                })
            }
        }
    }
}

fn check_dimension(axis: &'static str, value: usize, max: usize) -> Result<(), LayoutError> {
    if value == 0 || value > max {
        return Err(LayoutError::DimensionOutOfRange { axis, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(mask: &PlayableMask) -> Vec<String> {
        (0..mask.height())
            .map(|y| {
                (0..mask.width())
                    .map(|x| if mask.is_playable(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_rectangular() {
        let mask = Layout::Rectangular { width: 4, height: 3 }.mask().unwrap();
        assert_eq!(mask.width(), 4);
        assert_eq!(mask.height(), 3);
        assert_eq!(mask.playable_count(), 12);
        assert!(!mask.is_playable(4, 0));
    }

    #[test]
    fn test_rectangular_range_checks() {
        assert_eq!(
            Layout::Rectangular { width: 0, height: 3 }.mask(),
            Err(LayoutError::DimensionOutOfRange {
                axis: "width",
                value: 0,
                max: MAX_WIDTH
            })
        );
        assert_eq!(
            Layout::Rectangular { width: 3, height: 13 }.mask(),
            Err(LayoutError::DimensionOutOfRange {
                axis: "height",
                value: 13,
                max: MAX_HEIGHT
            })
        );
        assert!(Layout::Rectangular { width: 12, height: 12 }.mask().is_ok());
        assert!(Layout::Rectangular { width: 1, height: 1 }.mask().is_ok());
    }

    #[test]
    fn test_two_rectangles_frame() {
        let mask = Layout::TwoRectangles {
            outer_width: 5,
            outer_height: 5,
            inner_width: 3,
            inner_height: 1,
        }
        .mask()
        .unwrap();

        assert_eq!(
            render(&mask),
            vec!["#####", "#####", "#...#", "#####", "#####"]
        );
    }

    #[test]
    fn test_two_rectangles_uneven_offset_rounds_down() {
        let mask = Layout::TwoRectangles {
            outer_width: 4,
            outer_height: 4,
            inner_width: 1,
            inner_height: 1,
        }
        .mask()
        .unwrap();

        assert_eq!(render(&mask), vec!["####", "#.##", "####", "####"]);
    }

    #[test]
    fn test_two_rectangles_validation() {
        let too_big = Layout::TwoRectangles {
            outer_width: 4,
            outer_height: 4,
            inner_width: 5,
            inner_height: 2,
        };
        assert!(matches!(too_big.mask(), Err(LayoutError::InnerLargerThanOuter { .. })));

        let all_hole = Layout::TwoRectangles {
            outer_width: 3,
            outer_height: 3,
            inner_width: 3,
            inner_height: 3,
        };
        assert_eq!(all_hole.mask(), Err(LayoutError::NoPlayableCells));

        let inner_out_of_range = Layout::TwoRectangles {
            outer_width: 12,
            outer_height: 12,
            inner_width: 2,
            inner_height: 13,
        };
        assert!(matches!(
            inner_out_of_range.mask(),
            Err(LayoutError::DimensionOutOfRange { axis: "inner height", .. })
        ));
    }

    #[test]
    fn test_rectangle_with_squares() {
        let mask = Layout::RectangleWithSquares {
            width: 8,
            height: 8,
            square_side: 1,
        }
        .mask()
        .unwrap();

        assert_eq!(
            render(&mask),
            vec![
                "########",
                "########",
                "##.##.##",
                "########",
                "########",
                "##.##.##",
                "########",
                "########",
            ]
        );
    }

    #[test]
    fn test_rectangle_with_zero_squares_is_full() {
        let mask = Layout::RectangleWithSquares {
            width: 6,
            height: 5,
            square_side: 0,
        }
        .mask()
        .unwrap();
        assert_eq!(mask.playable_count(), 30);
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(
            PlayableMask::from_rows(vec![vec![true, true], vec![true]]),
            Err(LayoutError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            PlayableMask::from_rows(vec![vec![false, false]]),
            Err(LayoutError::NoPlayableCells)
        );
        assert!(matches!(
            PlayableMask::from_rows(vec![]),
            Err(LayoutError::DimensionOutOfRange { axis: "height", .. })
        ));
    }
}
