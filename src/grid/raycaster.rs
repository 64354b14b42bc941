//! Bresenham line rasterization for occupancy grid updates.
//!
//! Integer-only algorithm for listing the grid cells between two cells:
//!
//! ```text
//! From (0,0) to (7,3):
//!
//!     3 │             ● ●
//!     2 │         ● ●
//!     1 │     ● ●
//!     0 ● ●
//!       └────────────────
//!        0 1 2 3 4 5 6 7
//! ```
//!
//! The walk always runs along the dominant axis in increasing order. When
//! the caller's start lies "after" the end on that axis the endpoints are
//! swapped for the walk and the result is reversed afterwards, so
//! rasterizing `a → b` yields exactly the reverse of `b → a`.
//!
//! [`cells_along_ray`] knows nothing about grid bounds; cells may have
//! negative indices. [`BresenhamLine::within`] limits the walk to the part
//! of the line whose dominant-axis index lies inside a grid, jumping the
//! error term ahead instead of stepping through cells that can never be
//! written. The cells it yields are exactly the matching cells of the full
//! walk.
//!
//! Walk state is `i64` so lines between saturated `i32` cells (beams with
//! huge ranges) cannot overflow.

use crate::core::GridCoord;

/// Bresenham walk over the dominant axis.
///
/// Yields cells in *walk order*: increasing along the dominant axis, which
/// is not necessarily start-to-end. Check [`is_reversed`](Self::is_reversed)
/// or use [`cells_along_ray`] for start-to-end order.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: i64,
    y: i64,
    end_x: i64,
    delta_x: i64,
    delta_y: i64,
    y_step: i64,
    error: i64,
    steep: bool,
    reversed: bool,
    done: bool,
    skipped: usize,
}

impl BresenhamLine {
    /// Prepare the walk between two cells.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let (mut x1, mut y1, mut x2, mut y2) = (
            i64::from(start.x),
            i64::from(start.y),
            i64::from(end.x),
            i64::from(end.y),
        );

        // Walk the axis with the larger extent
        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        if steep {
            std::mem::swap(&mut x1, &mut y1);
            std::mem::swap(&mut x2, &mut y2);
        }

        // Always walk in increasing x
        let reversed = x1 > x2;
        if reversed {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        let delta_x = x2 - x1;
        let delta_y = (y2 - y1).abs();

        Self {
            x: x1,
            y: y1,
            end_x: x2,
            delta_x,
            delta_y,
            y_step: if y1 < y2 { 1 } else { -1 },
            error: delta_x / 2,
            steep,
            reversed,
            done: false,
            skipped: 0,
        }
    }

    /// Prepare the walk between two cells, restricted to the cells whose
    /// dominant-axis index falls inside a `width × height` grid.
    ///
    /// The minor-axis index of a yielded cell may still be outside the grid.
    /// [`skipped`](Self::skipped) reports how many cells were left out.
    pub fn within(start: GridCoord, end: GridCoord, width: usize, height: usize) -> Self {
        let mut line = Self::new(start, end);
        let extent = if line.steep { height } else { width };
        let last = i64::try_from(extent).unwrap_or(i64::MAX) - 1;

        let first = line.x.max(0);
        let end = line.end_x.min(last);
        if first > end {
            line.done = true;
            line.skipped = line.cell_count();
        } else {
            line.skipped = line.cell_count() - ((end - first) as usize + 1);
            line.advance_to(first);
            line.end_x = end;
        }
        line
    }

    /// Move the walk forward to dominant-axis index `x` without yielding.
    ///
    /// After `k` steps the minor axis has moved `m` times, where `m` is the
    /// smallest count keeping `error - k·Δy + m·Δx` non-negative.
    fn advance_to(&mut self, x: i64) {
        let steps = i128::from(x - self.x);
        if steps <= 0 {
            return;
        }

        let delta_x = i128::from(self.delta_x);
        let delta_y = i128::from(self.delta_y);
        let deficit = steps * delta_y - i128::from(self.error);
        let moves = if deficit <= 0 {
            0
        } else {
            (deficit + delta_x - 1) / delta_x
        };

        // Both results are bounded by the i64 line extents
        self.y += self.y_step * moves as i64;
        self.error = (i128::from(self.error) - steps * delta_y + moves * delta_x) as i64;
        self.x = x;
    }

    /// Cells of the full line left out by [`within`](Self::within).
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Does walk order run from `end` back to `start`?
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Number of cells on the full line, start to end.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.delta_x as usize + 1
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // The walk never leaves the box spanned by two i32 endpoints
        let (x, y) = (self.x as i32, self.y as i32);
        let result = if self.steep {
            GridCoord::new(y, x)
        } else {
            GridCoord::new(x, y)
        };

        if self.x == self.end_x {
            self.done = true;
            return Some(result);
        }

        self.error -= self.delta_y;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.delta_x;
        }
        self.x += 1;

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            (self.end_x - self.x) as usize + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

/// All cells on the segment from `start` to `end`, both inclusive, in
/// start-to-end order.
pub fn cells_along_ray(start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    let line = BresenhamLine::new(start, end);
    let reversed = line.is_reversed();

    let mut cells: Vec<GridCoord> = line.collect();
    if reversed {
        cells.reverse();
    }
    cells
}

/// Cells on the segment from `start` to `end` whose dominant-axis index lies
/// inside a `width × height` grid, in start-to-end order, together with the
/// number of line cells left out.
pub fn cells_within(
    start: GridCoord,
    end: GridCoord,
    width: usize,
    height: usize,
) -> (Vec<GridCoord>, usize) {
    let line = BresenhamLine::within(start, end, width, height);
    let reversed = line.is_reversed();
    let skipped = line.skipped();

    let mut cells: Vec<GridCoord> = line.collect();
    if reversed {
        cells.reverse();
    }
    (cells, skipped)
}
