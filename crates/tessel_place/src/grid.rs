//! Occupancy grid.
//!
//! Tracks every cell covered by a placed gate and answers whether a
//! rectangle is inside the bounds and clear of all of them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tessel_common::{InternalError, TesselResult};
use tessel_config::GridConfig;
use tessel_netlist::Point;

/// An axis-aligned rectangle of grid cells, `origin` at the bottom-left.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left cell.
    pub origin: Point,
    /// Width in cells.
    pub width: i64,
    /// Height in cells.
    pub height: i64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(origin: Point, width: i64, height: i64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Creates the rectangle covered by a `width × height` gate at `origin`.
    pub fn of_gate(origin: Point, width: u32, height: u32) -> Self {
        Self::new(origin, i64::from(width), i64::from(height))
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.origin.x + self.width
    }

    /// Exclusive top edge.
    pub fn top(&self) -> i64 {
        self.origin.y + self.height
    }

    /// Returns `true` if the rectangle has no cells.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` if `p` is one of the rectangle's cells.
    pub fn contains_point(&self, p: Point) -> bool {
        (self.origin.x..self.right()).contains(&p.x) && (self.origin.y..self.top()).contains(&p.y)
    }

    /// Returns `true` if `other` lies entirely within `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Returns `true` if the two rectangles share at least one cell.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.top()
            && other.origin.y < self.top()
    }

    /// Every cell of the rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let (x0, x1) = (self.origin.x, self.right());
        (self.origin.y..self.top())
            .flat_map(move |y| (x0..x1).map(move |x| Point::new(x, y)))
    }

    /// The outermost ring of cells. Corners may be yielded twice.
    pub fn border_cells(&self) -> impl Iterator<Item = Point> {
        let (x0, y0, x1, y1) = (self.origin.x, self.origin.y, self.right() - 1, self.top() - 1);
        let rows = (x0..=x1).flat_map(move |x| [Point::new(x, y0), Point::new(x, y1)]);
        let cols = (y0..=y1).flat_map(move |y| [Point::new(x0, y), Point::new(x1, y)]);
        rows.chain(cols)
    }

    /// The cells not on the border.
    pub fn interior_cells(&self) -> impl Iterator<Item = Point> {
        let inner = Rect::new(
            Point::new(self.origin.x + 1, self.origin.y + 1),
            self.width - 2,
            self.height - 2,
        );
        (!inner.is_empty()).then(|| inner.cells()).into_iter().flatten()
    }
}

/// Fixed-bounds set of occupied cells.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Rect,
    occupied: HashSet<Point>,
}

impl Grid {
    /// Creates an empty grid covering exactly `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            occupied: HashSet::new(),
        }
    }

    /// Creates a `width × height` grid centred on the origin, so that
    /// placement can grow in every direction from `(0, 0)`.
    pub fn centered(width: u64, height: u64) -> Self {
        let width = i64::try_from(width).unwrap_or(i64::MAX);
        let height = i64::try_from(height).unwrap_or(i64::MAX);
        Self::new(Rect::new(Point::new(-(width / 2), -(height / 2)), width, height))
    }

    /// Creates the grid described by a configuration section.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::centered(config.width, config.height)
    }

    /// The grid bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns `true` if `cell` is covered by a placed gate.
    pub fn is_occupied(&self, cell: Point) -> bool {
        self.occupied.contains(&cell)
    }

    /// Returns `true` if `rect` is non-empty, inside the bounds, and shares
    /// no cell with any placed gate.
    ///
    /// The border is checked before the interior: a rejected candidate
    /// almost always collides with the neighbour it abuts.
    pub fn is_free(&self, rect: Rect) -> bool {
        if rect.is_empty() || !self.bounds.contains_rect(&rect) {
            return false;
        }
        if self.occupied.is_empty() {
            return true;
        }
        !rect.border_cells().any(|c| self.is_occupied(c))
            && !rect.interior_cells().any(|c| self.is_occupied(c))
    }

    /// Marks every cell of `rect` as occupied.
    ///
    /// Returns an error, leaving the grid unchanged, if `rect` is out of
    /// bounds or overlaps an occupied cell; callers must only commit
    /// rectangles that passed [`is_free`](Self::is_free).
    pub fn mark_occupied(&mut self, rect: Rect) -> TesselResult<()> {
        if !self.is_free(rect) {
            return Err(InternalError::new(format!(
                "cannot occupy {}x{} at {}: out of bounds or overlapping",
                rect.width, rect.height, rect.origin
            )));
        }
        self.occupied.extend(rect.cells());
        Ok(())
    }

    /// Occupied cells, in no particular order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.occupied.iter().copied()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }
}
