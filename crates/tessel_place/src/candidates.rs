//! Perimeter candidate positions.
//!
//! Every placed gate contributes one candidate per cell just outside each
//! of its four edges. A new gate is tried flush against that edge with one
//! corner at the candidate cell.

use crate::grid::{Grid, Rect};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_netlist::Point;

/// Which side of an already-placed gate a candidate lies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Below the gate.
    Bottom,
    /// Above the gate.
    Top,
    /// Left of the gate.
    Left,
    /// Right of the gate.
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Bottom => write!(f, "bottom"),
            Edge::Top => write!(f, "top"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

/// An empty cell adjacent to a placed gate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Candidate {
    /// The cell itself.
    pub cell: Point,
    /// The side of the placed gate it touches.
    pub edge: Edge,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(cell: Point, edge: Edge) -> Self {
        Self { cell, edge }
    }

    /// Bottom-left anchor for a `width × height` gate placed at this
    /// candidate. The resulting rectangle covers the candidate cell and
    /// touches the edge it came from.
    pub fn anchor(&self, width: u32, height: u32) -> Point {
        let (w, h) = (i64::from(width), i64::from(height));
        match self.edge {
            Edge::Bottom => Point::new(self.cell.x, self.cell.y - h + 1),
            Edge::Left => Point::new(self.cell.x - w + 1, self.cell.y),
            Edge::Top | Edge::Right => self.cell,
        }
    }
}

/// Insertion-ordered set of candidates.
///
/// Iteration order is the order candidates were first added, which makes
/// cost ties resolve the same way on every run.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    set: IndexSet<Candidate>,
}

impl CandidateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the perimeter of a newly placed gate: bottom and top cells per
    /// column, then left and right cells per row. Returns how many were new.
    pub fn expand(&mut self, placed: Rect) -> usize {
        let before = self.set.len();
        let (x0, y0) = (placed.origin.x, placed.origin.y);
        for x in x0..placed.right() {
            self.set.insert(Candidate::new(Point::new(x, y0 - 1), Edge::Bottom));
            self.set.insert(Candidate::new(Point::new(x, placed.top()), Edge::Top));
        }
        for y in y0..placed.top() {
            self.set.insert(Candidate::new(Point::new(x0 - 1, y), Edge::Left));
            self.set.insert(Candidate::new(Point::new(placed.right(), y), Edge::Right));
        }
        self.set.len() - before
    }

    /// Drops candidates whose cell is now occupied or outside the grid.
    /// Returns how many were removed.
    pub fn remove_stale(&mut self, grid: &Grid) -> usize {
        let before = self.set.len();
        let bounds = grid.bounds();
        self.set
            .retain(|c| bounds.contains_point(c.cell) && !grid.is_occupied(c.cell));
        before - self.set.len()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> + '_ {
        self.set.iter()
    }

    /// Returns `true` if `candidate` is in the set.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.set.contains(candidate)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
