//! Placement results.

use crate::grid::Rect;
use serde::{Deserialize, Serialize};
use tessel_netlist::{GateId, Netlist, PinRef, Point};

/// Bottom-left position of each gate, indexed by [`GateId`]. `None` means
/// the gate has not been placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    positions: Vec<Option<Point>>,
}

impl Placement {
    /// Creates a placement with `gate_count` unplaced gates.
    pub fn new(gate_count: usize) -> Self {
        Self {
            positions: vec![None; gate_count],
        }
    }

    /// The position of `gate`, if placed.
    pub fn position(&self, gate: GateId) -> Option<Point> {
        self.positions.get(gate.index()).copied().flatten()
    }

    /// Places `gate` at `anchor`.
    pub fn set(&mut self, gate: GateId, anchor: Point) {
        self.positions[gate.index()] = Some(anchor);
    }

    /// Returns `true` if `gate` has a position.
    pub fn is_placed(&self, gate: GateId) -> bool {
        self.position(gate).is_some()
    }

    /// Number of placed gates.
    pub fn placed_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// Number of gates tracked.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no gates are tracked.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Placed gates and their anchors, in gate order.
    pub fn iter_placed(&self) -> impl Iterator<Item = (GateId, Point)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (GateId::from_raw(i as u32), p)))
    }

    /// Gates without a position, in gate order.
    pub fn unplaced(&self) -> Vec<GateId> {
        self.positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| GateId::from_raw(i as u32))
            .collect()
    }

    /// Absolute position of `pin`, if its gate is placed and the pin exists.
    pub fn pin_position(&self, netlist: &Netlist, pin: PinRef) -> Option<Point> {
        Some(self.position(pin.gate)? + netlist.pin_offset(pin)?)
    }

    /// The rectangle `gate` covers, if placed.
    pub fn rect(&self, netlist: &Netlist, gate: GateId) -> Option<Rect> {
        let g = netlist.gate(gate);
        Some(Rect::of_gate(self.position(gate)?, g.width, g.height))
    }

    /// Moves every placed gate by `offset`.
    pub fn translate(&mut self, offset: Point) {
        for p in self.positions.iter_mut().flatten() {
            *p = *p + offset;
        }
    }

    /// Spread of the placed gate positions: `(max x - min x, max y - min y)`
    /// over anchors, or `(0, 0)` if nothing is placed. Gate extents are not
    /// counted.
    pub fn bounding_box(&self) -> (i64, i64) {
        let mut placed = self.iter_placed().map(|(_, p)| p);
        let Some(first) = placed.next() else {
            return (0, 0);
        };
        let (lo, hi) = placed.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        (hi.x - lo.x, hi.y - lo.y)
    }
}

/// What happened to one placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// The gate was placed with its bottom-left corner at `anchor`.
    Placed {
        /// The gate.
        gate: GateId,
        /// Its position before normalization.
        anchor: Point,
    },
    /// No candidate position fit the gate.
    Skipped(GateId),
}

impl PlacementOutcome {
    /// The gate this outcome is about.
    pub fn gate(&self) -> GateId {
        match self {
            PlacementOutcome::Placed { gate, .. } | PlacementOutcome::Skipped(gate) => *gate,
        }
    }
}

/// Summary of a placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Every attempt, in order.
    pub outcomes: Vec<PlacementOutcome>,
    /// HPWL of each net, indexed by [`NetId`](tessel_netlist::NetId).
    pub net_wirelength: Vec<i64>,
    /// Sum of `net_wirelength`.
    pub total_wirelength: i64,
    /// Gates still unplaced at the end of the run.
    pub unplaced: Vec<GateId>,
    /// Gates placed by the retry pass.
    pub retried: Vec<GateId>,
    /// Size of the candidate set at the end of the run.
    pub candidates_remaining: usize,
}

impl PlacementReport {
    /// Number of attempts that placed a gate.
    pub fn placed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PlacementOutcome::Placed { .. }))
            .count()
    }

    /// Number of attempts that found no position.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.placed_count()
    }
}
