//! Half-perimeter wirelength.

use crate::cluster::Net;
use crate::placement::Placement;
use serde::{Deserialize, Serialize};
use tessel_netlist::{Netlist, Point};

/// Running bounding box of a set of points.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    extent: Option<(Point, Point)>,
}

impl BoundingBox {
    /// A box containing no points.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The box of a set of points.
    pub fn of(points: impl IntoIterator<Item = Point>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.include(p);
        }
        bbox
    }

    /// Returns `true` if no point has been folded in.
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.extent = Some(match self.extent {
            None => (p, p),
            Some((lo, hi)) => (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            ),
        });
    }

    /// The box grown to contain `p`, leaving `self` unchanged.
    pub fn with(mut self, p: Point) -> Self {
        self.include(p);
        self
    }

    /// Lower-left corner.
    pub fn min(&self) -> Option<Point> {
        self.extent.map(|(lo, _)| lo)
    }

    /// Upper-right corner.
    pub fn max(&self) -> Option<Point> {
        self.extent.map(|(_, hi)| hi)
    }

    /// `(max_x - min_x) + (max_y - min_y)`, or 0 for an empty box.
    pub fn hpwl(&self) -> i64 {
        match self.extent {
            None => 0,
            Some((lo, hi)) => (hi.x - lo.x) + (hi.y - lo.y),
        }
    }
}

/// Bounding box of the placed pins of `net`. Pins on unplaced gates are
/// left out.
pub fn net_bbox(netlist: &Netlist, placement: &Placement, net: &Net) -> BoundingBox {
    BoundingBox::of(
        net.pins
            .iter()
            .filter_map(|p| placement.pin_position(netlist, *p)),
    )
}

/// HPWL of a single net under `placement`.
pub fn net_hpwl(netlist: &Netlist, placement: &Placement, net: &Net) -> i64 {
    net_bbox(netlist, placement, net).hpwl()
}

/// Sum of HPWL over all nets.
pub fn total_hpwl(netlist: &Netlist, placement: &Placement, nets: &[Net]) -> i64 {
    nets.iter().map(|n| net_hpwl(netlist, placement, n)).sum()
}
