//! Coordinate normalization.

use crate::placement::Placement;
use tessel_netlist::Point;

/// Shifts every placed gate so that no coordinate is negative. An axis whose
/// smallest coordinate is already non-negative is left alone. Returns the
/// offset that was added.
///
/// Pin offsets are relative to their gate and move with it. Unplaced gates
/// are ignored. Applying this twice is the same as applying it once.
pub fn normalize(placement: &mut Placement) -> Point {
    let min = placement
        .iter_placed()
        .map(|(_, p)| p)
        .reduce(|a, b| Point::new(a.x.min(b.x), a.y.min(b.y)));
    let Some(min) = min else {
        return Point::ORIGIN;
    };
    let offset = Point::new((-min.x).max(0), (-min.y).max(0));
    if offset != Point::ORIGIN {
        placement.translate(offset);
    }
    offset
}
