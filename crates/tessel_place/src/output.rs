//! Placement and dimension file writers.
//!
//! The placement file is line-oriented:
//!
//! ```text
//! bounding_box <W> <H>
//! <gate> <x> <y>
//! ...
//! wirelength <N>
//! ```
//!
//! Gates appear in declaration order; unplaced gates are omitted.

use crate::error::PlaceError;
use crate::placement::Placement;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tessel_common::Interner;
use tessel_netlist::{GateId, Netlist};

/// Writes the placement file.
pub fn write_placement<W: Write>(
    out: &mut W,
    netlist: &Netlist,
    placement: &Placement,
    total_wirelength: i64,
    interner: &Interner,
) -> Result<(), PlaceError> {
    let (w, h) = placement.bounding_box();
    writeln!(out, "bounding_box {w} {h}")?;
    for (gate, p) in placement.iter_placed() {
        let name = interner.resolve(netlist.gate(gate).name);
        writeln!(out, "{name} {} {}", p.x, p.y)?;
    }
    writeln!(out, "wirelength {total_wirelength}")?;
    Ok(())
}

/// Writes `<gate> <width> <height>` for every gate, in declaration order.
pub fn write_dimensions<W: Write>(
    out: &mut W,
    netlist: &Netlist,
    interner: &Interner,
) -> Result<(), PlaceError> {
    for gate in &netlist.gates {
        writeln!(out, "{} {} {}", interner.resolve(gate.name), gate.width, gate.height)?;
    }
    Ok(())
}

/// One placed gate in a [`PlacementSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedGate {
    /// Gate name.
    pub name: String,
    /// Normalized x.
    pub x: i64,
    /// Normalized y.
    pub y: i64,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

/// Machine-readable view of a placement, for `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSummary {
    /// Spread of gate positions along x and y.
    pub bounding_box: (i64, i64),
    /// Total half-perimeter wirelength.
    pub wirelength: i64,
    /// Placed gates in declaration order.
    pub gates: Vec<PlacedGate>,
    /// Names of gates that could not be placed.
    pub unplaced: Vec<String>,
    /// Number of nets.
    pub nets: usize,
}

impl PlacementSummary {
    /// Builds the summary of a finished placement.
    pub fn new(
        netlist: &Netlist,
        placement: &Placement,
        total_wirelength: i64,
        nets: usize,
        interner: &Interner,
    ) -> Self {
        let name = |id: GateId| interner.resolve(netlist.gate(id).name).to_string();
        Self {
            bounding_box: placement.bounding_box(),
            wirelength: total_wirelength,
            gates: placement
                .iter_placed()
                .map(|(id, p)| {
                    let g = netlist.gate(id);
                    PlacedGate {
                        name: name(id),
                        x: p.x,
                        y: p.y,
                        width: g.width,
                        height: g.height,
                    }
                })
                .collect(),
            unplaced: placement.unplaced().into_iter().map(name).collect(),
            nets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_netlist::Point;
    use tessel_source::Span;

    fn netlist(interner: &Interner) -> Netlist {
        let mut nl = Netlist::new();
        nl.add_gate(interner.get_or_intern("g1"), 2, 2, Span::DUMMY);
        nl.add_gate(interner.get_or_intern("g2"), 2, 2, Span::DUMMY);
        nl.add_gate(interner.get_or_intern("g3"), 1, 4, Span::DUMMY);
        nl
    }

    fn render(nl: &Netlist, p: &Placement, wl: i64, interner: &Interner) -> String {
        let mut buf = Vec::new();
        write_placement(&mut buf, nl, p, wl, interner).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn placement_file_format() {
        let interner = Interner::new();
        let nl = netlist(&interner);
        let mut p = Placement::new(3);
        p.set(GateId::from_raw(0), Point::new(0, 2));
        p.set(GateId::from_raw(1), Point::new(0, 0));
        p.set(GateId::from_raw(2), Point::new(2, 0));
        assert_eq!(
            render(&nl, &p, 2, &interner),
            "bounding_box 2 2\ng1 0 2\ng2 0 0\ng3 2 0\nwirelength 2\n"
        );
    }

    #[test]
    fn unplaced_gates_are_omitted() {
        let interner = Interner::new();
        let nl = netlist(&interner);
        let mut p = Placement::new(3);
        p.set(GateId::from_raw(1), Point::new(0, 0));
        assert_eq!(
            render(&nl, &p, 0, &interner),
            "bounding_box 0 0\ng2 0 0\nwirelength 0\n"
        );
    }

    #[test]
    fn empty_placement() {
        let interner = Interner::new();
        assert_eq!(
            render(&Netlist::new(), &Placement::new(0), 0, &interner),
            "bounding_box 0 0\nwirelength 0\n"
        );
    }

    #[test]
    fn dimensions_file() {
        let interner = Interner::new();
        let nl = netlist(&interner);
        let mut buf = Vec::new();
        write_dimensions(&mut buf, &nl, &interner).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "g1 2 2\ng2 2 2\ng3 1 4\n");
    }

    #[test]
    fn summary_json() {
        let interner = Interner::new();
        let nl = netlist(&interner);
        let mut p = Placement::new(3);
        p.set(GateId::from_raw(0), Point::new(0, 0));
        let summary = PlacementSummary::new(&nl, &p, 0, 1, &interner);
        assert_eq!(summary.unplaced, vec!["g2", "g3"]);
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["bounding_box"], serde_json::json!([0, 0]));
        assert_eq!(json["gates"][0]["name"], "g1");
        assert_eq!(json["nets"], 1);
    }
}
