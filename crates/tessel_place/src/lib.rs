//! Greedy placement engine for the Tessel placer.
//!
//! Takes a validated [`Netlist`] and assigns every gate a non-overlapping
//! integer position, keeping connected pins close together.
//!
//! # Pipeline
//!
//! 1. **Cluster** ([`cluster`]): union-find over wires to form nets.
//! 2. **Place** ([`placer`]): nets largest first; each new gate abuts an
//!    already placed one at the perimeter candidate with the lowest
//!    half-perimeter wirelength.
//! 3. **Normalize** ([`normalize`]): shift so the smallest coordinates are 0.
//! 4. **Write** ([`output`]): bounding box, gate positions, wirelength.
//!
//! # Usage
//!
//! ```ignore
//! use tessel_place::place_design;
//!
//! let placed = place_design(&netlist, &config, &interner, &sink)?;
//! let wirelength = placed.report.total_wirelength;
//! output::write_placement(&mut out, &netlist, &placed.placement, wirelength, &interner)?;
//! ```

#![warn(missing_docs)]

pub mod candidates;
pub mod cluster;
pub mod codes;
pub mod cost;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod output;
pub mod placement;
pub mod placer;

pub use cluster::{cluster_pins, Clustering, Net};
pub use error::PlaceError;
pub use grid::{Grid, Rect};
pub use placement::{Placement, PlacementOutcome, PlacementReport};
pub use placer::GreedyPlacer;

use tessel_common::Interner;
use tessel_config::PlacerConfig;
use tessel_diagnostics::{Diagnostic, DiagnosticSink};
use tessel_netlist::{Netlist, Point};

/// A finished placement.
#[derive(Debug, Clone)]
pub struct PlacedDesign {
    /// Normalized gate positions.
    pub placement: Placement,
    /// Outcomes and wirelength of the run.
    pub report: PlacementReport,
    /// The nets that were placed.
    pub clustering: Clustering,
    /// Offset applied by normalization.
    pub offset: Point,
}

/// Clusters, places and normalizes `netlist`.
///
/// Each gate left unplaced produces a warning on `sink`. Under
/// [`InfeasiblePolicy::Fail`](tessel_config::InfeasiblePolicy::Fail) the
/// first such gate is an error instead.
pub fn place_design(
    netlist: &Netlist,
    config: &PlacerConfig,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<PlacedDesign, PlaceError> {
    let clustering = cluster_pins(netlist);

    let mut grid = Grid::from_config(&config.grid);
    let placer = GreedyPlacer::new(netlist, interner, &mut grid, config.placement.on_infeasible);
    let (mut placement, report) = placer.run(&clustering)?;

    for &gate in &report.unplaced {
        let g = netlist.gate(gate);
        sink.emit(
            Diagnostic::warning(
                codes::UNPLACED_GATE,
                format!("gate `{}` could not be placed", interner.resolve(g.name)),
                g.span,
            )
            .with_note("no perimeter candidate fits it inside the grid")
            .with_help("enlarge the grid or use `on_infeasible = \"retry\"`"),
        );
    }

    let offset = normalize::normalize(&mut placement);
    Ok(PlacedDesign {
        placement,
        report,
        clustering,
        offset,
    })
}
