//! Conformance test helpers for the Tessel placer.
//!
//! Runs netlist text through the whole pipeline (parse → validate → place →
//! normalize → write) and returns structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use tessel_common::Interner;
use tessel_config::{load_config_from_str, PlacerConfig};
use tessel_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use tessel_netlist::{parse_netlist_str, GateId, Netlist, Point};
use tessel_place::{output, place_design, PlaceError, PlacedDesign, Rect};

/// Result of running the full pipeline.
pub struct PipelineResult {
    /// The parsed netlist.
    pub netlist: Netlist,
    /// Interner holding the netlist's gate names.
    pub interner: Interner,
    /// The placement, if parsing succeeded and placement did not fail.
    pub placed: Option<PlacedDesign>,
    /// The placement error, if placement was attempted and failed.
    pub error: Option<PlaceError>,
    /// The rendered placement file, if a placement was produced.
    pub output: Option<String>,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Diagnostic codes in emission order, e.g. `["E105", "W201"]`.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// Looks up a gate by name.
    pub fn gate(&self, name: &str) -> Option<GateId> {
        self.netlist.find_gate(self.interner.get(name)?)
    }

    /// Normalized position of the named gate.
    pub fn position(&self, name: &str) -> Option<Point> {
        self.placed.as_ref()?.placement.position(self.gate(name)?)
    }

    /// Total wirelength of the placement.
    pub fn wirelength(&self) -> Option<i64> {
        Some(self.placed.as_ref()?.report.total_wirelength)
    }

    /// Rectangles of every placed gate.
    pub fn rects(&self) -> Vec<Rect> {
        let Some(placed) = &self.placed else {
            return Vec::new();
        };
        placed
            .placement
            .iter_placed()
            .filter_map(|(g, _)| placed.placement.rect(&self.netlist, g))
            .collect()
    }

    /// Returns the first pair of overlapping rectangles, if any.
    pub fn find_overlap(&self) -> Option<(Rect, Rect)> {
        let rects = self.rects();
        for (i, a) in rects.iter().enumerate() {
            if let Some(b) = rects[i + 1..].iter().find(|b| a.intersects(b)) {
                return Some((*a, *b));
            }
        }
        None
    }
}

/// Parses a `tessel.toml` body. Panics on invalid input.
pub fn make_config(toml: &str) -> PlacerConfig {
    load_config_from_str(toml).expect("invalid test config")
}

/// Runs the full pipeline with the default configuration.
pub fn full_pipeline(source: &str) -> PipelineResult {
    run_pipeline(source, &PlacerConfig::default())
}

/// Runs the full pipeline with a configuration given as TOML text.
pub fn full_pipeline_with_config(source: &str, toml: &str) -> PipelineResult {
    run_pipeline(source, &make_config(toml))
}

/// Parses, validates and, if there are no errors, places `source`.
pub fn run_pipeline(source: &str, config: &PlacerConfig) -> PipelineResult {
    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let (_, netlist) = parse_netlist_str("conformance.net", source, &interner, &sink);

    let (placed, error) = if sink.has_errors() {
        (None, None)
    } else {
        match place_design(&netlist, config, &interner, &sink) {
            Ok(placed) => (Some(placed), None),
            Err(e) => (None, Some(e)),
        }
    };

    let output = placed.as_ref().and_then(|p| {
        let mut buf = Vec::new();
        output::write_placement(
            &mut buf,
            &netlist,
            &p.placement,
            p.report.total_wirelength,
            &interner,
        )
        .ok()?;
        String::from_utf8(buf).ok()
    });

    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    PipelineResult {
        netlist,
        interner,
        placed,
        error,
        output,
        has_errors: error_count > 0,
        diagnostics,
        error_count,
        warning_count,
    }
}
