//! Shared pipeline helpers for CLI commands.
//!
//! Config resolution, netlist loading, and diagnostic rendering used by
//! both `place` and `check`.

use std::error::Error;
use std::path::Path;

use tessel_common::Interner;
use tessel_config::{load_config, load_config_or_default, PlacerConfig};
use tessel_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use tessel_netlist::{parse_netlist, Netlist};
use tessel_source::SourceDb;

use crate::{GlobalArgs, ReportFormat};

/// Loads the config named by `--config`, else `./tessel.toml`, else the
/// defaults.
pub fn resolve_config(global: &GlobalArgs) -> Result<PlacerConfig, Box<dyn Error>> {
    let config = match global.config {
        Some(ref path) => load_config(path)
            .map_err(|e| format!("cannot load config {}: {e}", path.display()))?,
        None => load_config_or_default(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Reads and parses a netlist file. Problems with its contents go to
/// `sink`; only an unreadable file is an `Err`.
pub fn load_netlist(
    path: &Path,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<(SourceDb, Netlist), Box<dyn Error>> {
    let mut source_db = SourceDb::new();
    let file_id = source_db
        .load_file(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let netlist = parse_netlist(file_id, &source_db, interner, sink);
    Ok((source_db, netlist))
}

/// Renders diagnostics to stderr in text mode. In JSON mode nothing is
/// printed; callers embed the diagnostics in their report.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    format: ReportFormat,
    global: &GlobalArgs,
) {
    if format != ReportFormat::Text {
        return;
    }
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
}

/// The `   Result: …` line closing a text-mode run.
pub fn result_line(detail: &str, sink: &DiagnosticSink) -> String {
    format!(
        "   Result: {detail}{}{} error(s), {} warning(s)",
        if detail.is_empty() { "" } else { ", " },
        sink.error_count(),
        sink.warning_count()
    )
}
