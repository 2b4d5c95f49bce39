//! Netlist model and reader for the Tessel placer.
//!
//! A netlist file declares gates (`g<name> <w> <h>`), their pin offsets
//! (`pins g<name> x y ...`) and wires between pins (`wire g1.p1 g2.p3`).
//! [`parse_netlist`] reads such a file into a [`Netlist`], reporting every
//! problem to a [`DiagnosticSink`]. Callers must check
//! [`DiagnosticSink::has_errors`] before placing the result.
//!
//! # Stages
//!
//! 1. **Parse** ([`parser`]): one [`Statement`](ast::Statement) per line.
//! 2. **Lower** ([`lower`]): resolve gate names, accumulate pins, build wires.
//! 3. **Validate** ([`validate`]): pin indices, pin offsets, same-gate wires.

#![warn(missing_docs)]

pub mod ast;
pub mod codes;
pub mod data;
pub mod ids;
pub mod lower;
pub mod parser;
pub mod validate;

pub use data::{Gate, Netlist, PinRef, Point, Wire};
pub use ids::{GateId, NetId};

use tessel_common::Interner;
use tessel_diagnostics::DiagnosticSink;
use tessel_source::{FileId, SourceDb};

/// Parses and validates the netlist file `file_id` from `source_db`.
pub fn parse_netlist(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Netlist {
    let file = source_db.get_file(file_id);
    let statements = parser::NetlistParser::new(&file.content, file_id, interner, sink).parse();
    let netlist = lower::build_netlist(&statements, interner, sink);
    validate::validate(&netlist, interner, sink);
    netlist
}

/// Parses netlist text held in memory. Returns the [`SourceDb`] so that
/// diagnostics can be rendered against it.
pub fn parse_netlist_str(
    name: &str,
    text: &str,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> (SourceDb, Netlist) {
    let mut source_db = SourceDb::new();
    let file_id = source_db.add_source(name, text.to_string());
    let netlist = parse_netlist(file_id, &source_db, interner, sink);
    (source_db, netlist)
}
