//! Name resolution: turns parsed statements into a [`Netlist`].
//!
//! Gate declarations are collected first, so `pins` and `wire` lines may
//! refer to gates declared later in the file.

use crate::ast::{NameRef, PinRefSyntax, Statement};
use crate::codes;
use crate::data::{Netlist, PinRef};
use crate::ids::GateId;
use tessel_common::Interner;
use tessel_diagnostics::{Diagnostic, DiagnosticSink, Label};

/// Builds a netlist from statements, reporting duplicate and undeclared
/// gates to `sink`.
pub fn build_netlist(
    statements: &[Statement],
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Netlist {
    let mut netlist = Netlist::new();

    for stmt in statements {
        let Statement::Gate {
            name,
            width,
            height,
            span,
        } = stmt
        else {
            continue;
        };
        if let Some(existing) = netlist.find_gate(name.name) {
            let first = netlist.gate(existing).span;
            sink.emit(
                Diagnostic::error(
                    codes::DUPLICATE_GATE,
                    format!("gate `{}` is declared more than once", interner.resolve(name.name)),
                    name.span,
                )
                .with_label(Label::primary(name.span, "redeclared here"))
                .with_label(Label::secondary(first, "first declared here")),
            );
            continue;
        }
        netlist.add_gate(name.name, *width, *height, *span);
    }

    for stmt in statements {
        match stmt {
            Statement::Gate { .. } => {}
            Statement::Pins { gate, offsets, .. } => {
                if let Some(id) = resolve_gate(&netlist, gate, interner, sink) {
                    for (offset, _) in offsets {
                        netlist.add_pin(id, *offset);
                    }
                }
            }
            Statement::Wire { a, b, span } => {
                let ra = resolve_pin(&netlist, a, interner, sink);
                let rb = resolve_pin(&netlist, b, interner, sink);
                if let (Some(ra), Some(rb)) = (ra, rb) {
                    netlist.add_wire(ra, rb, *span);
                }
            }
        }
    }

    netlist
}

fn resolve_gate(
    netlist: &Netlist,
    gate: &NameRef,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Option<GateId> {
    let found = netlist.find_gate(gate.name);
    if found.is_none() {
        sink.emit(Diagnostic::error(
            codes::UNDECLARED_GATE,
            format!("gate `{}` is not declared", interner.resolve(gate.name)),
            gate.span,
        ));
    }
    found
}

fn resolve_pin(
    netlist: &Netlist,
    pin: &PinRefSyntax,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Option<PinRef> {
    resolve_gate(netlist, &pin.gate, interner, sink).map(|gate| PinRef::new(gate, pin.pin))
}
