//! Checks that need the whole netlist: pin indices on wires, pin offsets
//! inside their gate, and same-gate wires.

use crate::codes;
use crate::data::{Netlist, PinRef};
use tessel_common::Interner;
use tessel_diagnostics::{Diagnostic, DiagnosticSink, Label};
use tessel_source::Span;

/// Runs every post-parse check, reporting to `sink`.
pub fn validate(netlist: &Netlist, interner: &Interner, sink: &DiagnosticSink) {
    for gate in &netlist.gates {
        if gate.pins.iter().all(|&p| gate.contains_offset(p)) {
            continue;
        }
        for (i, &offset) in gate.pins.iter().enumerate() {
            if !gate.contains_offset(offset) {
                sink.emit(
                    Diagnostic::warning(
                        codes::PIN_OUTSIDE_GATE,
                        format!(
                            "pin `{}.p{}` at offset {offset} lies outside the {}x{} gate",
                            interner.resolve(gate.name),
                            i + 1,
                            gate.width,
                            gate.height
                        ),
                        gate.span,
                    )
                    .with_note("pin offsets are measured from the gate's bottom-left corner"),
                );
            }
        }
    }

    for wire in &netlist.wires {
        let missing_a = check_pin_exists(netlist, wire.a, wire.span, interner, sink);
        let missing_b = check_pin_exists(netlist, wire.b, wire.span, interner, sink);
        if !missing_a && !missing_b && wire.is_same_gate() && wire.a.pin != wire.b.pin {
            sink.emit(
                Diagnostic::warning(
                    codes::SAME_GATE_WIRE,
                    format!(
                        "wire between `{}` and `{}` stays inside one gate and is ignored",
                        netlist.pin_name(wire.a, interner),
                        netlist.pin_name(wire.b, interner)
                    ),
                    wire.span,
                )
                .with_label(Label::primary(wire.span, "ignored for clustering")),
            );
        }
    }
}

/// Emits `E107` if `pin` does not exist; returns `true` when it is missing.
fn check_pin_exists(
    netlist: &Netlist,
    pin: PinRef,
    span: Span,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> bool {
    if netlist.pin_offset(pin).is_some() {
        return false;
    }
    let gate = netlist.gate(pin.gate);
    sink.emit(
        Diagnostic::error(
            codes::MISSING_PIN,
            format!(
                "`{}` does not exist: gate `{}` has {} pin(s)",
                netlist.pin_name(pin, interner),
                interner.resolve(gate.name),
                gate.pin_count()
            ),
            span,
        )
        .with_label(Label::secondary(gate.span, "gate declared here")),
    );
    true
}
