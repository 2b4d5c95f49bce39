//! Diagnostic codes emitted while reading a netlist.

use tessel_diagnostics::{Category, DiagnosticCode};

/// A line starts with something other than `g<name>`, `pins` or `wire`.
pub const UNKNOWN_KEYWORD: DiagnosticCode = DiagnosticCode::new(Category::Error, 100);
/// A line has the wrong number of tokens for its keyword.
pub const WRONG_ARITY: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// A token that should be an integer is not one, or is out of range.
pub const BAD_INTEGER: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// A `pins` line has an unpaired coordinate.
pub const ODD_COORDINATES: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// A wire endpoint is not of the form `<gate>.p<k>`.
pub const BAD_PIN_REF: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
/// A `pins` or `wire` line names a gate that was never declared.
pub const UNDECLARED_GATE: DiagnosticCode = DiagnosticCode::new(Category::Error, 105);
/// The same gate name is declared twice.
pub const DUPLICATE_GATE: DiagnosticCode = DiagnosticCode::new(Category::Error, 106);
/// A wire names a pin index the gate does not have.
pub const MISSING_PIN: DiagnosticCode = DiagnosticCode::new(Category::Error, 107);
/// A pin offset lies outside the gate rectangle.
pub const PIN_OUTSIDE_GATE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 200);
/// A wire joins two pins of the same gate and is ignored for clustering.
pub const SAME_GATE_WIRE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
