//! Diagnostic codes emitted by placement.

use tessel_diagnostics::{Category, DiagnosticCode};

/// A gate could not be placed and is left out of the output.
pub const UNPLACED_GATE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 300);
