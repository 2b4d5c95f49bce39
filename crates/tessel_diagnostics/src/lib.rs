//! Structured diagnostics for netlist parsing and placement.
//!
//! [`Diagnostic`]s carry a severity, a code such as `E102`, a source span,
//! and optional labels/notes/help. They are collected in a
//! [`DiagnosticSink`] and rendered by a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
