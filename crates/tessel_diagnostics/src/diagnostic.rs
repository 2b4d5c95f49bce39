//! The diagnostic message type.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use tessel_source::Span;

/// A structured message about the input or the placement run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// One-line summary.
    pub message: String,
    /// Where the problem was detected ([`Span::DUMMY`] if not tied to input).
    pub primary_span: Span,
    /// Additional annotated spans.
    pub labels: Vec<Label>,
    /// `= note:` lines.
    pub notes: Vec<String>,
    /// `= help:` lines.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 105),
            "undeclared gate `g9`",
            Span::DUMMY,
        );
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(format!("{}", diag.code), "E105");
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 200),
            "pin offset outside gate",
            Span::DUMMY,
        )
        .with_label(Label::primary(Span::DUMMY, "this pin"))
        .with_note("gate `g1` is 2x2")
        .with_help("pin offsets are relative to the bottom-left corner");
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes, vec!["gate `g1` is 2x2"]);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serializes_to_json() {
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 100),
            "unrecognized line",
            Span::DUMMY,
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "Error");
        assert_eq!(json["message"], "unrecognized line");
    }
}
