//! Rendering diagnostics for humans.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use crate::severity::Severity;
use tessel_source::SourceDb;

/// Formats a diagnostic into a string.
pub trait DiagnosticRenderer {
    /// Renders `diag`, resolving spans through `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// rustc-style terminal output:
///
/// ```text
/// error[E102]: expected a positive integer, found `x`
///   --> netlist.txt:3:4
///   |
/// 3 | g3 x 2
///   |    ^ gate width
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colour codes.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let header = format!("{}[{}]", diag.severity, diag.code);
        let mut out = format!("{}: {}\n", self.paint(diag.severity, &header), diag.message);

        if !diag.primary_span.is_dummy() {
            let span = diag.primary_span;
            let resolved = source_db.resolve_span(span);
            let file = source_db.get_file(span.file);
            let line_num = resolved.line.to_string();
            let gutter = " ".repeat(line_num.len());

            out.push_str(&format!("{gutter}--> {resolved}\n"));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!("{line_num} | {}\n", file.line_text(span.start)));

            let marker = diag
                .labels
                .iter()
                .find(|l| l.span == span)
                .map(|l| match l.style {
                    LabelStyle::Primary => ('^', format!(" {}", l.message)),
                    LabelStyle::Secondary => ('-', format!(" {}", l.message)),
                })
                .unwrap_or(('^', String::new()));
            let underline = marker.0.to_string().repeat(span.len().max(1) as usize);
            let indent = " ".repeat(resolved.col.saturating_sub(1) as usize);
            out.push_str(&format!("{gutter} | {indent}{underline}{}\n", marker.1));
        }

        for note in &diag.notes {
            out.push_str(&format!("  = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("  = help: {help}\n"));
        }
        out
    }
}
