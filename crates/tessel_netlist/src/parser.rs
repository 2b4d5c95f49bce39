//! Line-oriented netlist reader.
//!
//! Each non-blank line is split on whitespace and turned into one
//! [`Statement`]. Malformed lines are reported to the sink and dropped so
//! that every problem in a file is found in a single pass.

use crate::ast::{NameRef, PinRefSyntax, Statement};
use crate::codes;
use crate::data::Point;
use std::str::FromStr;
use tessel_common::Interner;
use tessel_diagnostics::{Diagnostic, DiagnosticSink, Label};
use tessel_source::{FileId, Span};

/// A whitespace-separated word and its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The word.
    pub text: &'src str,
    /// Its byte range in the file.
    pub span: Span,
}

/// Splits `line` into tokens. `base` is the byte offset of `line` in its file.
pub fn tokenize(line: &str, base: u32, file: FileId) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                tokens.push(make_token(line, s, i, base, file));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(make_token(line, s, line.len(), base, file));
    }
    tokens
}

fn make_token(line: &str, start: usize, end: usize, base: u32, file: FileId) -> Token<'_> {
    Token {
        text: &line[start..end],
        span: Span::new(file, base + start as u32, base + end as u32),
    }
}

/// Reads netlist statements from source text.
pub struct NetlistParser<'a> {
    source: &'a str,
    file: FileId,
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
}

impl<'a> NetlistParser<'a> {
    /// Creates a parser over `source`, which belongs to `file`.
    pub fn new(
        source: &'a str,
        file: FileId,
        interner: &'a Interner,
        sink: &'a DiagnosticSink,
    ) -> Self {
        Self {
            source,
            file,
            interner,
            sink,
        }
    }

    /// Parses every line, returning the well-formed statements.
    pub fn parse(&self) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut offset = 0u32;
        for line in self.source.split_inclusive('\n') {
            let tokens = tokenize(line, offset, self.file);
            offset += line.len() as u32;
            if let Some(stmt) = self.parse_line(&tokens) {
                statements.push(stmt);
            }
        }
        statements
    }

    fn parse_line(&self, tokens: &[Token<'_>]) -> Option<Statement> {
        let (first, last) = (tokens.first()?, tokens.last()?);
        let span = first.span.merge(last.span);
        match first.text {
            "pins" => self.parse_pins(tokens, span),
            "wire" => self.parse_wire(tokens, span),
            text if text.starts_with('g') => self.parse_gate(tokens, span),
            text => {
                self.sink.emit(
                    Diagnostic::error(
                        codes::UNKNOWN_KEYWORD,
                        format!("unrecognized line starting with `{text}`"),
                        first.span,
                    )
                    .with_help("lines must start with a gate name `g<name>`, `pins` or `wire`"),
                );
                None
            }
        }
    }

    /// `g<name> <width> <height>`
    fn parse_gate(&self, tokens: &[Token<'_>], span: Span) -> Option<Statement> {
        if tokens.len() != 3 {
            self.wrong_arity(span, "a gate declaration takes a name, a width and a height");
            return None;
        }
        let width = self.positive(&tokens[1], "gate width");
        let height = self.positive(&tokens[2], "gate height");
        Some(Statement::Gate {
            name: self.name(&tokens[0]),
            width: width?,
            height: height?,
            span,
        })
    }

    /// `pins <gate> <x1> <y1> <x2> <y2> ...`
    fn parse_pins(&self, tokens: &[Token<'_>], span: Span) -> Option<Statement> {
        if tokens.len() < 2 {
            self.wrong_arity(span, "a `pins` line needs a gate name");
            return None;
        }
        let coords = &tokens[2..];
        let mut ok = true;
        if coords.len() % 2 != 0 {
            let dangling = coords[coords.len() - 1];
            self.sink.emit(
                Diagnostic::error(
                    codes::ODD_COORDINATES,
                    format!(
                        "`pins` expects x/y pairs, found {} coordinates",
                        coords.len()
                    ),
                    dangling.span,
                )
                .with_label(Label::primary(dangling.span, "this coordinate has no partner")),
            );
            ok = false;
        }

        let mut offsets = Vec::with_capacity(coords.len() / 2);
        for pair in coords.chunks_exact(2) {
            let x = self.integer::<i64>(&pair[0], "pin x offset");
            let y = self.integer::<i64>(&pair[1], "pin y offset");
            match (x, y) {
                (Some(x), Some(y)) => {
                    offsets.push((Point::new(x, y), pair[0].span.merge(pair[1].span)))
                }
                _ => ok = false,
            }
        }

        ok.then(|| Statement::Pins {
            gate: self.name(&tokens[1]),
            offsets,
            span,
        })
    }

    /// `wire <gate>.p<k> <gate>.p<k>`
    fn parse_wire(&self, tokens: &[Token<'_>], span: Span) -> Option<Statement> {
        if tokens.len() != 3 {
            self.wrong_arity(span, "a wire joins exactly two pins");
            return None;
        }
        let a = self.pin_ref(&tokens[1]);
        let b = self.pin_ref(&tokens[2]);
        Some(Statement::Wire { a: a?, b: b?, span })
    }

    fn pin_ref(&self, token: &Token<'_>) -> Option<PinRefSyntax> {
        let parsed = token.text.split_once('.').and_then(|(gate, pin)| {
            let index = pin.strip_prefix('p')?.parse::<u32>().ok()?;
            (!gate.is_empty() && index > 0).then_some((gate, index))
        });
        let Some((gate, pin)) = parsed else {
            self.sink.emit(
                Diagnostic::error(
                    codes::BAD_PIN_REF,
                    format!("malformed pin reference `{}`", token.text),
                    token.span,
                )
                .with_help("pin references look like `g3.p2` (pins are numbered from 1)"),
            );
            return None;
        };
        let gate_span = Span::new(
            token.span.file,
            token.span.start,
            token.span.start + gate.len() as u32,
        );
        Some(PinRefSyntax {
            gate: NameRef {
                name: self.interner.get_or_intern(gate),
                span: gate_span,
            },
            pin,
            span: token.span,
        })
    }

    fn name(&self, token: &Token<'_>) -> NameRef {
        NameRef {
            name: self.interner.get_or_intern(token.text),
            span: token.span,
        }
    }

    fn positive(&self, token: &Token<'_>, what: &str) -> Option<u32> {
        match token.text.parse::<u32>() {
            Ok(v) if v > 0 => Some(v),
            _ => {
                self.bad_integer(token, what, "a positive integer");
                None
            }
        }
    }

    fn integer<T: FromStr>(&self, token: &Token<'_>, what: &str) -> Option<T> {
        let parsed = token.text.parse::<T>().ok();
        if parsed.is_none() {
            self.bad_integer(token, what, "an integer");
        }
        parsed
    }

    fn bad_integer(&self, token: &Token<'_>, what: &str, expected: &str) {
        self.sink.emit(
            Diagnostic::error(
                codes::BAD_INTEGER,
                format!("expected {expected}, found `{}`", token.text),
                token.span,
            )
            .with_label(Label::primary(token.span, what)),
        );
    }

    fn wrong_arity(&self, span: Span, help: &str) {
        self.sink.emit(
            Diagnostic::error(codes::WRONG_ARITY, "wrong number of tokens", span).with_help(help),
        );
    }
}
