//! Statements read from a netlist file, before name resolution.

use crate::data::Point;
use serde::{Deserialize, Serialize};
use tessel_common::Ident;
use tessel_source::Span;

/// A gate name together with where it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// The interned name.
    pub name: Ident,
    /// Location of the name token.
    pub span: Span,
}

/// A `<gate>.p<k>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRefSyntax {
    /// The gate part.
    pub gate: NameRef,
    /// The 1-based pin index.
    pub pin: u32,
    /// Location of the whole token.
    pub span: Span,
}

/// One meaningful line of a netlist file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `g<name> <width> <height>`
    Gate {
        /// The declared name.
        name: NameRef,
        /// Width in cells.
        width: u32,
        /// Height in cells.
        height: u32,
        /// The whole line.
        span: Span,
    },
    /// `pins <gate> <x1> <y1> ...`
    Pins {
        /// The gate receiving the pins.
        gate: NameRef,
        /// Offsets with the span of their `x` token.
        offsets: Vec<(Point, Span)>,
        /// The whole line.
        span: Span,
    },
    /// `wire <gate>.p<k> <gate>.p<k>`
    Wire {
        /// First endpoint.
        a: PinRefSyntax,
        /// Second endpoint.
        b: PinRefSyntax,
        /// The whole line.
        span: Span,
    },
}
