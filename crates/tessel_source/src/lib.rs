//! Netlist source text and locations within it.
//!
//! The [`SourceDb`] owns every loaded netlist file. Parsers attach [`Span`]s
//! to the tokens they read, and diagnostics resolve those spans back to
//! `file:line:col` through [`SourceDb::resolve_span`].

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{ResolvedSpan, SourceDb, SourceFile};
pub use span::{FileId, Span};
