//! Shared foundational types for the Tessel placer.
//!
//! Provides interned gate identifiers and the internal error type used to
//! signal bugs (as opposed to user input problems, which are reported as
//! diagnostics).

#![warn(missing_docs)]

pub mod ident;
pub mod result;

pub use ident::{Ident, Interner};
pub use result::{InternalError, TesselResult};
