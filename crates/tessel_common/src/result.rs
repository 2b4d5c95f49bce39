//! Result and error types for internal invariant violations.

/// The result type for operations that can only fail because of a bug.
///
/// User-facing problems (bad input, infeasible placements under the default
/// policy) are reported through the diagnostic sink and the operation still
/// returns `Ok`.
pub type TesselResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Tessel, not a problem with the input.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
