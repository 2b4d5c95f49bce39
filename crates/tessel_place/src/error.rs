//! Placement errors.

use tessel_common::InternalError;
use tessel_netlist::GateId;
use thiserror::Error;

/// Errors that abort a placement run.
#[derive(Debug, Error)]
pub enum PlaceError {
    /// A gate had no feasible position and the policy is `fail`.
    #[error("no feasible position for gate `{name}`")]
    Infeasible {
        /// The gate.
        gate: GateId,
        /// Its declared name.
        name: String,
    },

    /// An internal invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Writing a placement or dimensions file failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
