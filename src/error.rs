use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pilerust operations.
pub type PileResult<T> = Result<T, PileError>;

/// Closed error set for the analysis core.
///
/// Non-convergence and cancellation are NOT errors: solvers report them
/// inside the result record (`converged = false` plus a note) so the best
/// iterate is never lost.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PileError {
    /// Missing or non-physical input, caught during validation before any
    /// solve begins.
    #[error("[{code}] {message}")]
    InvalidInput { code: String, message: String },

    /// Pile/mesh geometry too degenerate to discretise.
    #[error("degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// The banded solver reported a non-factorable matrix.
    #[error("singular system: {message}")]
    Singular { message: String },
}

impl PileError {
    pub fn invalid_input(code: impl Into<String>, message: impl Into<String>) -> Self {
        PileError::InvalidInput {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        PileError::DegenerateGeometry {
            message: message.into(),
        }
    }

    pub fn singular(message: impl Into<String>) -> Self {
        PileError::Singular {
            message: message.into(),
        }
    }
}
