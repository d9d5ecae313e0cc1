//! Evaluation failures.
//!
//! These are values, not exceptions: [`Evaluator::evaluate`](super::Evaluator::evaluate)
//! wraps them into a failed [`EvalResult`](super::EvalResult) and caches it like
//! any other result. Malformed parameter text is not an error at all; it falls
//! back to a default inside the operation.

use thiserror::Error;

use crate::ops::ComputeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The name is not in the registry.
    #[error("Unknown function: {name}")]
    UnknownOperation { name: String },

    /// The operation body failed.
    #[error("{operation} failed: {source}")]
    ComputeFailure {
        operation: String,
        source: ComputeError,
    },
}

impl EvalError {
    /// Short machine-readable kind, for payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::UnknownOperation { .. } => "unknown_operation",
            EvalError::ComputeFailure { .. } => "compute_failure",
        }
    }
}
