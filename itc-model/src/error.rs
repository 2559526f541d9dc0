use std::collections::TryReserveError;

use itc_solve::brent;
use thiserror::Error;

/// Errors that can occur when predicting titration heats.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The inputs violate a shape or value requirement.
    ///
    /// For example, mismatched sequence lengths, fewer than two shots,
    /// or a non-positive cell volume.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Working storage could not be reserved.
    ///
    /// No partial output is produced when this happens.
    #[error("failed to allocate working storage")]
    Allocation(#[from] TryReserveError),

    /// The root finder failed on a shot for a reason other than a missing
    /// sign change, which is handled by the endpoint fallback.
    #[error("free titrant solve failed at shot {shot}")]
    Solver {
        shot: usize,
        #[source]
        source: brent::Error,
    },
}

impl ModelError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
