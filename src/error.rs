//! Error taxonomy
//!
//! Two families of failure exist:
//!
//! - [`SolverError`]: surfaced to the caller. Raised while configuring the
//!   integrator or persisting a solution, never while stepping.
//! - [`crate::solver::Divergence`]: raised by the Newton iteration and consumed
//!   by the implicit stepper, which encodes it as a `NaN` tail in the output.

use std::collections::TryReserveError;

/// Errors returned by the public integrator API
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A limit, step size or initial state was rejected at configuration time
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Persistence was requested before any `solve` produced output
    #[error("no cached solution: call solve() before saving")]
    NoCachedSolution,

    /// The solution buffer could not be reserved for the requested grid
    #[error("cannot allocate a solution buffer of {capacity} samples")]
    AllocationFailure {
        capacity: usize,
        #[source]
        source: Option<TryReserveError>,
    },

    /// Writing the solution to its sink failed
    #[error("failed to write solution: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SolverError::InvalidArgument(message.into())
    }
}

/// Convenience alias used throughout the crate
pub type SolverResult<T> = Result<T, SolverError>;
