/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Hit an exact zero or shrank the bracket below tolerance.
    Converged,
    /// Reached the iteration limit; the estimate is best effort.
    MaxIters,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Brent solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Estimate of the root.
    pub x: f64,
    /// Residual at `x`.
    pub residual: f64,
    /// Number of steps taken.
    pub iters: usize,
}

impl Solution {
    pub(super) fn new(status: Status, x: f64, residual: f64, iters: usize) -> Self {
        Self {
            status,
            x,
            residual,
            iters,
        }
    }

    /// Returns true if the solver met its tolerance.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
