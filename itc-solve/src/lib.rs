//! Derivative-free root finding for scalar equations.
//!
//! The solver in [`brent`] combines inverse quadratic interpolation, secant
//! steps, and bisection on a sign-changing bracket. It knows nothing about the
//! equation it solves beyond the single [`Equation::residual`] capability.

mod equation;
mod observe;

pub mod brent;

pub use equation::Equation;
pub use observe::Observer;

/// Returns the smaller of two values.
///
/// When the values compare equal or are unordered (a NaN is involved),
/// `b` is returned.
#[inline]
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}
