//! Brent–Dekker root finding on a sign-changing bracket.
//!
//! Each step picks the fastest safe update: a secant step when only two
//! distinct points are known, inverse quadratic interpolation when three are,
//! and bisection whenever the interpolated step would not shrink the bracket
//! fast enough.
//!
//! The solver tracks three points:
//!
//! - `cur`: the current estimate, always the point with the smallest residual
//! - `pre`: the previous estimate
//! - `blk`: the "blocking" point, whose residual has the opposite sign of `cur`
//!
//! so the root always lies between `cur` and `blk`.

mod config;
mod error;
mod solution;

pub use config::Config;
pub use error::Error;
pub use solution::{Solution, Status};

use tracing::{debug, trace};

use crate::{Equation, Observer, min};

/// Control actions supported by the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the better of the last two estimates.
    StopEarly,
}

/// The kind of step used to reach a new estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Linear interpolation through the current and previous points.
    Secant,
    /// Inverse quadratic interpolation through all three points.
    InverseQuadratic,
    /// Halfway toward the blocking point.
    Bisection,
}

/// Iteration event emitted by the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// New estimate produced by this iteration.
    pub x: f64,
    /// Residual at the new estimate.
    pub residual: f64,
    /// Step kind that produced the new estimate.
    pub step: Step,
}

/// Finds a root of `equation` within `bracket`.
///
/// The residuals at the two endpoints must have opposite signs, or one of
/// them must be exactly zero, in which case that endpoint is returned
/// immediately. Running out of iterations is not an error: the current
/// estimate is returned with [`Status::MaxIters`].
///
/// # Errors
///
/// Returns an error if the config is invalid, an endpoint is non-finite,
/// the endpoint residuals share a sign, or the equation yields a non-finite
/// residual.
pub fn solve<E, Obs>(
    equation: &E,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    E: Equation + ?Sized,
    Obs: Observer<Event, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let [xa, xb] = bracket;
    for value in bracket {
        if !value.is_finite() {
            return Err(Error::NonFiniteBracket { value });
        }
    }

    let mut xpre = xa;
    let mut xcur = xb;
    let mut fpre = evaluate(equation, xpre)?;
    let mut fcur = evaluate(equation, xcur)?;

    if same_sign(fpre, fcur) {
        return Err(Error::NoSignChange {
            left: xa,
            right: xb,
            left_residual: fpre,
            right_residual: fcur,
        });
    }
    if fpre == 0.0 {
        return Ok(Solution::new(Status::Converged, xpre, fpre, 0));
    }
    if fcur == 0.0 {
        return Ok(Solution::new(Status::Converged, xcur, fcur, 0));
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iter in 0..config.max_iters {
        if fpre != 0.0 && fcur != 0.0 && !same_sign(fpre, fcur) {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }

        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = 0.5 * (config.x_abs_tol + config.x_rel_tol * xcur.abs());
        let sbis = 0.5 * (xblk - xcur);

        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(Solution::new(Status::Converged, xcur, fcur, iter));
        }

        let mut step = Step::Bisection;
        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let (stry, kind) = interpolate((xpre, fpre), (xcur, fcur), (xblk, fblk));

            if 2.0 * stry.abs() < min(spre.abs(), 3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
                step = kind;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = evaluate(equation, xcur)?;

        let event = Event {
            iter: iter + 1,
            x: xcur,
            residual: fcur,
            step,
        };
        trace!(iter = event.iter, x = xcur, residual = fcur, step = ?step, "brent step");

        if let Some(action) = observer.observe(&event) {
            match action {
                Action::StopEarly => {
                    let (x, residual) = if fpre.abs() < fcur.abs() {
                        (xpre, fpre)
                    } else {
                        (xcur, fcur)
                    };
                    return Ok(Solution::new(
                        Status::StoppedByObserver,
                        x,
                        residual,
                        iter + 1,
                    ));
                }
            }
        }
    }

    debug!(
        max_iters = config.max_iters,
        x = xcur,
        residual = fcur,
        "brent iteration budget exhausted"
    );
    Ok(Solution::new(Status::MaxIters, xcur, fcur, config.max_iters))
}

/// Runs the Brent solver without observation.
///
/// # Errors
///
/// Returns an error if the config is invalid, an endpoint is non-finite,
/// the endpoint residuals share a sign, or the equation yields a non-finite
/// residual.
pub fn solve_unobserved<E>(equation: &E, bracket: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    E: Equation + ?Sized,
{
    solve(equation, bracket, config, ())
}

/// Proposes an interpolated step away from `cur`.
///
/// Uses a secant through `pre` and `cur` when `pre` coincides with the
/// blocking point, otherwise inverse quadratic interpolation through all three.
#[allow(clippy::float_cmp)]
fn interpolate(
    (xpre, fpre): (f64, f64),
    (xcur, fcur): (f64, f64),
    (xblk, fblk): (f64, f64),
) -> (f64, Step) {
    if xpre == xblk {
        let stry = -fcur * (xcur - xpre) / (fcur - fpre);
        (stry, Step::Secant)
    } else {
        let dpre = (fpre - fcur) / (xpre - xcur);
        let dblk = (fblk - fcur) / (xblk - xcur);
        let stry = -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre));
        (stry, Step::InverseQuadratic)
    }
}

/// True when both values are nonzero and have the same sign.
fn same_sign(a: f64, b: f64) -> bool {
    a != 0.0 && b != 0.0 && a.is_sign_negative() == b.is_sign_negative()
}

fn evaluate<E: Equation + ?Sized>(equation: &E, x: f64) -> Result<f64, Error> {
    let residual = equation.residual(x);
    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}
