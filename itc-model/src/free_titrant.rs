//! Free titrant concentration at each shot.
//!
//! Every shot is solved independently by inverting the mass balance of a
//! [`BindingPolynomial`] on the bracket `[0, T_final]`, where `T_final` is the
//! titrant total at the last shot. Titrant accumulates across the titration,
//! so no shot's free concentration can exceed it.

use itc_solve::{Equation, brent, min};
use tracing::{debug, trace};

use crate::{BindingPolynomial, ModelError, SolveConfig, TitrationSeries, buffer};

/// Bracket endpoint chosen when the mass balance has no sign change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// No free titrant.
    Lower,
    /// All of the shot's titrant is free.
    Upper,
}

/// How the free titrant concentration of a shot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The shot holds (effectively) no titrant, so nothing is free.
    NoTitrant,
    /// The bracket did not contain a sign change; the endpoint with the
    /// smaller residual magnitude was taken.
    Endpoint(Endpoint),
    /// The root finder ran.
    Solved { status: brent::Status, iters: usize },
}

/// Free titrant concentrations with per-shot diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTitrant {
    /// Free titrant concentration at each shot, within `[0, T_conc[j]]`.
    pub values: Vec<f64>,
    /// How each value was obtained.
    pub outcomes: Vec<ShotOutcome>,
}

impl FreeTitrant {
    /// Returns true if every solved shot met the root finder tolerance.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.outcomes.iter().all(|outcome| match outcome {
            ShotOutcome::Solved { status, .. } => *status == brent::Status::Converged,
            ShotOutcome::NoTitrant | ShotOutcome::Endpoint(_) => true,
        })
    }
}

/// Solves for the free titrant concentration at every shot.
///
/// # Errors
///
/// Returns an error if the config is invalid, storage cannot be reserved,
/// or the root finder fails on a shot (for example, a non-finite residual).
pub fn free_titrant(
    polynomial: &BindingPolynomial,
    series: &TitrationSeries,
    config: &SolveConfig,
) -> Result<FreeTitrant, ModelError> {
    config.validate().map_err(ModelError::invalid)?;

    let num_shots = series.num_shots();
    let mut values = buffer::with_capacity(num_shots)?;
    let mut outcomes = buffer::with_capacity(num_shots)?;

    let upper = series.final_titrant();
    let shots = series.s_conc_corr().iter().zip(series.t_conc());

    for (shot, (&s_total, &t_total)) in shots.enumerate() {
        let (value, outcome) = solve_shot(polynomial, s_total, t_total, upper, config)
            .map_err(|source| ModelError::Solver { shot, source })?;

        trace!(shot, t_total, t_free = value, ?outcome, "free titrant");
        values.push(value);
        outcomes.push(outcome);
    }

    Ok(FreeTitrant { values, outcomes })
}

fn solve_shot(
    polynomial: &BindingPolynomial,
    s_total: f64,
    t_total: f64,
    upper: f64,
    config: &SolveConfig,
) -> Result<(f64, ShotOutcome), brent::Error> {
    if t_total.abs() < config.zero_titrant_tol {
        return Ok((0.0, ShotOutcome::NoTitrant));
    }

    let balance = polynomial.mass_balance(s_total, t_total);
    let lower_residual = balance.residual(0.0);
    let upper_residual = balance.residual(upper);

    for (x, residual) in [(0.0, lower_residual), (upper, upper_residual)] {
        if !residual.is_finite() {
            return Err(brent::Error::NonFiniteResidual { x, residual });
        }
    }

    if same_sign(lower_residual, upper_residual) {
        let endpoint = nearest_endpoint(lower_residual, upper_residual);
        debug!(
            s_total,
            t_total,
            lower_residual,
            upper_residual,
            ?endpoint,
            "mass balance not bracketed, using endpoint"
        );
        let value = match endpoint {
            Endpoint::Lower => 0.0,
            Endpoint::Upper => t_total,
        };
        return Ok((value, ShotOutcome::Endpoint(endpoint)));
    }

    let solution = brent::solve_unobserved(&balance, [0.0, upper], &config.brent)?;

    // Round-off can land the root slightly above the shot's own total.
    let value = min(solution.x, t_total);
    Ok((
        value,
        ShotOutcome::Solved {
            status: solution.status,
            iters: solution.iters,
        },
    ))
}

/// Picks the endpoint whose residual is closer to zero.
///
/// Ties resolve to the upper endpoint when both residuals are negative and to
/// the lower endpoint when both are positive.
fn nearest_endpoint(lower_residual: f64, upper_residual: f64) -> Endpoint {
    if upper_residual < 0.0 {
        if upper_residual < lower_residual {
            Endpoint::Lower
        } else {
            Endpoint::Upper
        }
    } else if upper_residual < lower_residual {
        Endpoint::Upper
    } else {
        Endpoint::Lower
    }
}

/// True when both values are nonzero and have the same sign.
fn same_sign(a: f64, b: f64) -> bool {
    a != 0.0 && b != 0.0 && a.is_sign_negative() == b.is_sign_negative()
}
