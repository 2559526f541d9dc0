//! Shared scenarios for the workspace integration tests.

use itc_model::{BindingPolynomial, Experiment, ModelError, TitrationSeries};

/// A one-site, three-shot titration small enough to solve by hand.
///
/// `β = 1e5`, `ΔH = -5000`, a constant stationary total of `1e-5`, and
/// titrant totals of `0`, `2e-5`, and `4e-5` in a `1.4e-3` cell.
pub struct ReferenceTitration;

impl ReferenceTitration {
    pub const BETA: f64 = 1e5;
    pub const DH: f64 = -5000.0;
    pub const S_TOTAL: f64 = 1e-5;
    pub const T_CONC: [f64; 3] = [0.0, 2e-5, 4e-5];
    pub const CELL_VOLUME: f64 = 1.4e-3;

    /// # Errors
    ///
    /// Never fails for the reference values.
    pub fn polynomial() -> Result<BindingPolynomial, ModelError> {
        BindingPolynomial::new(vec![Self::BETA], vec![Self::DH])
    }

    /// # Errors
    ///
    /// Never fails for the reference values.
    pub fn experiment() -> Result<Experiment, ModelError> {
        let series = TitrationSeries::new(vec![Self::S_TOTAL; 3], Self::T_CONC.to_vec())?;
        Experiment::new(series, Self::CELL_VOLUME, vec![0.0; 2])
    }
}

/// Free titrant for one site, from the quadratic
/// `k·T² + (1 + k(S − T_total))·T − T_total = 0`.
#[must_use]
pub fn one_site_free_titrant(k: f64, s_total: f64, t_total: f64) -> f64 {
    let p = 1.0 + k * (s_total - t_total);
    let disc = (p * p + 4.0 * k * t_total).sqrt();
    if p >= 0.0 {
        2.0 * t_total / (p + disc)
    } else {
        (disc - p) / (2.0 * k)
    }
}
