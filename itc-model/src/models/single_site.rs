//! Closed-form one-site binding.
//!
//! With a single site the mass balance is quadratic in the complex
//! concentration `[ST]`:
//!
//! ```text
//! [ST]² − (S + T + 1/K)·[ST] + S·T = 0
//! ```
//!
//! The physical root is the smaller one. It is computed as
//! `2·S·T / (b + √(b² − 4·S·T))`, which avoids cancellation when `S·T` is
//! small relative to `b²`.

use crate::{Experiment, ModelError, buffer};

use super::HeatModel;

/// One binding site with association constant `k` and enthalpy `dh`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleSite {
    pub k: f64,
    pub dh: f64,
}

impl Default for SingleSite {
    fn default() -> Self {
        Self {
            k: 1e6,
            dh: -4000.0,
        }
    }
}

impl SingleSite {
    /// Fraction of the stationary species that is bound.
    ///
    /// Shots without stationary species have nothing to bind, so their
    /// fraction is zero.
    fn fraction_bound(&self, s_total: f64, t_total: f64) -> f64 {
        if s_total <= 0.0 {
            return 0.0;
        }

        let b = s_total + t_total + 1.0 / self.k;
        let product = s_total * t_total;
        let disc = (b * b - 4.0 * product).max(0.0);
        let complex = 2.0 * product / (b + disc.sqrt());

        complex / s_total
    }
}

impl HeatModel for SingleSite {
    fn dq(&self, experiment: &Experiment) -> Result<Vec<f64>, ModelError> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(ModelError::invalid(format!(
                "association constant must be finite and positive, got {}",
                self.k
            )));
        }
        if !self.dh.is_finite() {
            return Err(ModelError::invalid("dH is not finite"));
        }

        let series = experiment.series();
        let mut fraction = buffer::with_capacity(series.num_shots())?;
        fraction.extend(
            series
                .s_conc_corr()
                .iter()
                .zip(series.t_conc())
                .map(|(&s, &t)| self.fraction_bound(s, t)),
        );

        let cell_volume = experiment.cell_volume();
        let mut heats = buffer::with_capacity(experiment.num_injections())?;
        heats.extend(
            fraction
                .windows(2)
                .zip(&series.s_conc_corr()[1..])
                .zip(experiment.dilution_heats())
                .map(|((pair, &s_total), &dilution)| {
                    cell_volume * s_total * self.dh * (pair[1] - pair[0]) + dilution
                }),
        );

        Ok(heats)
    }
}
