//! Two ligands competing for a single site.
//!
//! The titrant and a competitor already in the cell bind the same site with
//! constants `K` and `K_c`. Writing `c_a = K·S`, `c_b = K_c·S`, `r_a = T/S`
//! and `r_b = C/S`, the fraction `x` of the stationary species left free is
//! the largest root of
//!
//! ```text
//! x³ + α·x² + β·x + γ = 0
//! α = 1/c_a + 1/c_b + r_a + r_b − 1
//! β = (r_a − 1)/c_b + (r_b − 1)/c_a + 1/(c_a·c_b)
//! γ = −1/(c_a·c_b)
//! ```
//!
//! which has three real roots and is solved in trigonometric form
//! (Sigurskjold (2000) Anal. Biochem. 277:260–266). The titrant-bound and
//! competitor-bound fractions follow as `r_a·x/(1/c_a + x)` and
//! `r_b·x/(1/c_b + x)`.

use crate::{Experiment, ModelError, buffer};

use super::HeatModel;

/// Competitive binding of the titrant against a competitor species.
///
/// `competitor` holds the competitor concentration at every shot, usually
/// built with [`Titration::concentrations`](crate::Titration::concentrations).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleSiteCompetitor {
    pub k: f64,
    pub k_competitor: f64,
    pub dh: f64,
    pub dh_competitor: f64,
    pub competitor: Vec<f64>,
}

/// Bound fractions of the stationary species at one shot.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Occupancy {
    titrant: f64,
    competitor: f64,
}

impl SingleSiteCompetitor {
    fn validate(&self, num_shots: usize) -> Result<(), ModelError> {
        for (name, value) in [("K", self.k), ("K competitor", self.k_competitor)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.dh.is_finite() || !self.dh_competitor.is_finite() {
            return Err(ModelError::invalid("enthalpies must be finite"));
        }
        if self.competitor.len() != num_shots {
            return Err(ModelError::invalid(format!(
                "expected {num_shots} competitor concentrations, got {}",
                self.competitor.len()
            )));
        }
        if self.competitor.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(ModelError::invalid(
                "competitor concentrations must be finite and non-negative",
            ));
        }
        Ok(())
    }

    fn occupancy(&self, s_total: f64, t_total: f64, c_total: f64) -> Occupancy {
        if s_total <= 0.0 {
            return Occupancy {
                titrant: 0.0,
                competitor: 0.0,
            };
        }

        let c_a = self.k * s_total;
        let c_b = self.k_competitor * s_total;
        let r_a = t_total / s_total;
        let r_b = c_total / s_total;

        let alpha = 1.0 / c_a + 1.0 / c_b + r_a + r_b - 1.0;
        let beta = (r_a - 1.0) / c_b + (r_b - 1.0) / c_a + 1.0 / (c_a * c_b);
        let gamma = -1.0 / (c_a * c_b);

        let spread = (alpha * alpha - 3.0 * beta).max(0.0);
        let cos_theta = (-2.0 * alpha.powi(3) + 9.0 * alpha * beta - 27.0 * gamma)
            / (2.0 * spread * spread.sqrt());
        // A repeated root puts the argument at ±1, where round-off can step outside.
        let theta = if cos_theta.is_nan() {
            0.0
        } else {
            cos_theta.clamp(-1.0, 1.0).acos()
        };

        let free = (2.0 * spread.sqrt() * (theta / 3.0).cos() - alpha) / 3.0;

        Occupancy {
            titrant: r_a * free / (1.0 / c_a + free),
            competitor: r_b * free / (1.0 / c_b + free),
        }
    }
}

impl HeatModel for SingleSiteCompetitor {
    fn dq(&self, experiment: &Experiment) -> Result<Vec<f64>, ModelError> {
        let series = experiment.series();
        self.validate(series.num_shots())?;

        let mut occupancy = buffer::with_capacity(series.num_shots())?;
        occupancy.extend(
            series
                .s_conc_corr()
                .iter()
                .zip(series.t_conc())
                .zip(&self.competitor)
                .map(|((&s, &t), &c)| self.occupancy(s, t, c)),
        );

        let cell_volume = experiment.cell_volume();
        let mut heats = buffer::with_capacity(experiment.num_injections())?;
        heats.extend(
            occupancy
                .windows(2)
                .zip(&series.s_conc_corr()[1..])
                .zip(experiment.dilution_heats())
                .map(|((pair, &s_total), &dilution)| {
                    let titrant = self.dh * (pair[1].titrant - pair[0].titrant);
                    let competitor =
                        self.dh_competitor * (pair[1].competitor - pair[0].competitor);
                    cell_volume * s_total * (titrant + competitor) + dilution
                }),
        );

        Ok(heats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Dilution, Loading, Setup, SingleSite};

    fn experiment() -> (Setup, Experiment) {
        let setup = Setup::default();
        let experiment = setup
            .experiment(1.0, &Dilution::default())
            .expect("valid setup");
        (setup, experiment)
    }

    fn competitor(setup: &Setup, cell: f64) -> Vec<f64> {
        setup
            .titration
            .concentrations(&Loading::molar(cell, 0.0))
            .expect("computes")
    }

    #[test]
    fn reduces_to_single_site_without_competitor() {
        let (setup, experiment) = experiment();
        let model = SingleSiteCompetitor {
            k: 1e5,
            k_competitor: 3e6,
            dh: -5000.0,
            dh_competitor: -2000.0,
            competitor: competitor(&setup, 0.0),
        };
        let site = SingleSite {
            k: 1e5,
            dh: -5000.0,
        };

        let competed = model.dq(&experiment).expect("computes");
        let plain = site.dq(&experiment).expect("computes");

        assert_eq!(competed.len(), plain.len());
        for (c, p) in competed.iter().zip(&plain) {
            assert_relative_eq!(*c, *p, epsilon = 1e-9, max_relative = 1e-6);
        }
    }

    #[test]
    fn occupancy_conserves_each_species() {
        let model = SingleSiteCompetitor {
            k: 1e6,
            k_competitor: 1e6,
            dh: -4000.0,
            dh_competitor: -4000.0,
            competitor: Vec::new(),
        };
        let (s, t, c) = (1e-4, 5e-5, 2e-4);
        let occupancy = model.occupancy(s, t, c);

        // Free ligand times K times free site recovers each complex.
        let bound_t = occupancy.titrant * s;
        let bound_c = occupancy.competitor * s;
        let free_s = s - bound_t - bound_c;
        assert!(free_s > 0.0);
        assert_relative_eq!(bound_t, 1e6 * free_s * (t - bound_t), max_relative = 1e-6);
        assert_relative_eq!(bound_c, 1e6 * free_s * (c - bound_c), max_relative = 1e-6);
    }

    #[test]
    fn competitor_weakens_early_heats() {
        let (setup, experiment) = experiment();
        let base = SingleSiteCompetitor {
            k: 1e6,
            k_competitor: 1e6,
            dh: -4000.0,
            dh_competitor: 0.0,
            competitor: competitor(&setup, 0.0),
        };
        let competed = SingleSiteCompetitor {
            competitor: competitor(&setup, 200e-6),
            ..base.clone()
        };

        let plain = base.dq(&experiment).expect("computes");
        let weakened = competed.dq(&experiment).expect("computes");
        assert!(weakened[0].abs() < plain[0].abs());
    }

    #[test]
    fn rejects_wrong_competitor_length() {
        let (_, experiment) = experiment();
        let model = SingleSiteCompetitor {
            k: 1e6,
            k_competitor: 1e6,
            dh: -4000.0,
            dh_competitor: -4000.0,
            competitor: vec![0.0; 3],
        };
        assert!(matches!(
            model.dq(&experiment),
            Err(ModelError::InvalidInput(_))
        ));
    }
}
