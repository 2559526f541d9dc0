use crate::{BindingPolynomial, Experiment, ModelError, Prediction, SolveConfig, predict};

use super::HeatModel;

/// The general multi-site model: solve for free titrant at each shot, then
/// reduce to injection heats.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingPolynomialModel {
    pub polynomial: BindingPolynomial,
    pub config: SolveConfig,
}

impl BindingPolynomialModel {
    /// Creates a model with the default solve configuration.
    #[must_use]
    pub fn new(polynomial: BindingPolynomial) -> Self {
        Self {
            polynomial,
            config: SolveConfig::default(),
        }
    }

    /// Predicts heats along with the free titrant and per-shot outcomes.
    ///
    /// # Errors
    ///
    /// See [`predict`].
    pub fn predict(&self, experiment: &Experiment) -> Result<Prediction, ModelError> {
        predict(&self.polynomial, experiment, &self.config)
    }
}

impl HeatModel for BindingPolynomialModel {
    fn dq(&self, experiment: &Experiment) -> Result<Vec<f64>, ModelError> {
        self.predict(experiment).map(|prediction| prediction.heats)
    }
}
