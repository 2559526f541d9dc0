use crate::{Experiment, ModelError, buffer};

use super::HeatModel;

/// Titration into buffer: every injection releases only its dilution heat.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Blank;

impl HeatModel for Blank {
    fn dq(&self, experiment: &Experiment) -> Result<Vec<f64>, ModelError> {
        buffer::copy(experiment.dilution_heats()).map_err(ModelError::from)
    }
}
