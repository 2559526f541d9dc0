use crate::{ModelError, TitrationSeries};

/// Everything a heat model needs to predict the heat of each injection.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    series: TitrationSeries,
    cell_volume: f64,
    dilution_heats: Vec<f64>,
}

impl Experiment {
    /// Bundles a titration series with the cell volume and per-injection
    /// dilution heats.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if the cell volume is not finite
    /// and positive, or if there is not exactly one finite dilution heat per
    /// injection (`num_shots - 1`).
    pub fn new(
        series: TitrationSeries,
        cell_volume: f64,
        dilution_heats: Vec<f64>,
    ) -> Result<Self, ModelError> {
        if !cell_volume.is_finite() || cell_volume <= 0.0 {
            return Err(ModelError::invalid(format!(
                "cell volume must be finite and positive, got {cell_volume}"
            )));
        }

        let injections = series.num_shots() - 1;
        if dilution_heats.len() != injections {
            return Err(ModelError::invalid(format!(
                "expected {injections} dilution heats, got {}",
                dilution_heats.len()
            )));
        }
        if dilution_heats.iter().any(|q| !q.is_finite()) {
            return Err(ModelError::invalid("dilution heats must be finite"));
        }

        Ok(Self {
            series,
            cell_volume,
            dilution_heats,
        })
    }

    /// Number of injections, one fewer than the number of shots.
    #[must_use]
    pub fn num_injections(&self) -> usize {
        self.dilution_heats.len()
    }

    #[must_use]
    pub fn series(&self) -> &TitrationSeries {
        &self.series
    }

    #[must_use]
    pub fn cell_volume(&self) -> f64 {
        self.cell_volume
    }

    #[must_use]
    pub fn dilution_heats(&self) -> &[f64] {
        &self.dilution_heats
    }
}
