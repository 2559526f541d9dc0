use crate::ModelError;

/// Total concentrations in the cell at each shot of a titration.
///
/// Shot 0 is the state before the first injection. Titrant totals are
/// cumulative, and the stationary totals are already scaled by the
/// competent fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TitrationSeries {
    s_conc_corr: Vec<f64>,
    t_conc: Vec<f64>,
}

impl TitrationSeries {
    /// Creates a validated titration series.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if the sequences differ in length,
    /// have fewer than two shots, or contain negative or non-finite values.
    pub fn new(s_conc_corr: Vec<f64>, t_conc: Vec<f64>) -> Result<Self, ModelError> {
        if s_conc_corr.len() != t_conc.len() {
            return Err(ModelError::invalid(format!(
                "stationary series has {} shots but titrant series has {}",
                s_conc_corr.len(),
                t_conc.len()
            )));
        }
        if t_conc.len() < 2 {
            return Err(ModelError::invalid(format!(
                "a titration needs at least two shots, got {}",
                t_conc.len()
            )));
        }
        check_concentrations("stationary", &s_conc_corr)?;
        check_concentrations("titrant", &t_conc)?;

        Ok(Self { s_conc_corr, t_conc })
    }

    /// Number of shots, including the initial pre-injection state.
    #[must_use]
    pub fn num_shots(&self) -> usize {
        self.t_conc.len()
    }

    /// Competent-fraction corrected stationary totals.
    #[must_use]
    pub fn s_conc_corr(&self) -> &[f64] {
        &self.s_conc_corr
    }

    /// Cumulative titrant totals.
    #[must_use]
    pub fn t_conc(&self) -> &[f64] {
        &self.t_conc
    }

    /// Titrant total at the final shot, the upper bound for every free
    /// titrant solve.
    #[must_use]
    pub fn final_titrant(&self) -> f64 {
        self.t_conc[self.t_conc.len() - 1]
    }
}

fn check_concentrations(species: &str, values: &[f64]) -> Result<(), ModelError> {
    match values.iter().position(|c| !c.is_finite() || *c < 0.0) {
        Some(shot) => Err(ModelError::invalid(format!(
            "{species} concentration at shot {shot} must be finite and non-negative, got {}",
            values[shot]
        ))),
        None => Ok(()),
    }
}
