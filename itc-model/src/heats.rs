//! Injection heats predicted by a binding polynomial.
//!
//! Once the free titrant at every shot is known, the population-weighted
//! average enthalpy `⟨ΔH⟩ⱼ` follows directly. The heat of injection `j` is
//!
//! ```text
//! q[j] = V · S[j+1] · (⟨ΔH⟩ⱼ₊₁ − ⟨ΔH⟩ⱼ) + q_dil[j]
//! ```
//!
//! using the stationary total of the later shot.

use crate::{
    BindingPolynomial, Experiment, ModelError, ShotOutcome, SolveConfig, TitrationSeries, buffer,
    free_titrant,
};

/// Free titrant concentrations and predicted heats for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Free titrant concentration at each shot.
    pub t_free: Vec<f64>,
    /// Predicted heat of each injection (`num_shots - 1` values).
    pub heats: Vec<f64>,
    /// How each shot's free titrant was obtained.
    pub outcomes: Vec<ShotOutcome>,
}

/// Predicts injection heats from raw parameter and concentration sequences
/// using the default [`SolveConfig`].
///
/// # Errors
///
/// Returns [`ModelError::InvalidInput`] for shape or value violations,
/// [`ModelError::Allocation`] if working storage cannot be reserved, and
/// [`ModelError::Solver`] if a shot's mass balance cannot be evaluated.
pub fn predict_heats(
    beta: &[f64],
    dh: &[f64],
    s_conc_corr: &[f64],
    t_conc: &[f64],
    cell_volume: f64,
    dilution_heats: &[f64],
) -> Result<Prediction, ModelError> {
    predict_heats_with(
        beta,
        dh,
        s_conc_corr,
        t_conc,
        cell_volume,
        dilution_heats,
        &SolveConfig::default(),
    )
}

/// Same as [`predict_heats`], with an explicit solve configuration.
///
/// # Errors
///
/// See [`predict_heats`]; an invalid config is reported as
/// [`ModelError::InvalidInput`].
pub fn predict_heats_with(
    beta: &[f64],
    dh: &[f64],
    s_conc_corr: &[f64],
    t_conc: &[f64],
    cell_volume: f64,
    dilution_heats: &[f64],
    config: &SolveConfig,
) -> Result<Prediction, ModelError> {
    let polynomial = BindingPolynomial::new(buffer::copy(beta)?, buffer::copy(dh)?)?;
    let series = TitrationSeries::new(buffer::copy(s_conc_corr)?, buffer::copy(t_conc)?)?;
    let experiment = Experiment::new(series, cell_volume, buffer::copy(dilution_heats)?)?;

    predict(&polynomial, &experiment, config)
}

/// Runs the free titrant solve and the heat reduction for an experiment.
///
/// # Errors
///
/// Returns an error if the config is invalid, storage cannot be reserved,
/// or a shot's mass balance cannot be evaluated.
pub fn predict(
    polynomial: &BindingPolynomial,
    experiment: &Experiment,
    config: &SolveConfig,
) -> Result<Prediction, ModelError> {
    let free = free_titrant(polynomial, experiment.series(), config)?;
    let heats = reduce(polynomial, experiment, &free.values)?;

    Ok(Prediction {
        t_free: free.values,
        heats,
        outcomes: free.outcomes,
    })
}

/// Converts free titrant concentrations into per-injection heats.
///
/// # Errors
///
/// Returns [`ModelError::InvalidInput`] if `t_free` does not have one value
/// per shot, or [`ModelError::Allocation`] if storage cannot be reserved.
pub fn reduce(
    polynomial: &BindingPolynomial,
    experiment: &Experiment,
    t_free: &[f64],
) -> Result<Vec<f64>, ModelError> {
    let series = experiment.series();
    if t_free.len() != series.num_shots() {
        return Err(ModelError::invalid(format!(
            "expected {} free concentrations, got {}",
            series.num_shots(),
            t_free.len()
        )));
    }

    let mut avg_dh = buffer::with_capacity(t_free.len())?;
    avg_dh.extend(t_free.iter().map(|&t| polynomial.average_enthalpy(t)));

    let mut heats = buffer::with_capacity(experiment.num_injections())?;
    let cell_volume = experiment.cell_volume();
    heats.extend(
        avg_dh
            .windows(2)
            .zip(&series.s_conc_corr()[1..])
            .zip(experiment.dilution_heats())
            .map(|((pair, &s_total), &dilution)| {
                cell_volume * s_total * (pair[1] - pair[0]) + dilution
            }),
    );

    Ok(heats)
}
