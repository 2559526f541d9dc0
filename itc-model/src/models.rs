//! Heat models that share an experiment description.
//!
//! A [`HeatModel`] turns an [`Experiment`] into the heat of each injection.
//! The general model is [`BindingPolynomialModel`]; [`SingleSite`] is its
//! closed-form one-site special case, [`SingleSiteCompetitor`] adds a
//! competing ligand in the cell, and [`Blank`] describes a titration into
//! buffer.

mod binding_polynomial;
mod blank;
mod single_site;
mod single_site_competitor;

pub use binding_polynomial::BindingPolynomialModel;
pub use blank::Blank;
pub use single_site::SingleSite;
pub use single_site_competitor::SingleSiteCompetitor;

use crate::{Experiment, ModelError};

/// A model that predicts the heat of every injection of an experiment.
///
/// Models must be deterministic, always producing the same heats for a given
/// experiment.
pub trait HeatModel {
    /// Predicted heat of each injection (`num_shots - 1` values).
    ///
    /// # Errors
    ///
    /// Each model decides what constitutes a failure, reported as a
    /// [`ModelError`].
    fn dq(&self, experiment: &Experiment) -> Result<Vec<f64>, ModelError>;
}
