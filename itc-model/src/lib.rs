//! Heat predictions for isothermal titration calorimetry.
//!
//! A titration injects a titrant species from a syringe into a cell holding a
//! stationary species. At each shot the free titrant concentration is found by
//! inverting the titrant mass balance of a [`BindingPolynomial`], and the
//! change in population-weighted enthalpy between consecutive shots gives the
//! heat of each injection.
//!
//! The quickest way in is [`predict_heats`], which takes raw parameter and
//! concentration sequences. [`Setup`] builds the concentration series from a
//! titration protocol, and the [`HeatModel`] implementations in [`models`]
//! share a common [`Experiment`] description.

mod buffer;
mod config;
mod dilution;
mod error;
mod experiment;
mod free_titrant;
mod heats;
mod polynomial;
mod series;
mod titration;

pub mod models;

pub use config::SolveConfig;
pub use dilution::Dilution;
pub use error::ModelError;
pub use experiment::Experiment;
pub use free_titrant::{Endpoint, FreeTitrant, ShotOutcome, free_titrant};
pub use heats::{Prediction, predict, predict_heats, predict_heats_with, reduce};
pub use models::{BindingPolynomialModel, Blank, HeatModel, SingleSite, SingleSiteCompetitor};
pub use polynomial::{BindingPolynomial, MassBalance};
pub use series::TitrationSeries;
pub use titration::{Loading, Setup, Titration};
