//! Cell concentrations across a titration.
//!
//! Each injection of volume `v` into a cell of volume `V` displaces the same
//! volume of cell contents, so after `i` shots the fraction of the original
//! cell contents that remains is `Πₖ (1 − vₖ/V)`. A species then sits at
//!
//! ```text
//! c[i] = syringe · (1 − Π) + cell · Π
//! ```
//!
//! (Freire et al. (2009) Meth. Enzymol. 455:127–155, p. 134.)

use uom::si::{
    f64::{MolarConcentration, Volume},
    molar_concentration::mole_per_liter,
    volume::microliter,
};

use crate::{Dilution, Experiment, ModelError, TitrationSeries, buffer};

/// Default cell volume in microliters.
const DEFAULT_CELL_VOLUME_UL: f64 = 300.0;

/// Default shot volume in microliters.
const DEFAULT_SHOT_VOLUME_UL: f64 = 2.5;

/// Default number of injections.
const DEFAULT_NUM_INJECTIONS: usize = 30;

/// Cell volume and the volume of each injection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTitration"))]
pub struct Titration {
    cell_volume: Volume,
    shot_volumes: Vec<Volume>,
}

impl Titration {
    /// Creates a titration protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if there are no injections, the
    /// cell volume is not finite and positive, or any shot volume is not
    /// strictly between zero and the cell volume.
    pub fn new(cell_volume: Volume, shot_volumes: Vec<Volume>) -> Result<Self, ModelError> {
        let cell_ul = cell_volume.get::<microliter>();
        if !cell_ul.is_finite() || cell_ul <= 0.0 {
            return Err(ModelError::invalid(format!(
                "cell volume must be finite and positive, got {cell_ul} uL"
            )));
        }
        if shot_volumes.is_empty() {
            return Err(ModelError::invalid("a titration needs at least one injection"));
        }
        for (shot, volume) in shot_volumes.iter().enumerate() {
            let shot_ul = volume.get::<microliter>();
            if !(shot_ul > 0.0 && shot_ul < cell_ul) {
                return Err(ModelError::invalid(format!(
                    "injection {shot} volume must be positive and smaller than the cell, got {shot_ul} uL"
                )));
            }
        }

        Ok(Self {
            cell_volume,
            shot_volumes,
        })
    }

    #[must_use]
    pub fn cell_volume(&self) -> Volume {
        self.cell_volume
    }

    #[must_use]
    pub fn shot_volumes(&self) -> &[Volume] {
        &self.shot_volumes
    }

    /// Number of shots in the resulting series, including the initial state.
    #[must_use]
    pub fn num_shots(&self) -> usize {
        self.shot_volumes.len() + 1
    }

    /// Concentration of a species at each shot, in mol/L.
    ///
    /// The first value is the initial cell concentration.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be reserved.
    pub fn concentrations(&self, loading: &Loading) -> Result<Vec<f64>, ModelError> {
        let cell = loading.cell.get::<mole_per_liter>();
        let syringe = loading.syringe.get::<mole_per_liter>();
        let cell_ul = self.cell_volume.get::<microliter>();

        let mut out = buffer::with_capacity(self.num_shots())?;
        out.push(cell);

        let mut remaining = 1.0;
        for volume in &self.shot_volumes {
            remaining *= 1.0 - volume.get::<microliter>() / cell_ul;
            out.push(syringe * (1.0 - remaining) + cell * remaining);
        }

        Ok(out)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTitration {
    cell_volume: Volume,
    shot_volumes: Vec<Volume>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTitration> for Titration {
    type Error = ModelError;

    fn try_from(raw: RawTitration) -> Result<Self, Self::Error> {
        Self::new(raw.cell_volume, raw.shot_volumes)
    }
}

impl Default for Titration {
    /// Thirty 2.5 µL injections into a 300 µL cell.
    fn default() -> Self {
        Self {
            cell_volume: Volume::new::<microliter>(DEFAULT_CELL_VOLUME_UL),
            shot_volumes: vec![
                Volume::new::<microliter>(DEFAULT_SHOT_VOLUME_UL);
                DEFAULT_NUM_INJECTIONS
            ],
        }
    }
}

/// Initial concentrations of a species in the cell and in the syringe.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loading {
    pub cell: MolarConcentration,
    pub syringe: MolarConcentration,
}

impl Loading {
    /// Creates a loading from concentrations in mol/L.
    #[must_use]
    pub fn molar(cell: f64, syringe: f64) -> Self {
        Self {
            cell: MolarConcentration::new::<mole_per_liter>(cell),
            syringe: MolarConcentration::new::<mole_per_liter>(syringe),
        }
    }

    fn validate(&self, species: &str) -> Result<(), ModelError> {
        for (place, value) in [("cell", self.cell), ("syringe", self.syringe)] {
            let molar = value.get::<mole_per_liter>();
            if !molar.is_finite() || molar < 0.0 {
                return Err(ModelError::invalid(format!(
                    "{species} {place} concentration must be finite and non-negative, got {molar} M"
                )));
            }
        }
        Ok(())
    }
}

/// A complete titration setup: protocol plus how each species is loaded.
///
/// When deserialized, missing fields take their [`Default`] values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Setup {
    pub titration: Titration,
    /// The species held in the cell (macromolecule).
    pub stationary: Loading,
    /// The species injected from the syringe (ligand).
    pub titrant: Loading,
}

impl Default for Setup {
    /// 100 µM stationary species in the cell titrated with 1 mM titrant.
    fn default() -> Self {
        Self {
            titration: Titration::default(),
            stationary: Loading::molar(100e-6, 0.0),
            titrant: Loading::molar(0.0, 1000e-6),
        }
    }
}

impl Setup {
    /// Cell volume in microliters, the volume unit heats are computed in.
    #[must_use]
    pub fn cell_volume(&self) -> f64 {
        self.titration.cell_volume().get::<microliter>()
    }

    /// Total concentrations at each shot, with the stationary species scaled
    /// by the fraction of it that is competent to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if `fx_competent` is not finite
    /// and positive or a loading is invalid.
    pub fn series(&self, fx_competent: f64) -> Result<TitrationSeries, ModelError> {
        if !fx_competent.is_finite() || fx_competent <= 0.0 {
            return Err(ModelError::invalid(format!(
                "competent fraction must be finite and positive, got {fx_competent}"
            )));
        }
        self.stationary.validate("stationary")?;
        self.titrant.validate("titrant")?;

        let mut s_conc_corr = self.titration.concentrations(&self.stationary)?;
        for s in &mut s_conc_corr {
            *s *= fx_competent;
        }
        let t_conc = self.titration.concentrations(&self.titrant)?;

        TitrationSeries::new(s_conc_corr, t_conc)
    }

    /// Molar ratio of titrant to stationary species after each injection.
    ///
    /// Shots with no stationary species give a non-finite ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if a loading is invalid or storage cannot be reserved.
    pub fn mole_ratio(&self) -> Result<Vec<f64>, ModelError> {
        self.stationary.validate("stationary")?;
        self.titrant.validate("titrant")?;

        let s_conc = self.titration.concentrations(&self.stationary)?;
        let t_conc = self.titration.concentrations(&self.titrant)?;

        let mut ratio = buffer::with_capacity(self.titration.shot_volumes().len())?;
        ratio.extend(t_conc[1..].iter().zip(&s_conc[1..]).map(|(t, s)| t / s));
        Ok(ratio)
    }

    /// Builds an experiment ready for a heat model.
    ///
    /// # Errors
    ///
    /// Returns an error if the competent fraction or a loading is invalid,
    /// or storage cannot be reserved.
    pub fn experiment(&self, fx_competent: f64, dilution: &Dilution) -> Result<Experiment, ModelError> {
        let series = self.series(fx_competent)?;
        let dilution_heats = dilution.heats(&series)?;
        Experiment::new(series, self.cell_volume(), dilution_heats)
    }
}
