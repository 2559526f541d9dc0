//! Multi-site binding polynomials.
//!
//! For `n` sites with overall association constants `β₁ … βₙ`, the binding
//! polynomial in free titrant concentration `[T]` is
//!
//! ```text
//! P([T]) = 1 + Σᵢ βᵢ [T]^i
//! ```
//!
//! Site order matters: the site at index `i` contributes the term of degree
//! `i + 1`.

use itc_solve::Equation;

use crate::{ModelError, buffer};

/// Starting guess for each association constant.
const BETA_GUESS: f64 = 1e6;

/// Starting guess for each site enthalpy.
const DH_GUESS: f64 = -4000.0;

/// Association constants and enthalpies for each site of a binding polynomial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPolynomial"))]
pub struct BindingPolynomial {
    beta: Vec<f64>,
    dh: Vec<f64>,
}

impl BindingPolynomial {
    /// Creates a binding polynomial from per-site constants and enthalpies.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if the sequences differ in length,
    /// are empty, or contain non-finite values.
    pub fn new(beta: Vec<f64>, dh: Vec<f64>) -> Result<Self, ModelError> {
        if beta.len() != dh.len() {
            return Err(ModelError::invalid(format!(
                "beta has {} sites but dH has {}",
                beta.len(),
                dh.len()
            )));
        }
        if beta.is_empty() {
            return Err(ModelError::invalid(
                "binding polynomial needs at least one site",
            ));
        }
        if let Some(site) = beta.iter().position(|b| !b.is_finite()) {
            return Err(ModelError::invalid(format!("beta{} is not finite", site + 1)));
        }
        if let Some(site) = dh.iter().position(|h| !h.is_finite()) {
            return Err(ModelError::invalid(format!("dH{} is not finite", site + 1)));
        }

        Ok(Self { beta, dh })
    }

    /// Creates an `n`-site polynomial populated with the customary starting
    /// guesses for a fit (`β = 1e6`, `ΔH = -4000` for every site).
    ///
    /// # Errors
    ///
    /// Returns an error if `num_sites` is zero or storage cannot be reserved.
    pub fn with_guesses(num_sites: usize) -> Result<Self, ModelError> {
        let mut beta = buffer::with_capacity(num_sites)?;
        let mut dh = buffer::with_capacity(num_sites)?;
        beta.resize(num_sites, BETA_GUESS);
        dh.resize(num_sites, DH_GUESS);
        Self::new(beta, dh)
    }

    /// Number of binding sites.
    #[must_use]
    pub fn num_sites(&self) -> usize {
        self.beta.len()
    }

    /// Association constants, ordered by site.
    #[must_use]
    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    /// Site enthalpies, ordered by site.
    #[must_use]
    pub fn dh(&self) -> &[f64] {
        &self.dh
    }

    /// Iterates over the terms `βᵢ · [T]^(i+1)` in site order.
    fn terms(&self, t_free: f64) -> impl Iterator<Item = f64> + '_ {
        self.beta.iter().scan(1.0, move |power, &beta| {
            *power *= t_free;
            Some(beta * *power)
        })
    }

    /// Average number of titrant molecules bound per stationary molecule.
    ///
    /// This is `d ln P / d ln [T]`:
    ///
    /// ```text
    /// Σᵢ i·βᵢ[T]^i / (1 + Σᵢ βᵢ[T]^i)
    /// ```
    #[must_use]
    pub fn saturation(&self, t_free: f64) -> f64 {
        let (numerator, denominator) = self
            .terms(t_free)
            .zip(1u32..)
            .fold((0.0, 1.0), |(num, den), (term, degree)| {
                (num + f64::from(degree) * term, den + term)
            });
        numerator / denominator
    }

    /// Population-weighted average enthalpy at a free titrant concentration.
    ///
    /// ```text
    /// Σᵢ ΔHᵢ·βᵢ[T]^i / (1 + Σᵢ βᵢ[T]^i)
    /// ```
    #[must_use]
    pub fn average_enthalpy(&self, t_free: f64) -> f64 {
        let (numerator, denominator) = self
            .terms(t_free)
            .zip(&self.dh)
            .fold((0.0, 1.0), |(num, den), (term, dh)| {
                (num + dh * term, den + term)
            });
        numerator / denominator
    }

    /// Mass balance for one shot, whose root is the free titrant concentration.
    #[must_use]
    pub fn mass_balance(&self, s_total: f64, t_total: f64) -> MassBalance<'_> {
        MassBalance {
            polynomial: self,
            s_total,
            t_total,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPolynomial {
    beta: Vec<f64>,
    dh: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPolynomial> for BindingPolynomial {
    type Error = ModelError;

    fn try_from(raw: RawPolynomial) -> Result<Self, Self::Error> {
        Self::new(raw.beta, raw.dh)
    }
}

/// Titrant conservation at a single shot.
///
/// ```text
/// residual([T]) = [T] + S_total · saturation([T]) − T_total
/// ```
///
/// Total titrant is the free titrant plus the titrant bound to the stationary
/// species, so the residual vanishes at the true free concentration.
#[derive(Debug, Clone, Copy)]
pub struct MassBalance<'a> {
    polynomial: &'a BindingPolynomial,
    s_total: f64,
    t_total: f64,
}

impl Equation for MassBalance<'_> {
    fn residual(&self, t_free: f64) -> f64 {
        t_free + self.s_total * self.polynomial.saturation(t_free) - self.t_total
    }
}
