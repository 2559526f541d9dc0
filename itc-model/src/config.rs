use itc_solve::brent;

/// Configuration for the per-shot free titrant solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveConfig {
    /// Total titrant concentrations closer to zero than this are treated as
    /// "no titrant yet", giving a free concentration of exactly zero.
    pub zero_titrant_tol: f64,
    /// Root finder settings.
    pub brent: brent::Config,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            zero_titrant_tol: 1e-12,
            brent: brent::Config::default(),
        }
    }
}

impl SolveConfig {
    /// Validates the zero tolerance and the nested root finder config.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.zero_titrant_tol.is_finite() || self.zero_titrant_tol < 0.0 {
            return Err("zero_titrant_tol must be finite and non-negative");
        }
        self.brent.validate()
    }
}
