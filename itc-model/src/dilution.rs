use crate::{ModelError, TitrationSeries, buffer};

/// Linear heat of diluting titrant into the cell.
///
/// Injection `j` contributes `T_conc[j+1] · heat + intercept`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dilution {
    /// Heat per unit of titrant concentration.
    pub heat: f64,
    /// Constant heat per injection.
    pub intercept: f64,
}

impl Dilution {
    /// Dilution heat of every injection in a series.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if either coefficient is not
    /// finite, or [`ModelError::Allocation`] if storage cannot be reserved.
    pub fn heats(&self, series: &TitrationSeries) -> Result<Vec<f64>, ModelError> {
        if !self.heat.is_finite() || !self.intercept.is_finite() {
            return Err(ModelError::invalid(format!(
                "dilution coefficients must be finite, got heat {} and intercept {}",
                self.heat, self.intercept
            )));
        }

        let injected = &series.t_conc()[1..];
        let mut heats = buffer::with_capacity(injected.len())?;
        heats.extend(injected.iter().map(|t| t * self.heat + self.intercept));
        Ok(heats)
    }
}
