use thiserror::Error;

/// Errors that can occur during Brent solving.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The residuals at both endpoints share a sign.
    ///
    /// Classic implementations signal this case by returning `0.0`; callers
    /// are expected to detect it and pick a fallback themselves.
    #[error("no sign change in bracket: f({left})={left_residual}, f({right})={right_residual}")]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },

    #[error("bracket contains non-finite value: {value}")]
    NonFiniteBracket { value: f64 },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}
