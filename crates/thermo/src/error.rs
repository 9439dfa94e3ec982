use linalg::LinalgError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermoError {
    #[error("temperature must be positive and finite, got {temperature}")]
    NonPositiveTemperature { temperature: f64 },

    #[error("Boltzmann weights are not representable at temperature {temperature}")]
    NumericOverflow { temperature: f64 },

    #[error("energy spectrum is empty")]
    EmptySpectrum,

    #[error("energy {value} at level {index} is not finite")]
    NonFiniteEnergy { index: usize, value: f64 },

    #[error("energy spectrum is not ascending at level {index}")]
    UnsortedSpectrum { index: usize },

    #[error("expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("invalid thermal config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
