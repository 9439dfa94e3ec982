use linalg::LinalgError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpinError {
    #[error("invalid spin {spin}: 2S+1 must be a positive integer")]
    InvalidSpin { spin: f64 },

    #[error("unknown operator tag {tag:?} at site {position}")]
    UnknownOperatorTag { tag: char, position: usize },

    #[error("operator string has {operator_len} sites but {spins_len} spins were given")]
    LengthMismatch { operator_len: usize, spins_len: usize },

    #[error("term dimension {found} does not match Hamiltonian dimension {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Hilbert space of {sites} sites exceeds the addressable dimension")]
    DimensionOverflow { sites: usize },

    #[error("site {site} is out of range for a system of {sites} sites")]
    SiteOutOfRange { site: usize, sites: usize },

    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
