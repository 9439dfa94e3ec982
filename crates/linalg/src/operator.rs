use crate::error::LinalgError;
use crate::matrix::{Matrix, C64};

/// Square operator stored as real entries whenever that is exact.
#[derive(Clone, Debug, PartialEq)]
pub enum Operator {
    Real(Matrix<f64>),
    Complex(Matrix<C64>),
}

impl Operator {
    pub fn zeros_real(dim: usize) -> Self {
        Operator::Real(Matrix::zeros(dim, dim))
    }

    pub fn zeros_complex(dim: usize) -> Self {
        Operator::Complex(Matrix::zeros(dim, dim))
    }

    pub fn dim(&self) -> usize {
        match self {
            Operator::Real(m) => m.rows,
            Operator::Complex(m) => m.rows,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Operator::Real(_))
    }

    pub fn get(&self, r: usize, c: usize) -> C64 {
        match self {
            Operator::Real(m) => C64::new(m.get(r, c), 0.0),
            Operator::Complex(m) => m.get(r, c),
        }
    }

    pub fn as_real(&self) -> Option<&Matrix<f64>> {
        match self {
            Operator::Real(m) => Some(m),
            Operator::Complex(_) => None,
        }
    }

    pub fn to_complex(&self) -> Matrix<C64> {
        match self {
            Operator::Real(m) => m.to_complex(),
            Operator::Complex(m) => m.clone(),
        }
    }

    /// `self += coefficient · other`, promoting `self` to complex storage
    /// if `other` is complex.
    pub fn add_scaled(&mut self, other: &Operator, coefficient: f64) -> Result<(), LinalgError> {
        if self.dim() != other.dim() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        match (&mut *self, other) {
            (Operator::Real(a), Operator::Real(b)) => a.add_scaled(b, coefficient),
            (Operator::Complex(a), Operator::Real(b)) => {
                a.add_scaled(&b.to_complex(), C64::new(coefficient, 0.0))
            }
            (Operator::Complex(a), Operator::Complex(b)) => {
                a.add_scaled(b, C64::new(coefficient, 0.0))
            }
            (Operator::Real(a), Operator::Complex(b)) => {
                let mut promoted = a.to_complex();
                promoted.add_scaled(b, C64::new(coefficient, 0.0))?;
                *self = Operator::Complex(promoted);
                Ok(())
            }
        }
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        match self {
            Operator::Real(m) => m.is_hermitian(tol),
            Operator::Complex(m) => m.is_hermitian(tol),
        }
    }

    pub fn max_abs_diff(&self, other: &Operator) -> f64 {
        self.to_complex().max_abs_diff(&other.to_complex())
    }
}

impl From<Matrix<f64>> for Operator {
    fn from(m: Matrix<f64>) -> Self {
        Operator::Real(m)
    }
}

impl From<Matrix<C64>> for Operator {
    fn from(m: Matrix<C64>) -> Self {
        Operator::Complex(m)
    }
}
