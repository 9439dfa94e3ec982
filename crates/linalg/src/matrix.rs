use crate::error::LinalgError;
use num_complex::Complex64;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

pub type C64 = Complex64;

/// Element type of a [`Matrix`]: either `f64` or [`C64`].
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_real(x: f64) -> Self;
    fn to_complex(self) -> C64;
    fn conjugate(self) -> Self;
    fn magnitude(self) -> f64;
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_real(x: f64) -> Self {
        x
    }
    fn to_complex(self) -> C64 {
        C64::new(self, 0.0)
    }
    fn conjugate(self) -> Self {
        self
    }
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Scalar for C64 {
    fn zero() -> Self {
        C64::new(0.0, 0.0)
    }
    fn one() -> Self {
        C64::new(1.0, 0.0)
    }
    fn from_real(x: f64) -> Self {
        C64::new(x, 0.0)
    }
    fn to_complex(self) -> C64 {
        self
    }
    fn conjugate(self) -> Self {
        self.conj()
    }
    fn magnitude(self) -> f64 {
        self.norm()
    }
}

/// Dense row-major matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, T::one());
        }
        m
    }

    /// Builds a matrix from equally long rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(LinalgError::DimensionMismatch {
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    #[inline]
    fn idx(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[self.idx(r, c)]
    }

    pub fn set(&mut self, r: usize, c: usize, v: T) {
        let i = self.idx(r, c);
        self.data[i] = v;
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// Row `(i, k)` of the result is `i * other.rows + k`, so the left factor
    /// indexes the slow-moving block.
    pub fn kron(&self, other: &Matrix<T>) -> Matrix<T> {
        let mut out = Matrix::zeros(self.rows * other.rows, self.cols * other.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.get(i, j);
                if a == T::zero() {
                    continue;
                }
                for k in 0..other.rows {
                    for l in 0..other.cols {
                        out.set(i * other.rows + k, j * other.cols + l, a * other.get(k, l));
                    }
                }
            }
        }
        out
    }

    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        if self.cols != other.rows {
            return Err(LinalgError::DimensionMismatch {
                expected: self.cols,
                found: other.rows,
            });
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == T::zero() {
                    continue;
                }
                for j in 0..other.cols {
                    let cur = out.get(i, j);
                    out.set(i, j, cur + a * other.get(k, j));
                }
            }
        }
        Ok(out)
    }

    /// `self·other − other·self`.
    pub fn commutator(&self, other: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        let ab = self.matmul(other)?;
        let ba = other.matmul(self)?;
        let data = ab.data.iter().zip(&ba.data).map(|(&x, &y)| x - y).collect();
        Ok(Matrix {
            data,
            rows: ab.rows,
            cols: ab.cols,
        })
    }

    pub fn trace(&self) -> T {
        let mut acc = T::zero();
        for i in 0..self.rows.min(self.cols) {
            acc += self.get(i, i);
        }
        acc
    }

    pub fn scaled(&self, s: T) -> Matrix<T> {
        Matrix {
            data: self.data.iter().map(|&x| x * s).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// `self += s · other`.
    pub fn add_scaled(&mut self, other: &Matrix<T>, s: T) -> Result<(), LinalgError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(LinalgError::DimensionMismatch {
                expected: self.rows,
                found: other.rows,
            });
        }
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x += s * y;
        }
        Ok(())
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Matrix<T> {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c).conjugate());
            }
        }
        out
    }

    pub fn column(&self, c: usize) -> Vec<T> {
        (0..self.rows).map(|r| self.get(r, c)).collect()
    }

    /// Square sub-block of side `size` starting at `(r0, c0)`.
    pub fn block(&self, r0: usize, c0: usize, size: usize) -> Matrix<T> {
        let mut out = Matrix::zeros(size, size);
        for r in 0..size {
            for c in 0..size {
                out.set(r, c, self.get(r0 + r, c0 + c));
            }
        }
        out
    }

    pub fn max_abs_diff(&self, other: &Matrix<T>) -> f64 {
        if self.rows != other.rows || self.cols != other.cols {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| (x - y).magnitude())
            .fold(0.0, f64::max)
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.is_square() && self.max_abs_diff(&self.adjoint()) <= tol
    }

    pub fn to_complex(&self) -> Matrix<C64> {
        Matrix {
            data: self.data.iter().map(|&x| x.to_complex()).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Matrix<C64> {
    /// Drops the imaginary part of every entry.
    pub fn real_part(&self) -> Matrix<f64> {
        Matrix {
            data: self.data.iter().map(|x| x.re).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn max_imag(&self) -> f64 {
        self.data.iter().map(|x| x.im.abs()).fold(0.0, f64::max)
    }
}
