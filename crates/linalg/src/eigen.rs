use crate::error::LinalgError;
use crate::matrix::{Matrix, C64};
use crate::operator::Operator;
use faer::{Mat, Side};

/// Eigenpairs of a Hermitian operator, ascending by eigenvalue.
/// Eigenvectors are the columns of `vectors`.
#[derive(Clone, Debug)]
pub struct Eigh {
    pub values: Vec<f64>,
    pub vectors: Matrix<C64>,
}

impl Eigh {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn vector(&self, k: usize) -> Vec<C64> {
        self.vectors.column(k)
    }

    /// Diagonal of `operator` in this eigenbasis, `Re ⟨v_k|O|v_k⟩`.
    pub fn diagonal_projection(&self, operator: &Operator) -> Result<Vec<f64>, LinalgError> {
        let n = self.vectors.rows;
        if operator.dim() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                found: operator.dim(),
            });
        }
        let o = operator.to_complex();
        let mut out = Vec::with_capacity(self.values.len());
        for k in 0..self.values.len() {
            out.push(rayleigh(&o, &self.vectors, k).re);
        }
        Ok(out)
    }
}

fn check_square(op: &Operator) -> Result<usize, LinalgError> {
    let (rows, cols) = match op {
        Operator::Real(m) => (m.rows, m.cols),
        Operator::Complex(m) => (m.rows, m.cols),
    };
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(rows)
}

fn to_faer_real(m: &Matrix<f64>) -> Mat<f64> {
    let mut a = Mat::<f64>::zeros(m.rows, m.cols);
    for r in 0..m.rows {
        for c in 0..m.cols {
            a.write(r, c, m.get(r, c));
        }
    }
    a
}

fn to_faer_complex(m: &Matrix<C64>) -> Mat<C64> {
    let mut a = Mat::<C64>::zeros(m.rows, m.cols);
    for r in 0..m.rows {
        for c in 0..m.cols {
            a.write(r, c, m.get(r, c));
        }
    }
    a
}

/// `⟨v_k|A|v_k⟩` for column `k` of `vectors`.
fn rayleigh(a: &Matrix<C64>, vectors: &Matrix<C64>, k: usize) -> C64 {
    let n = a.rows;
    let mut acc = C64::new(0.0, 0.0);
    for r in 0..n {
        let vr = vectors.get(r, k).conj();
        if vr == C64::new(0.0, 0.0) {
            continue;
        }
        let mut row = C64::new(0.0, 0.0);
        for c in 0..n {
            row += a.get(r, c) * vectors.get(c, k);
        }
        acc += vr * row;
    }
    acc
}

/// Eigenvalues of a Hermitian operator, ascending.
pub fn eigvalsh(op: &Operator) -> Result<Vec<f64>, LinalgError> {
    let n = check_square(op)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut values = match op {
        Operator::Real(m) => to_faer_real(m).selfadjoint_eigenvalues(Side::Lower),
        Operator::Complex(m) => to_faer_complex(m).selfadjoint_eigenvalues(Side::Lower),
    };
    values.sort_by(f64::total_cmp);
    Ok(values)
}

/// Full eigen-decomposition of a Hermitian operator.
///
/// Eigenvalues are taken as the Rayleigh quotients of the returned
/// eigenvectors, which pairs each value with its column exactly; the
/// columns are then ordered by ascending eigenvalue.
pub fn eigh(op: &Operator) -> Result<Eigh, LinalgError> {
    let n = check_square(op)?;
    if n == 0 {
        return Ok(Eigh {
            values: Vec::new(),
            vectors: Matrix::zeros(0, 0),
        });
    }

    let mut raw = Matrix::<C64>::zeros(n, n);
    match op {
        Operator::Real(m) => {
            let evd = to_faer_real(m).selfadjoint_eigendecomposition(Side::Lower);
            let u = evd.u();
            for r in 0..n {
                for c in 0..n {
                    raw.set(r, c, C64::new(u.read(r, c), 0.0));
                }
            }
        }
        Operator::Complex(m) => {
            let evd = to_faer_complex(m).selfadjoint_eigendecomposition(Side::Lower);
            let u = evd.u();
            for r in 0..n {
                for c in 0..n {
                    raw.set(r, c, u.read(r, c));
                }
            }
        }
    }

    let a = op.to_complex();
    let rq: Vec<f64> = (0..n).map(|k| rayleigh(&a, &raw, k).re).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| rq[i].total_cmp(&rq[j]));

    let mut vectors = Matrix::<C64>::zeros(n, n);
    let mut values = Vec::with_capacity(n);
    for (dst, &src) in order.iter().enumerate() {
        values.push(rq[src]);
        for r in 0..n {
            vectors.set(r, dst, raw.get(r, src));
        }
    }

    Ok(Eigh { values, vectors })
}
