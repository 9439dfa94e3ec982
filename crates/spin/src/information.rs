//! Density matrices and the information measures built on them.

use crate::error::SpinError;
use crate::site::{hilbert_dim, Spin};
use linalg::{eigh, eigvalsh, Matrix, Operator, Scalar, C64};
use tracing::debug;

/// Energy tolerance used to group the degenerate ground manifold.
pub const GROUND_STATE_TOL: f64 = 1e-7;

/// `−Σ λ ln λ` over the strictly positive eigenvalues.
pub fn von_neumann_entropy(eigenvalues: &[f64]) -> f64 {
    eigenvalues
        .iter()
        .filter(|&&l| l > 0.0)
        .map(|&l| -l * l.ln())
        .sum()
}

/// `sqrt(2(1 − Tr ρ²))` of a (reduced) density matrix.
pub fn concurrence(rho: &Matrix<C64>) -> Result<f64, SpinError> {
    let purity = rho.matmul(rho)?.trace().re;
    Ok((2.0 * (1.0 - purity)).max(0.0).sqrt())
}

/// Traces out the first `traced` sites of `rho`, left to right.
pub fn partial_trace_lr<T: Scalar>(
    rho: &Matrix<T>,
    spins: &[Spin],
    traced: usize,
) -> Result<Matrix<T>, SpinError> {
    let expected = hilbert_dim(spins)?;
    if rho.rows != expected || !rho.is_square() {
        return Err(SpinError::DimensionMismatch {
            expected,
            found: rho.rows,
        });
    }
    if traced > spins.len() {
        return Err(SpinError::SiteOutOfRange {
            site: traced,
            sites: spins.len(),
        });
    }

    let mut rho = rho.clone();
    for spin in &spins[..traced] {
        let d = spin.dim();
        let rest = rho.rows / d;
        let mut reduced = Matrix::zeros(rest, rest);
        for k in 0..d {
            reduced.add_scaled(&rho.block(k * rest, k * rest, rest), T::one())?;
        }
        rho = reduced;
    }
    Ok(rho)
}

/// `|⟨a|b⟩|²`, which is 1 for identical normalized states and 0 for
/// orthogonal ones.
pub fn fidelity_states(a: &[C64], b: &[C64]) -> Result<f64, SpinError> {
    if a.len() != b.len() {
        return Err(SpinError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    let ab: C64 = a.iter().zip(b).map(|(x, y)| x.conj() * y).sum();
    let ba: C64 = b.iter().zip(a).map(|(x, y)| x.conj() * y).sum();
    Ok((ab * ba).re)
}

/// Number of levels within `tol` of the lowest one in an ascending
/// spectrum.
pub fn count_degenerate_ground_states(energies: &[f64], tol: f64) -> usize {
    let Some(&e0) = energies.first() else {
        return 0;
    };
    energies
        .iter()
        .take_while(|&&e| (e - e0).abs() <= tol)
        .count()
}

/// `Σ p_k |v_k⟩⟨v_k|`.
pub fn density_matrix(states: &[Vec<C64>], probabilities: &[f64]) -> Result<Matrix<C64>, SpinError> {
    if states.len() != probabilities.len() {
        return Err(SpinError::DimensionMismatch {
            expected: states.len(),
            found: probabilities.len(),
        });
    }
    let n = states.first().map_or(0, |s| s.len());
    let mut rho = Matrix::<C64>::zeros(n, n);
    for (state, &p) in states.iter().zip(probabilities) {
        if state.len() != n {
            return Err(SpinError::DimensionMismatch {
                expected: n,
                found: state.len(),
            });
        }
        for r in 0..n {
            for c in 0..n {
                let cur = rho.get(r, c);
                rho.set(r, c, cur + state[r] * state[c].conj() * p);
            }
        }
    }
    Ok(rho)
}

/// Von Neumann entropy of the ground-state density matrix after tracing
/// out `0, 1, …, n−1` sites from the left.
///
/// A degenerate ground manifold enters as an equal-weight mixture.
pub fn entanglement_entropy_per_site_gs(
    op: &Operator,
    spins: &[Spin],
) -> Result<Vec<f64>, SpinError> {
    let evd = eigh(op)?;
    let count = count_degenerate_ground_states(&evd.values, GROUND_STATE_TOL);
    debug!(degeneracy = count, dim = op.dim(), "ground manifold");

    let states: Vec<Vec<C64>> = (0..count).map(|k| evd.vector(k)).collect();
    let weights = vec![1.0 / count as f64; count];
    let rho = density_matrix(&states, &weights)?;

    let mut out = Vec::with_capacity(spins.len());
    for traced in 0..spins.len() {
        let reduced = partial_trace_lr(&rho, spins, traced)?;
        let spectrum = eigvalsh(&Operator::Complex(reduced))?;
        out.push(von_neumann_entropy(&spectrum));
    }
    Ok(out)
}
