//! Operator-string builders for common couplings.
//!
//! Every builder works on a system of `n` sites and places identities on
//! the sites a coupling does not touch.

use crate::compile::OperatorString;
use crate::error::SpinError;
use crate::hamiltonian::Term;
use crate::site::SiteOp;

/// Per axis `X`, `Y`, `Z`: one string per site with that component on the
/// site. Summing a row gives the total magnetization along the axis.
pub fn magnetic_vector(n: usize) -> [Vec<OperatorString>; 3] {
    let axis = |op: SiteOp| -> Vec<OperatorString> {
        (0..n)
            .map(|site| {
                let mut ops = vec![SiteOp::Identity; n];
                ops[site] = op;
                OperatorString::new(ops)
            })
            .collect()
    };
    [axis(SiteOp::X), axis(SiteOp::Y), axis(SiteOp::Z)]
}

/// `Si·Sj` as the three strings `XX`, `YY`, `ZZ` on sites `i` and `j`.
pub fn sij_vector(index: (usize, usize), n: usize) -> Result<[OperatorString; 3], SpinError> {
    let (i, j) = index;
    Ok([
        OperatorString::with_ops(n, &[(i, SiteOp::X), (j, SiteOp::X)])?,
        OperatorString::with_ops(n, &[(i, SiteOp::Y), (j, SiteOp::Y)])?,
        OperatorString::with_ops(n, &[(i, SiteOp::Z), (j, SiteOp::Z)])?,
    ])
}

pub fn set_sij_vector(
    indexes: &[(usize, usize)],
    n: usize,
) -> Result<Vec<[OperatorString; 3]>, SpinError> {
    indexes.iter().map(|&index| sij_vector(index, n)).collect()
}

/// Dzyaloshinskii–Moriya components of `Si × Sj`: `(YZ, ZY)`, `(XZ, ZX)`
/// and `(XY, YX)` on sites `(i, j)`.
///
/// The second string of each pair enters the cross product with a minus
/// sign; that sign is left to the caller.
pub fn antisymmetric_exchange_vector(
    index: (usize, usize),
    n: usize,
) -> Result<[[OperatorString; 2]; 3], SpinError> {
    let (i, j) = index;
    let pair = |a: SiteOp, b: SiteOp| -> Result<[OperatorString; 2], SpinError> {
        Ok([
            OperatorString::with_ops(n, &[(i, a), (j, b)])?,
            OperatorString::with_ops(n, &[(i, b), (j, a)])?,
        ])
    };
    Ok([
        pair(SiteOp::Y, SiteOp::Z)?,
        pair(SiteOp::X, SiteOp::Z)?,
        pair(SiteOp::X, SiteOp::Y)?,
    ])
}

pub fn set_antisymmetric_exchange_vector(
    indexes: &[(usize, usize)],
    n: usize,
) -> Result<Vec<[[OperatorString; 2]; 3]>, SpinError> {
    indexes
        .iter()
        .map(|&index| antisymmetric_exchange_vector(index, n))
        .collect()
}

/// `Σ J_ij (Si·Sj)` as a flat term list, three terms per bond.
pub fn heisenberg_terms(
    indexes: &[(usize, usize)],
    exchanges: &[f64],
    n: usize,
) -> Result<Vec<Term>, SpinError> {
    if indexes.len() != exchanges.len() {
        return Err(SpinError::LengthMismatch {
            operator_len: indexes.len(),
            spins_len: exchanges.len(),
        });
    }
    let mut terms = Vec::with_capacity(3 * indexes.len());
    for (&index, &j) in indexes.iter().zip(exchanges) {
        for op in sij_vector(index, n)? {
            terms.push(Term::new(j, op));
        }
    }
    Ok(terms)
}

/// `D·(Si × Sj)` as six signed terms built from
/// [`antisymmetric_exchange_vector`].
pub fn dm_terms(index: (usize, usize), d: [f64; 3], n: usize) -> Result<Vec<Term>, SpinError> {
    let [[yz, zy], [xz, zx], [xy, yx]] = antisymmetric_exchange_vector(index, n)?;
    Ok(vec![
        Term::new(d[0], yz),
        Term::new(-d[0], zy),
        Term::new(d[1], zx),
        Term::new(-d[1], xz),
        Term::new(d[2], xy),
        Term::new(-d[2], yx),
    ])
}

/// Places `copies + 1` non-interacting replicas of a system side by side.
///
/// Replica `k` sees every base term padded with `k` blocks of
/// identities on the left and `copies - k` on the right.
pub fn replicate_system(terms: &[Term], copies: usize) -> Vec<Term> {
    let Some(first) = terms.first() else {
        return Vec::new();
    };
    let size = first.operator.len();
    let mut out = Vec::with_capacity(terms.len() * (copies + 1));
    for k in 0..=copies {
        let left = OperatorString::identity(size * k);
        let right = OperatorString::identity(size * (copies - k));
        for term in terms {
            out.push(Term::new(
                term.coefficient,
                left.concat(&term.operator).concat(&right),
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[OperatorString]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn magnetic_vector_moves_component_along_chain() {
        let [x, y, z] = magnetic_vector(3);
        assert_eq!(strings(&x), ["XII", "IXI", "IIX"]);
        assert_eq!(strings(&y), ["YII", "IYI", "IIY"]);
        assert_eq!(strings(&z), ["ZII", "IZI", "IIZ"]);
    }

    #[test]
    fn sij_places_pairs() {
        let v = sij_vector((0, 2), 3).unwrap();
        assert_eq!(strings(&v), ["XIX", "YIY", "ZIZ"]);
        assert!(sij_vector((0, 3), 3).is_err());
    }

    #[test]
    fn dm_components_swap_operators() {
        let [i, j, k] = antisymmetric_exchange_vector((0, 1), 3).unwrap();
        assert_eq!(strings(&i), ["YZI", "ZYI"]);
        assert_eq!(strings(&j), ["XZI", "ZXI"]);
        assert_eq!(strings(&k), ["XYI", "YXI"]);
    }

    #[test]
    fn dm_terms_pair_opposite_signs() {
        let terms = dm_terms((0, 1), [0.0, 0.0, 2.0], 2).unwrap();
        let z: Vec<(f64, String)> = terms
            .iter()
            .filter(|t| t.coefficient != 0.0)
            .map(|t| (t.coefficient, t.operator.to_string()))
            .collect();
        assert_eq!(z, [(2.0, "XY".to_string()), (-2.0, "YX".to_string())]);
    }

    #[test]
    fn replicas_are_padded_with_identities() {
        let terms = vec![Term::parse(1.5, "XZ").unwrap()];
        let out = replicate_system(&terms, 2);
        let ops: Vec<String> = out.iter().map(|t| t.operator.to_string()).collect();
        assert_eq!(ops, ["XZIIII", "IIXZII", "IIIIXZ"]);
        assert!(out.iter().all(|t| t.coefficient == 1.5));
    }
}
