use crate::error::SpinError;
use crate::site::{build_site_operators, hilbert_dim, SiteOp, SiteOperators, Spin};
use linalg::{Matrix, Operator, C64};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One [`SiteOp`] per lattice site, in site order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperatorString(Vec<SiteOp>);

impl OperatorString {
    pub fn new(ops: Vec<SiteOp>) -> Self {
        OperatorString(ops)
    }

    /// `n` identities.
    pub fn identity(n: usize) -> Self {
        OperatorString(vec![SiteOp::Identity; n])
    }

    /// Identity everywhere except the listed `(site, op)` placements.
    pub fn with_ops(n: usize, placed: &[(usize, SiteOp)]) -> Result<Self, SpinError> {
        let mut ops = vec![SiteOp::Identity; n];
        for &(site, op) in placed {
            if site >= n {
                return Err(SpinError::SiteOutOfRange { site, sites: n });
            }
            ops[site] = op;
        }
        Ok(OperatorString(ops))
    }

    pub fn parse(text: &str) -> Result<Self, SpinError> {
        text.chars()
            .enumerate()
            .map(|(position, tag)| {
                SiteOp::from_tag(tag).ok_or(SpinError::UnknownOperatorTag { tag, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(OperatorString)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ops(&self) -> &[SiteOp] {
        &self.0
    }

    pub fn y_count(&self) -> usize {
        self.0.iter().filter(|&&op| op == SiteOp::Y).count()
    }

    /// True when the compiled operator is exactly real.
    pub fn is_real(&self) -> bool {
        self.y_count() % 2 == 0
    }

    /// Concatenation `self` followed by `other`.
    pub fn concat(&self, other: &OperatorString) -> OperatorString {
        let mut ops = self.0.clone();
        ops.extend_from_slice(&other.0);
        OperatorString(ops)
    }
}

impl FromStr for OperatorString {
    type Err = SpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorString::parse(s)
    }
}

impl fmt::Display for OperatorString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.0 {
            write!(f, "{}", op.tag())?;
        }
        Ok(())
    }
}

/// Compiles an operator string into its many-body matrix by folding the
/// Kronecker product over the sites left to right.
///
/// Site operators are built once per distinct spin for the duration of
/// this call. Strings with an even number of `Y` factors are returned as
/// [`Operator::Real`].
pub fn compile_operator(op: &OperatorString, spins: &[Spin]) -> Result<Operator, SpinError> {
    let mismatch = SpinError::LengthMismatch {
        operator_len: op.len(),
        spins_len: spins.len(),
    };
    if op.len() != spins.len() {
        return Err(mismatch);
    }
    let Some((&first, rest)) = op.ops().split_first() else {
        return Err(mismatch);
    };
    hilbert_dim(spins)?;

    let mut cache: HashMap<Spin, SiteOperators> = HashMap::new();
    for &s in spins {
        cache.entry(s).or_insert_with(|| build_site_operators(s));
    }

    // site k pairs with spins[k]; the head was consumed above
    let mut result: Matrix<C64> = cache[&spins[0]].get(first).clone();
    for (&site_op, s) in rest.iter().zip(&spins[1..]) {
        result = result.kron(cache[s].get(site_op));
    }

    if op.is_real() {
        Ok(Operator::Real(result.real_part()))
    } else {
        Ok(Operator::Complex(result))
    }
}

/// Parses `text` and compiles it against `spins`.
pub fn compile_operator_str(text: &str, spins: &[Spin]) -> Result<Operator, SpinError> {
    compile_operator(&OperatorString::parse(text)?, spins)
}
