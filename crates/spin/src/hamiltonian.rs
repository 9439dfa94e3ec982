use crate::compile::{compile_operator, OperatorString};
use crate::error::SpinError;
use crate::site::{hilbert_dim, Spin};
use linalg::Operator;
use tracing::debug;

/// `coefficient · operator`.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub operator: OperatorString,
}

impl Term {
    pub fn new(coefficient: f64, operator: OperatorString) -> Self {
        Self {
            coefficient,
            operator,
        }
    }

    pub fn parse(coefficient: f64, operator: &str) -> Result<Self, SpinError> {
        Ok(Self::new(coefficient, OperatorString::parse(operator)?))
    }
}

/// Sums `coefficient · compile_operator(term)` over `terms`, in order.
///
/// The accumulator is complex only if some term has an odd number of `Y`
/// factors. An empty term list yields the zero matrix of dimension
/// `∏(2S_i+1)`.
pub fn build_hamiltonian(terms: &[Term], spins: &[Spin]) -> Result<Operator, SpinError> {
    let dim = hilbert_dim(spins)?;
    let complex = terms.iter().any(|t| !t.operator.is_real());

    let mut h = if complex {
        Operator::zeros_complex(dim)
    } else {
        Operator::zeros_real(dim)
    };

    for term in terms {
        let compiled = compile_operator(&term.operator, spins)?;
        if compiled.dim() != dim {
            return Err(SpinError::DimensionMismatch {
                expected: dim,
                found: compiled.dim(),
            });
        }
        h.add_scaled(&compiled, term.coefficient)?;
    }

    debug!(dim, terms = terms.len(), complex, "assembled hamiltonian");
    Ok(h)
}

/// Term list bound to a fixed spin assignment.
#[derive(Clone, Debug)]
pub struct Hamiltonian {
    spins: Vec<Spin>,
    terms: Vec<Term>,
}

impl Hamiltonian {
    pub fn new(spins: Vec<Spin>) -> Self {
        Self {
            spins,
            terms: Vec::new(),
        }
    }

    /// Adds one term, rejecting strings whose length differs from the
    /// number of sites.
    pub fn push(&mut self, term: Term) -> Result<&mut Self, SpinError> {
        if term.operator.len() != self.spins.len() {
            return Err(SpinError::LengthMismatch {
                operator_len: term.operator.len(),
                spins_len: self.spins.len(),
            });
        }
        self.terms.push(term);
        Ok(self)
    }

    pub fn extend<I>(&mut self, terms: I) -> Result<&mut Self, SpinError>
    where
        I: IntoIterator<Item = Term>,
    {
        for term in terms {
            self.push(term)?;
        }
        Ok(self)
    }

    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn dim(&self) -> Result<usize, SpinError> {
        hilbert_dim(&self.spins)
    }

    pub fn build(&self) -> Result<Operator, SpinError> {
        build_hamiltonian(&self.terms, &self.spins)
    }
}
