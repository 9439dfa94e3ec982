use crate::error::SpinError;
use linalg::{Matrix, C64};
use std::fmt;

const SPIN_TOL: f64 = 1e-9;

/// Spin quantum number `S`, a non-negative half-integer stored as `2S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Spin {
    twice: u32,
}

impl Spin {
    pub const ZERO: Spin = Spin { twice: 0 };
    pub const HALF: Spin = Spin { twice: 1 };
    pub const ONE: Spin = Spin { twice: 2 };

    pub fn new(spin: f64) -> Result<Self, SpinError> {
        let size = 2.0 * spin + 1.0;
        let rounded = size.round();
        if !size.is_finite() || rounded < 1.0 || (size - rounded).abs() > SPIN_TOL {
            return Err(SpinError::InvalidSpin { spin });
        }
        if rounded > f64::from(u32::MAX) {
            return Err(SpinError::InvalidSpin { spin });
        }
        Ok(Spin {
            twice: rounded as u32 - 1,
        })
    }

    pub fn from_twice(twice: u32) -> Self {
        Spin { twice }
    }

    pub fn twice(self) -> u32 {
        self.twice
    }

    pub fn value(self) -> f64 {
        f64::from(self.twice) / 2.0
    }

    /// Local Hilbert-space dimension `2S+1`.
    pub fn dim(self) -> usize {
        self.twice as usize + 1
    }
}

impl TryFrom<f64> for Spin {
    type Error = SpinError;

    fn try_from(spin: f64) -> Result<Self, Self::Error> {
        Spin::new(spin)
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.twice % 2 == 0 {
            write!(f, "{}", self.twice / 2)
        } else {
            write!(f, "{}/2", self.twice)
        }
    }
}

pub fn spins_from_f64(values: &[f64]) -> Result<Vec<Spin>, SpinError> {
    values.iter().map(|&s| Spin::new(s)).collect()
}

/// Total Hilbert-space dimension `∏(2S_i+1)`.
pub fn hilbert_dim(spins: &[Spin]) -> Result<usize, SpinError> {
    spins
        .iter()
        .try_fold(1usize, |acc, s| acc.checked_mul(s.dim()))
        .ok_or(SpinError::DimensionOverflow { sites: spins.len() })
}

/// One of the four single-site operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteOp {
    Identity,
    X,
    Y,
    Z,
}

impl SiteOp {
    pub const ALL: [SiteOp; 4] = [SiteOp::Identity, SiteOp::X, SiteOp::Y, SiteOp::Z];

    pub fn tag(self) -> char {
        match self {
            SiteOp::Identity => 'I',
            SiteOp::X => 'X',
            SiteOp::Y => 'Y',
            SiteOp::Z => 'Z',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'I' => Some(SiteOp::Identity),
            'X' => Some(SiteOp::X),
            'Y' => Some(SiteOp::Y),
            'Z' => Some(SiteOp::Z),
            _ => None,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        match self {
            SiteOp::Identity => 0,
            SiteOp::X => 1,
            SiteOp::Y => 2,
            SiteOp::Z => 3,
        }
    }
}

/// The identity and the three spin components for one spin value.
#[derive(Clone, Debug)]
pub struct SiteOperators {
    spin: Spin,
    table: [Matrix<C64>; 4],
}

impl SiteOperators {
    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn dim(&self) -> usize {
        self.spin.dim()
    }

    pub fn get(&self, op: SiteOp) -> &Matrix<C64> {
        &self.table[op.slot()]
    }

    pub fn identity(&self) -> &Matrix<C64> {
        self.get(SiteOp::Identity)
    }

    pub fn x(&self) -> &Matrix<C64> {
        self.get(SiteOp::X)
    }

    pub fn y(&self) -> &Matrix<C64> {
        self.get(SiteOp::Y)
    }

    pub fn z(&self) -> &Matrix<C64> {
        self.get(SiteOp::Z)
    }
}

/// `sqrt((S+1)(a+b+1) − (a+1)(b+1))`, shared by the X and Y components.
fn ladder_coefficient(s: f64, a: usize, b: usize) -> f64 {
    let (a, b) = (a as f64, b as f64);
    ((s + 1.0) * (a + b + 1.0) - (a + 1.0) * (b + 1.0)).sqrt()
}

fn x_matrix(spin: Spin) -> Matrix<C64> {
    let (d, s) = (spin.dim(), spin.value());
    let mut m = Matrix::zeros(d, d);
    for a in 0..d.saturating_sub(1) {
        let v = C64::new(0.5 * ladder_coefficient(s, a, a + 1), 0.0);
        m.set(a, a + 1, v);
        m.set(a + 1, a, v);
    }
    m
}

fn y_matrix(spin: Spin) -> Matrix<C64> {
    let (d, s) = (spin.dim(), spin.value());
    let mut m = Matrix::zeros(d, d);
    for a in 0..d.saturating_sub(1) {
        let c = 0.5 * ladder_coefficient(s, a, a + 1);
        m.set(a, a + 1, C64::new(0.0, -c));
        m.set(a + 1, a, C64::new(0.0, c));
    }
    m
}

fn z_matrix(spin: Spin) -> Matrix<C64> {
    let (d, s) = (spin.dim(), spin.value());
    let mut m = Matrix::zeros(d, d);
    for a in 0..d {
        m.set(a, a, C64::new(s - a as f64, 0.0));
    }
    m
}

pub fn build_site_operators(spin: Spin) -> SiteOperators {
    SiteOperators {
        spin,
        table: [
            Matrix::identity(spin.dim()),
            x_matrix(spin),
            y_matrix(spin),
            z_matrix(spin),
        ],
    }
}

/// [`build_site_operators`] for a raw spin value.
pub fn site_operators_for(spin: f64) -> Result<SiteOperators, SpinError> {
    Ok(build_site_operators(Spin::new(spin)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_half_matches_pauli_over_two() {
        let ops = build_site_operators(Spin::HALF);
        let h = C64::new(0.5, 0.0);
        let z = C64::new(0.0, 0.0);

        assert_eq!(ops.x().data, vec![z, h, h, z]);
        assert_eq!(
            ops.y().data,
            vec![z, C64::new(0.0, -0.5), C64::new(0.0, 0.5), z]
        );
        assert_eq!(ops.z().data, vec![h, z, z, -h]);
    }

    #[test]
    fn spin_zero_is_one_dimensional() {
        let ops = build_site_operators(Spin::ZERO);
        assert_eq!(ops.dim(), 1);
        assert_eq!(ops.x().get(0, 0), C64::new(0.0, 0.0));
        assert_eq!(ops.z().get(0, 0), C64::new(0.0, 0.0));
    }

    #[test]
    fn invalid_spins_are_rejected() {
        for bad in [0.3, -0.5, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Spin::new(bad).is_err(), "accepted {}", bad);
        }
        assert_eq!(Spin::new(1.5).unwrap().dim(), 4);
        assert_eq!(Spin::new(0.5000000001).unwrap(), Spin::HALF);
    }

    #[test]
    fn spins_beyond_u32_are_rejected() {
        assert!(matches!(Spin::new(3e9), Err(SpinError::InvalidSpin { .. })));
        let largest = (f64::from(u32::MAX) - 1.0) / 2.0;
        assert_eq!(Spin::new(largest).unwrap().twice(), u32::MAX - 1);
    }

    #[test]
    fn hilbert_dim_reports_overflow() {
        assert_eq!(hilbert_dim(&[Spin::HALF, Spin::ONE]).unwrap(), 6);
        assert_eq!(hilbert_dim(&[]).unwrap(), 1);
        assert_eq!(
            hilbert_dim(&[Spin::HALF; 64]).unwrap_err(),
            SpinError::DimensionOverflow { sites: 64 }
        );
    }

    #[test]
    fn display_uses_fractions() {
        assert_eq!(Spin::HALF.to_string(), "1/2");
        assert_eq!(Spin::ONE.to_string(), "1");
        assert_eq!(Spin::from_twice(3).to_string(), "3/2");
    }
}
