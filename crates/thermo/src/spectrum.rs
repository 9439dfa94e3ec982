use crate::error::ThermoError;
use linalg::{eigvalsh, Operator};

/// Non-empty, finite, ascending energy levels. Ties are allowed.
///
/// The statistics engine reads the first level as the reference energy
/// for its precision decision, so the ordering is enforced here.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    energies: Vec<f64>,
}

impl Spectrum {
    /// Sorts `energies` ascending.
    pub fn new(mut energies: Vec<f64>) -> Result<Self, ThermoError> {
        check_finite(&energies)?;
        energies.sort_by(f64::total_cmp);
        Ok(Self { energies })
    }

    /// Accepts already ascending `energies`.
    pub fn from_sorted(energies: Vec<f64>) -> Result<Self, ThermoError> {
        check_finite(&energies)?;
        if let Some(index) = energies.windows(2).position(|w| w[1] < w[0]) {
            return Err(ThermoError::UnsortedSpectrum { index: index + 1 });
        }
        Ok(Self { energies })
    }

    /// Eigenvalues of a Hermitian operator.
    pub fn from_operator(op: &Operator) -> Result<Self, ThermoError> {
        Self::new(eigvalsh(op)?)
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn ground(&self) -> f64 {
        self.energies[0]
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The same levels measured from the ground energy.
    pub fn relative_to_ground(&self) -> Spectrum {
        let e0 = self.ground();
        Spectrum {
            energies: self.energies.iter().map(|&e| e - e0).collect(),
        }
    }
}

fn check_finite(energies: &[f64]) -> Result<(), ThermoError> {
    if energies.is_empty() {
        return Err(ThermoError::EmptySpectrum);
    }
    if let Some((index, &value)) = energies.iter().enumerate().find(|(_, e)| !e.is_finite()) {
        return Err(ThermoError::NonFiniteEnergy { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_keeps_ties() {
        let s = Spectrum::new(vec![1.0, -1.0, 0.0, -1.0]).unwrap();
        assert_eq!(s.energies(), &[-1.0, -1.0, 0.0, 1.0]);
        assert_eq!(s.ground(), -1.0);
    }

    #[test]
    fn from_sorted_rejects_descending_input() {
        assert_eq!(
            Spectrum::from_sorted(vec![0.0, 2.0, 1.0]).unwrap_err(),
            ThermoError::UnsortedSpectrum { index: 2 }
        );
    }

    #[test]
    fn empty_and_nan_are_rejected() {
        assert_eq!(Spectrum::new(vec![]).unwrap_err(), ThermoError::EmptySpectrum);
        assert!(matches!(
            Spectrum::new(vec![0.0, f64::NAN]),
            Err(ThermoError::NonFiniteEnergy { index: 1, .. })
        ));
    }

    #[test]
    fn shifted_spectrum_starts_at_zero() {
        let s = Spectrum::new(vec![-2.0, -1.5, 3.0]).unwrap().relative_to_ground();
        assert_eq!(s.energies(), &[0.0, 0.5, 5.0]);
    }
}
