use crate::config::{ThermalConfig, BOLTZMANN};
use crate::error::ThermoError;
use crate::spectrum::Spectrum;
use crate::statistics::{log_partition, occupation_probabilities};

/// `(⟨E²⟩ − ⟨E⟩²)/(k_B·t²)`.
///
/// Moments are taken about the ground energy, which leaves the variance
/// unchanged and avoids cancelling two large squares.
pub fn specific_heat_at(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<f64, ThermoError> {
    let p = occupation_probabilities(spectrum, t, cfg)?;
    let e0 = spectrum.ground();
    let (mut m1, mut m2) = (0.0, 0.0);
    for (&pk, &e) in p.iter().zip(spectrum.energies()) {
        let de = e - e0;
        m1 += pk * de;
        m2 += pk * de * de;
    }
    let variance = (m2 - m1 * m1).max(0.0);
    Ok(variance / (t * t * BOLTZMANN))
}

/// `⟨E⟩/t − F` with `F = −k_B·ln Z`.
///
/// Evaluated as `(⟨E⟩ − E0)/t + k_B·ln Z'` where `Z'` is the partition sum
/// of the spectrum measured from `E0`; the `E0` contributions of the two
/// terms cancel exactly and both remaining terms are non-negative.
pub fn entropy_at(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<f64, ThermoError> {
    let p = occupation_probabilities(spectrum, t, cfg)?;
    let e0 = spectrum.ground();
    let excitation: f64 = p
        .iter()
        .zip(spectrum.energies())
        .map(|(&pk, &e)| pk * (e - e0))
        .sum();
    let ln_z = log_partition(&spectrum.relative_to_ground(), t, cfg)?;
    Ok(excitation / t + BOLTZMANN * ln_z)
}

/// Helmholtz free energy `−k_B·t·ln Z`.
pub fn free_energy_at(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<f64, ThermoError> {
    Ok(-BOLTZMANN * t * log_partition(spectrum, t, cfg)?)
}

/// Mean energy `⟨E⟩`.
pub fn internal_energy_at(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<f64, ThermoError> {
    let p = occupation_probabilities(spectrum, t, cfg)?;
    Ok(p.iter().zip(spectrum.energies()).map(|(pk, e)| pk * e).sum())
}

/// `Σ p_k·projection_k`, where `projection_k = ⟨v_k|O|v_k⟩` is the
/// diagonal of the observed operator in the eigenbasis of `spectrum`.
pub fn expectation_value_at(
    spectrum: &Spectrum,
    projection: &[f64],
    t: f64,
    cfg: &ThermalConfig,
) -> Result<f64, ThermoError> {
    if projection.len() != spectrum.len() {
        return Err(ThermoError::LengthMismatch {
            expected: spectrum.len(),
            found: projection.len(),
        });
    }
    let p = occupation_probabilities(spectrum, t, cfg)?;
    Ok(p.iter().zip(projection).map(|(pk, o)| pk * o).sum())
}
