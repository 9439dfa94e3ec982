//! Boltzmann statistics over an energy spectrum.
//!
//! Every entry point picks its arithmetic before evaluating a single
//! exponential. With `x0 = −E0·β` for the lowest level `E0`, native `f64`
//! is used when `|x0| + ln(levels)` stays within
//! [`ThermalConfig::overflow_threshold`]; otherwise the weights, the
//! partition sum and everything derived from them are carried in binary
//! floating point with [`ThermalConfig::precision_bits`] bits and only the
//! final ratios are rounded back to `f64`. Because the spectrum is
//! ascending, `x0` bounds every other exponent from above.

use crate::config::{ThermalConfig, BOLTZMANN};
use crate::error::ThermoError;
use crate::spectrum::Spectrum;
use dashu_float::round::mode::HalfEven;
use dashu_float::FBig;
use tracing::trace;

type BigFloat = FBig<HalfEven>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionTier {
    Native,
    Arbitrary,
}

/// `1/(k_B·t)`.
pub fn beta(t: f64) -> Result<f64, ThermoError> {
    if !(t > 0.0 && t.is_finite()) {
        return Err(ThermoError::NonPositiveTemperature { temperature: t });
    }
    Ok(1.0 / (t * BOLTZMANN))
}

pub fn precision_tier(
    spectrum: &Spectrum,
    t: f64,
    cfg: &ThermalConfig,
) -> Result<PrecisionTier, ThermoError> {
    let x0 = -spectrum.ground() * beta(t)?;
    let headroom = (spectrum.len() as f64).ln();
    if x0.is_finite() && x0.abs() + headroom <= cfg.overflow_threshold {
        Ok(PrecisionTier::Native)
    } else {
        Ok(PrecisionTier::Arbitrary)
    }
}

/// Unnormalized weights and their sum, in whichever arithmetic the tier
/// selected.
enum Partition {
    Native { weights: Vec<f64>, z: f64 },
    Arbitrary { weights: Vec<BigFloat>, z: BigFloat },
}

fn to_big(x: f64, bits: usize, t: f64) -> Result<BigFloat, ThermoError> {
    BigFloat::try_from(x)
        .map(|v| v.with_precision(bits).value())
        .map_err(|_| ThermoError::NumericOverflow { temperature: t })
}

fn partition(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<Partition, ThermoError> {
    cfg.validate()?;
    let b = beta(t)?;
    let tier = precision_tier(spectrum, t, cfg)?;
    trace!(t, ?tier, levels = spectrum.len(), "partition sum");

    match tier {
        PrecisionTier::Native => {
            let weights: Vec<f64> = spectrum.energies().iter().map(|&e| (-e * b).exp()).collect();
            let z: f64 = weights.iter().sum();
            if !(z.is_finite() && z > 0.0) {
                return Err(ThermoError::NumericOverflow { temperature: t });
            }
            Ok(Partition::Native { weights, z })
        }
        PrecisionTier::Arbitrary => {
            let bits = cfg.precision_bits();
            let mut weights = Vec::with_capacity(spectrum.len());
            for &e in spectrum.energies() {
                weights.push(to_big(-e * b, bits, t)?.exp());
            }
            let mut z = weights[0].clone();
            for w in &weights[1..] {
                z = &z + w;
            }
            Ok(Partition::Arbitrary { weights, z })
        }
    }
}

fn finite(x: f64, t: f64) -> Result<f64, ThermoError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ThermoError::NumericOverflow { temperature: t })
    }
}

impl Partition {
    fn probabilities(&self, floor: f64, t: f64) -> Result<Vec<f64>, ThermoError> {
        let raw: Vec<f64> = match self {
            Partition::Native { weights, z } => weights.iter().map(|w| w / z).collect(),
            Partition::Arbitrary { weights, z } => {
                weights.iter().map(|w| (w / z).to_f64().value()).collect()
            }
        };
        raw.into_iter()
            .map(|p| finite(p, t).map(|p| if p < floor { 0.0 } else { p }))
            .collect()
    }

    fn log_z(&self, t: f64) -> Result<f64, ThermoError> {
        let ln_z = match self {
            Partition::Native { z, .. } => z.ln(),
            Partition::Arbitrary { z, .. } => z.ln().to_f64().value(),
        };
        finite(ln_z, t)
    }
}

/// Boltzmann occupation of every level at temperature `t`.
///
/// `cfg` is validated first; an out-of-range field is reported as
/// [`ThermoError::InvalidConfig`].
///
/// Entries below [`ThermalConfig::truncation_floor`] are exactly `0.0`, so
/// the result sums to one only up to the truncated mass.
pub fn occupation_probabilities(
    spectrum: &Spectrum,
    t: f64,
    cfg: &ThermalConfig,
) -> Result<Vec<f64>, ThermoError> {
    partition(spectrum, t, cfg)?.probabilities(cfg.truncation_floor, t)
}

/// `ln Z` at temperature `t`.
pub fn log_partition(spectrum: &Spectrum, t: f64, cfg: &ThermalConfig) -> Result<f64, ThermoError> {
    partition(spectrum, t, cfg)?.log_z(t)
}

/// Probabilities and `ln Z` from a single partition sum.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalState {
    pub temperature: f64,
    pub tier: PrecisionTier,
    pub probabilities: Vec<f64>,
    pub log_partition: f64,
}

pub fn thermal_state(
    spectrum: &Spectrum,
    t: f64,
    cfg: &ThermalConfig,
) -> Result<ThermalState, ThermoError> {
    let tier = precision_tier(spectrum, t, cfg)?;
    let z = partition(spectrum, t, cfg)?;
    Ok(ThermalState {
        temperature: t,
        tier,
        probabilities: z.probabilities(cfg.truncation_floor, t)?,
        log_partition: z.log_z(t)?,
    })
}
