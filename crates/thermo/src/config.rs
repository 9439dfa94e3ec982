use crate::error::ThermoError;
use serde::{Deserialize, Serialize};

/// Boltzmann constant in eV/K.
pub const BOLTZMANN: f64 = 8.617333262e-5;

/// Largest `x` with `exp(x)` finite in `f64`.
const F64_EXP_LIMIT: f64 = 709.782712893384;

/// Numerical policy of the statistics engine, passed to every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    /// Decimal digits carried by the arbitrary-precision path.
    pub precision_digits: u32,
    /// Probabilities below this are set to exactly zero.
    pub truncation_floor: f64,
    /// Bound on `|E0·β| + ln(levels)` for the native `f64` path.
    pub overflow_threshold: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            precision_digits: 80,
            truncation_floor: 1e-8,
            overflow_threshold: 709.0,
        }
    }
}

impl ThermalConfig {
    pub fn validate(&self) -> Result<(), ThermoError> {
        if self.precision_digits == 0 {
            return Err(ThermoError::InvalidConfig {
                field: "precision_digits",
                reason: "must be > 0".into(),
            });
        }
        if !(self.truncation_floor >= 0.0 && self.truncation_floor < 1.0) {
            return Err(ThermoError::InvalidConfig {
                field: "truncation_floor",
                reason: format!("must be in [0, 1), got {}", self.truncation_floor),
            });
        }
        if !(self.overflow_threshold > 0.0 && self.overflow_threshold <= F64_EXP_LIMIT) {
            return Err(ThermoError::InvalidConfig {
                field: "overflow_threshold",
                reason: format!(
                    "must be in (0, {}], got {}",
                    F64_EXP_LIMIT, self.overflow_threshold
                ),
            });
        }
        Ok(())
    }

    /// Binary precision equivalent to `precision_digits`.
    pub fn precision_bits(&self) -> usize {
        (f64::from(self.precision_digits) * std::f64::consts::LOG2_10).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ThermalConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.precision_bits(), 266);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let cfg = ThermalConfig {
            overflow_threshold: 800.0,
            ..ThermalConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ThermoError::InvalidConfig {
                field: "overflow_threshold",
                ..
            })
        ));

        let cfg = ThermalConfig {
            truncation_floor: f64::NAN,
            ..ThermalConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
