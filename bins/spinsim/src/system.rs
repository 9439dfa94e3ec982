//! TOML description of a spin system.
//!
//! ```toml
//! spins = [0.5, 0.5]
//! temperatures = [1.0, 10.0, 100.0]
//! field = 0.0001
//!
//! [[bonds]]
//! sites = [0, 1]
//! exchange = 0.001
//!
//! [[terms]]
//! coefficient = -0.0002
//! operator = "ZI"
//!
//! [thermal]
//! precision_digits = 100
//! ```

use serde::Deserialize;
use spin::generators::{dm_terms, heisenberg_terms, magnetic_vector, replicate_system};
use spin::site::spins_from_f64;
use spin::{Spin, SpinError, Term};
use std::path::{Path, PathBuf};
use thermo::{ThermalConfig, ThermoError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse system file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid system: {0}")]
    Invalid(String),

    #[error(transparent)]
    Spin(#[from] SpinError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),
}

/// A literal operator string with its coefficient.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermSpec {
    pub coefficient: f64,
    pub operator: String,
}

/// Isotropic exchange `J·(Si·Sj)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BondSpec {
    pub sites: (usize, usize),
    pub exchange: f64,
}

/// Antisymmetric exchange `D·(Si × Sj)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DmSpec {
    pub sites: (usize, usize),
    pub vector: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    pub spins: Vec<f64>,
    #[serde(default)]
    pub temperatures: Vec<f64>,
    #[serde(default)]
    pub terms: Vec<TermSpec>,
    #[serde(default)]
    pub bonds: Vec<BondSpec>,
    #[serde(default)]
    pub dm: Vec<DmSpec>,
    /// Coefficient of `Sz` on every site.
    #[serde(default)]
    pub field: f64,
    /// Extra non-interacting copies of the system.
    #[serde(default)]
    pub replicas: usize,
    #[serde(default)]
    pub thermal: ThermalConfig,
    pub threads: Option<usize>,
}

impl SystemConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SystemError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SystemError> {
        let content = std::fs::read_to_string(path).map_err(|source| SystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Spin-½ antiferromagnetic dimer with `J = 1 meV`.
    pub fn heisenberg_dimer() -> Self {
        Self {
            spins: vec![0.5, 0.5],
            temperatures: Vec::new(),
            terms: Vec::new(),
            bonds: vec![BondSpec {
                sites: (0, 1),
                exchange: 1e-3,
            }],
            dm: Vec::new(),
            field: 0.0,
            replicas: 0,
            thermal: ThermalConfig::default(),
            threads: None,
        }
    }

    pub fn validate(&self) -> Result<(), SystemError> {
        if self.spins.is_empty() {
            return Err(SystemError::Invalid("`spins` must not be empty".into()));
        }
        spins_from_f64(&self.spins)?;
        let n = self.spins.len();
        for term in &self.terms {
            let parsed = Term::parse(term.coefficient, &term.operator)?;
            if parsed.operator.len() != n {
                return Err(SpinError::LengthMismatch {
                    operator_len: parsed.operator.len(),
                    spins_len: n,
                }
                .into());
            }
        }
        let pairs = self
            .bonds
            .iter()
            .map(|b| b.sites)
            .chain(self.dm.iter().map(|d| d.sites));
        for (i, j) in pairs {
            if i == j {
                return Err(SystemError::Invalid(format!("bond ({i}, {j}) couples a site to itself")));
            }
        }
        if let Some(t) = self.temperatures.iter().find(|t| !t.is_finite()) {
            return Err(SystemError::Invalid(format!("temperature {t} is not finite")));
        }
        self.thermal.validate()?;
        Ok(())
    }

    /// Spins of every replica, in site order.
    pub fn spins(&self) -> Result<Vec<Spin>, SystemError> {
        let base = spins_from_f64(&self.spins)?;
        Ok(base.repeat(self.replicas + 1))
    }

    /// Terms of one replica, padded out to all of them.
    pub fn terms(&self) -> Result<Vec<Term>, SystemError> {
        let n = self.spins.len();
        let mut terms = Vec::new();
        for spec in &self.terms {
            terms.push(Term::parse(spec.coefficient, &spec.operator)?);
        }
        let indexes: Vec<(usize, usize)> = self.bonds.iter().map(|b| b.sites).collect();
        let exchanges: Vec<f64> = self.bonds.iter().map(|b| b.exchange).collect();
        terms.extend(heisenberg_terms(&indexes, &exchanges, n)?);
        for d in &self.dm {
            terms.extend(dm_terms(d.sites, d.vector, n)?);
        }
        if self.field != 0.0 {
            let [_, _, z] = magnetic_vector(n);
            terms.extend(z.into_iter().map(|op| Term::new(self.field, op)));
        }
        Ok(replicate_system(&terms, self.replicas))
    }

    /// Total `Sz` over every replica.
    pub fn magnetization_terms(&self) -> Vec<Term> {
        let n = self.spins.len() * (self.replicas + 1);
        let [_, _, z] = magnetic_vector(n);
        z.into_iter().map(|op| Term::new(1.0, op)).collect()
    }

    /// Configured temperatures, or 41 log-spaced points from 0.1 K to 1000 K.
    pub fn temperatures(&self) -> Vec<f64> {
        if !self.temperatures.is_empty() {
            return self.temperatures.clone();
        }
        (0..=40).map(|k| 10f64.powf(-1.0 + 0.1 * k as f64)).collect()
    }
}

/// Parses a comma-separated temperature list such as `"1,10,100"`.
pub fn parse_temperatures(list: &str) -> Result<Vec<f64>, SystemError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| SystemError::Invalid(format!("bad temperature {s:?}")))
        })
        .collect()
}
