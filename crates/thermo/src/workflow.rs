//! Temperature sweeps.
//!
//! Each temperature is an independent unit of work. Results come back in
//! the order of the input temperatures, one `Result` per temperature, so a
//! failure at one point leaves the others intact.

use crate::config::ThermalConfig;
use crate::error::ThermoError;
use crate::observables::{entropy_at, expectation_value_at, specific_heat_at};
use crate::spectrum::Spectrum;
use linalg::{eigh, Operator};
use rayon::prelude::*;
use tracing::{debug, warn};

pub type Sweep = Vec<Result<f64, ThermoError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    #[default]
    Sequential,
    /// `threads == 0` runs on the global Rayon pool.
    Parallel { threads: usize },
}

fn sweep<F>(temps: &[f64], schedule: Schedule, f: F) -> Sweep
where
    F: Fn(f64) -> Result<f64, ThermoError> + Sync + Send,
{
    debug!(points = temps.len(), ?schedule, "temperature sweep");
    match schedule {
        Schedule::Sequential => temps.iter().map(|&t| f(t)).collect(),
        Schedule::Parallel { threads: 0 } => temps.par_iter().map(|&t| f(t)).collect(),
        Schedule::Parallel { threads } => {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| temps.par_iter().map(|&t| f(t)).collect()),
                Err(err) => {
                    warn!(threads, %err, "falling back to the global Rayon pool");
                    temps.par_iter().map(|&t| f(t)).collect()
                }
            }
        }
    }
}

pub fn specific_heat(
    spectrum: &Spectrum,
    temps: &[f64],
    cfg: &ThermalConfig,
    schedule: Schedule,
) -> Sweep {
    sweep(temps, schedule, |t| specific_heat_at(spectrum, t, cfg))
}

pub fn entropy(spectrum: &Spectrum, temps: &[f64], cfg: &ThermalConfig, schedule: Schedule) -> Sweep {
    sweep(temps, schedule, |t| entropy_at(spectrum, t, cfg))
}

pub fn expectation_value(
    spectrum: &Spectrum,
    projection: &[f64],
    temps: &[f64],
    cfg: &ThermalConfig,
    schedule: Schedule,
) -> Sweep {
    sweep(temps, schedule, |t| expectation_value_at(spectrum, projection, t, cfg))
}

/// Diagonalizes `op` once, then sweeps [`specific_heat`].
pub fn specific_heat_workflow(
    op: &Operator,
    temps: &[f64],
    cfg: &ThermalConfig,
    schedule: Schedule,
) -> Result<Sweep, ThermoError> {
    let spectrum = Spectrum::from_operator(op)?;
    Ok(specific_heat(&spectrum, temps, cfg, schedule))
}

/// Diagonalizes `op` once, then sweeps [`entropy`].
pub fn entropy_workflow(
    op: &Operator,
    temps: &[f64],
    cfg: &ThermalConfig,
    schedule: Schedule,
) -> Result<Sweep, ThermoError> {
    let spectrum = Spectrum::from_operator(op)?;
    Ok(entropy(&spectrum, temps, cfg, schedule))
}

/// Thermal average of `operator` in the eigenbasis of `op_base`.
///
/// The diagonal `⟨v_k|operator|v_k⟩` is computed once before the sweep.
pub fn expected_value_workflow(
    op_base: &Operator,
    operator: &Operator,
    temps: &[f64],
    cfg: &ThermalConfig,
    schedule: Schedule,
) -> Result<Sweep, ThermoError> {
    let evd = eigh(op_base)?;
    let projection = evd.diagonal_projection(operator)?;
    let spectrum = Spectrum::from_sorted(evd.values)?;
    Ok(expectation_value(&spectrum, &projection, temps, cfg, schedule))
}
