pub mod config;
pub mod error;
pub mod observables;
pub mod spectrum;
pub mod statistics;
pub mod workflow;

pub use config::{ThermalConfig, BOLTZMANN};
pub use error::ThermoError;
pub use spectrum::Spectrum;
pub use statistics::{
    log_partition, occupation_probabilities, precision_tier, thermal_state, PrecisionTier,
    ThermalState,
};
pub use workflow::{
    entropy, entropy_workflow, expectation_value, expected_value_workflow, specific_heat,
    specific_heat_workflow, Schedule, Sweep,
};
