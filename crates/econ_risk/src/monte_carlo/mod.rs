//! Monte Carlo simulation.
//!
//! - [`Distribution`]: uniform, normal and triangular inputs
//! - [`Sampler`]: pluggable variate source, [`DistributionSampler`] by default
//! - [`MonteCarloSimulator`]: sequential or batch-parallel simulation with
//!   optional Gaussian-copula correlation
//!
//! # Performance
//!
//! [`MonteCarloSimulator::simulate_parallel`] splits trials into seeded
//! batches of [`SimulationConfig::batch_size`] and runs them on the rayon
//! pool. Output is identical whether or not the pool is used.

mod config;
mod distribution;
mod sampler;
mod simulator;

pub use config::{SimulationConfig, DEFAULT_BATCH_SIZE};
pub use distribution::{Distribution, DistributionKind, DistributionSpec};
pub use sampler::{DistributionSampler, Sampler};
pub use simulator::{
    CorrelationSpec, MonteCarloInput, MonteCarloResult, MonteCarloSimulator, Percentiles,
    VariableStatistics,
};
