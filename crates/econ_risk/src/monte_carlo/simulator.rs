//! Monte Carlo simulation of independent or correlated input variables.

use super::config::SimulationConfig;
use super::distribution::Distribution;
use super::sampler::{DistributionSampler, Sampler};
use crate::error::RiskError;
use econ_core::math::correlation::{CholeskyFactor, CorrelationMatrix};
use econ_core::math::statistics::SampleSummary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pairwise correlations keyed by variable name. Missing pairs are zero.
pub type CorrelationSpec = BTreeMap<String, BTreeMap<String, f64>>;

/// Simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloInput {
    /// Number of trials
    pub iterations: usize,
    /// Input distributions by variable name
    pub variables: BTreeMap<String, Distribution>,
    /// Optional correlation between variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationSpec>,
}

impl MonteCarloInput {
    /// Request with no variables yet.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            variables: BTreeMap::new(),
            correlation: None,
        }
    }

    /// Add a variable.
    pub fn with_variable(mut self, name: impl Into<String>, distribution: Distribution) -> Self {
        self.variables.insert(name.into(), distribution);
        self
    }

    /// Set the correlation between two variables.
    pub fn with_correlation(mut self, a: impl Into<String>, b: impl Into<String>, rho: f64) -> Self {
        self.correlation
            .get_or_insert_with(BTreeMap::new)
            .entry(a.into())
            .or_default()
            .insert(b.into(), rho);
        self
    }
}

/// Interpolated percentiles of a simulated variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 10th percentile
    pub p10: f64,
    /// 25th percentile
    pub p25: f64,
    /// Median
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
}

/// Summary of the simulated values of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableStatistics {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (N−1)
    #[serde(rename = "std")]
    pub std_dev: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Percentiles
    pub percentiles: Percentiles,
}

impl VariableStatistics {
    fn from_samples(samples: &[f64]) -> Option<Self> {
        let summary = SampleSummary::from_values(samples)?;
        Some(Self {
            mean: summary.mean,
            std_dev: summary.std_dev,
            min: summary.min,
            max: summary.max,
            percentiles: Percentiles {
                p10: summary.percentile(0.10),
                p25: summary.percentile(0.25),
                p50: summary.percentile(0.50),
                p75: summary.percentile(0.75),
                p90: summary.percentile(0.90),
            },
        })
    }
}

/// Simulation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Number of trials
    pub iterations: usize,
    /// Base seed, when the run was seeded by the simulator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Statistics by variable name
    pub statistics: BTreeMap<String, VariableStatistics>,
}

/// Validated variables in name order with an optional Cholesky factor.
struct SimulationPlan {
    names: Vec<String>,
    distributions: Vec<Distribution>,
    cholesky: Option<CholeskyFactor>,
}

impl SimulationPlan {
    fn from_input(input: &MonteCarloInput) -> Result<Self, RiskError> {
        if input.iterations == 0 {
            return Err(RiskError::invalid_input("iterations must be positive"));
        }
        if input.variables.is_empty() {
            return Err(RiskError::invalid_input("at least one variable is required"));
        }

        let mut names = Vec::with_capacity(input.variables.len());
        let mut distributions = Vec::with_capacity(input.variables.len());
        for (name, distribution) in &input.variables {
            distribution.validate().map_err(|e| e.for_variable(name))?;
            names.push(name.clone());
            distributions.push(*distribution);
        }

        let cholesky = match &input.correlation {
            Some(spec) => {
                let matrix = correlation_matrix(&names, spec)?;
                if matrix.is_identity() {
                    None
                } else {
                    Some(matrix.cholesky()?)
                }
            }
            None => None,
        };

        Ok(Self {
            names,
            distributions,
            cholesky,
        })
    }

    /// Draw `count` trials; returns one column per variable.
    fn draw<S: Sampler + ?Sized>(&self, sampler: &mut S, count: usize) -> Vec<Vec<f64>> {
        let dim = self.distributions.len();
        let mut columns: Vec<Vec<f64>> = (0..dim).map(|_| Vec::with_capacity(count)).collect();

        match &self.cholesky {
            Some(factor) => {
                let mut z = vec![0.0; dim];
                for _ in 0..count {
                    for zi in z.iter_mut() {
                        *zi = sampler.standard_normal();
                    }
                    let w = factor.transform(&z);
                    for ((column, distribution), wi) in
                        columns.iter_mut().zip(&self.distributions).zip(w)
                    {
                        column.push(distribution.from_standard_normal(wi));
                    }
                }
            }
            None => {
                for _ in 0..count {
                    for (column, distribution) in columns.iter_mut().zip(&self.distributions) {
                        column.push(sampler.sample(distribution));
                    }
                }
            }
        }
        columns
    }

    fn summarise(&self, iterations: usize, seed: Option<u64>, columns: &[Vec<f64>]) -> MonteCarloResult {
        let statistics = self
            .names
            .iter()
            .zip(columns)
            .filter_map(|(name, samples)| {
                VariableStatistics::from_samples(samples).map(|stats| (name.clone(), stats))
            })
            .collect();
        MonteCarloResult {
            iterations,
            seed,
            statistics,
        }
    }
}

fn correlation_matrix(names: &[String], spec: &CorrelationSpec) -> Result<CorrelationMatrix, RiskError> {
    let dim = names.len();
    let index = |name: &str| {
        names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RiskError::invalid_input(format!("unknown variable in correlation: '{}'", name)))
    };

    let mut values = vec![0.0; dim * dim];
    for i in 0..dim {
        values[i * dim + i] = 1.0;
    }
    // A pair given in one direction only is mirrored; if both are given they must agree
    let mut explicit = vec![false; dim * dim];
    for (a, row) in spec {
        let i = index(a)?;
        for (b, &rho) in row {
            let j = index(b)?;
            values[i * dim + j] = rho;
            explicit[i * dim + j] = true;
            if !explicit[j * dim + i] {
                values[j * dim + i] = rho;
            }
        }
    }
    Ok(CorrelationMatrix::new(&values, dim)?)
}

/// Monte Carlo simulator.
///
/// # Examples
///
/// ```
/// use econ_risk::monte_carlo::{Distribution, MonteCarloInput, MonteCarloSimulator};
///
/// let input = MonteCarloInput::new(10_000)
///     .with_variable("cost", Distribution::uniform(0.0, 100.0).unwrap());
/// let result = MonteCarloSimulator::default().simulate_parallel(&input, 42).unwrap();
///
/// let cost = &result.statistics["cost"];
/// assert!((cost.mean - 50.0).abs() < 2.0);
/// assert!(cost.percentiles.p10 < cost.percentiles.p90);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSimulator {
    config: SimulationConfig,
}

impl MonteCarloSimulator {
    /// Create a simulator with the given batch layout.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Batch layout in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every trial sequentially from one sampler.
    ///
    /// # Errors
    ///
    /// * [`RiskError::InvalidInput`] - zero iterations, no variables, or an
    ///   unknown name in the correlation map
    /// * [`RiskError::InvalidDistribution`] - malformed distribution
    /// * [`RiskError::Correlation`] - correlation matrix rejected
    pub fn simulate<S: Sampler + ?Sized>(
        &self,
        input: &MonteCarloInput,
        sampler: &mut S,
    ) -> Result<MonteCarloResult, RiskError> {
        let plan = SimulationPlan::from_input(input)?;
        let columns = plan.draw(sampler, input.iterations);
        Ok(plan.summarise(input.iterations, None, &columns))
    }

    /// Run the trials in independently seeded batches.
    ///
    /// Batch `k` draws from `DistributionSampler::from_seed(seed + k)`, so the
    /// result depends only on the seed and the batch size.
    pub fn simulate_parallel(
        &self,
        input: &MonteCarloInput,
        seed: u64,
    ) -> Result<MonteCarloResult, RiskError> {
        let plan = SimulationPlan::from_input(input)?;
        let iterations = input.iterations;
        let batch_size = self.config.batch_size.max(1);
        let batches = self.config.batch_count(iterations);
        let parallel = self.config.should_parallelize(iterations);
        tracing::debug!(
            iterations,
            batches,
            batch_size,
            parallel,
            variables = plan.names.len(),
            correlated = plan.cholesky.is_some(),
            "monte carlo batch layout"
        );

        let run_batch = |k: usize| {
            let count = batch_size.min(iterations - k * batch_size);
            let mut sampler = DistributionSampler::from_seed(seed.wrapping_add(k as u64));
            plan.draw(&mut sampler, count)
        };
        let chunks: Vec<Vec<Vec<f64>>> = if parallel {
            (0..batches).into_par_iter().map(run_batch).collect()
        } else {
            (0..batches).map(run_batch).collect()
        };

        let mut columns: Vec<Vec<f64>> = (0..plan.names.len())
            .map(|_| Vec::with_capacity(iterations))
            .collect();
        for chunk in chunks {
            for (column, part) in columns.iter_mut().zip(chunk) {
                column.extend(part);
            }
        }

        Ok(plan.summarise(iterations, Some(seed), &columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Replays fixed uniform and normal sequences.
    struct ScriptedSampler {
        uniforms: Vec<f64>,
        normals: Vec<f64>,
        u: usize,
        n: usize,
    }

    impl Sampler for ScriptedSampler {
        fn uniform(&mut self) -> f64 {
            let v = self.uniforms[self.u % self.uniforms.len()];
            self.u += 1;
            v
        }

        fn standard_normal(&mut self) -> f64 {
            let v = self.normals[self.n % self.normals.len()];
            self.n += 1;
            v
        }
    }

    fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len() as f64;
        let mx = xs.iter().sum::<f64>() / n;
        let my = ys.iter().sum::<f64>() / n;
        let cov: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
        let vx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
        let vy: f64 = ys.iter().map(|y| (y - my).powi(2)).sum();
        cov / (vx * vy).sqrt()
    }

    #[test]
    fn test_scripted_uniform_statistics() {
        let input = MonteCarloInput::new(5)
            .with_variable("x", Distribution::uniform(0.0, 10.0).unwrap());
        let mut sampler = ScriptedSampler {
            uniforms: vec![0.0, 0.1, 0.2, 0.3, 0.4],
            normals: vec![0.0],
            u: 0,
            n: 0,
        };
        let result = MonteCarloSimulator::default()
            .simulate(&input, &mut sampler)
            .unwrap();
        let x = &result.statistics["x"];

        assert_eq!(result.iterations, 5);
        assert!(result.seed.is_none());
        assert_relative_eq!(x.mean, 2.0, epsilon = 1e-12);
        assert_eq!(x.min, 0.0);
        assert_eq!(x.max, 4.0);
        assert_relative_eq!(x.percentiles.p50, 2.0, epsilon = 1e-12);
        assert_relative_eq!(x.percentiles.p10, 0.4, epsilon = 1e-12);
        assert_relative_eq!(x.percentiles.p90, 3.6, epsilon = 1e-12);
        assert_relative_eq!(x.std_dev, 2.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_scripted_normal_uses_standard_normal() {
        let input = MonteCarloInput::new(2)
            .with_variable("y", Distribution::normal(10.0, 2.0).unwrap());
        let mut sampler = ScriptedSampler {
            uniforms: vec![0.5],
            normals: vec![-1.0, 1.0],
            u: 0,
            n: 0,
        };
        let result = MonteCarloSimulator::default()
            .simulate(&input, &mut sampler)
            .unwrap();
        let y = &result.statistics["y"];
        assert_eq!(y.min, 8.0);
        assert_eq!(y.max, 12.0);
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let input = MonteCarloInput::new(20_000)
            .with_variable("a", Distribution::triangular(1.0, 2.0, 6.0).unwrap())
            .with_variable("b", Distribution::normal(0.0, 1.0).unwrap());
        let simulator = MonteCarloSimulator::new(SimulationConfig::new(1000, 0));
        let first = simulator.simulate_parallel(&input, 7).unwrap();
        let second = simulator.simulate_parallel(&input, 7).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, Some(7));

        // Sequential execution of the same batches gives the same answer
        let sequential = MonteCarloSimulator::new(SimulationConfig::new(1000, usize::MAX))
            .simulate_parallel(&input, 7)
            .unwrap();
        assert_eq!(first, sequential);
    }

    #[test]
    fn test_triangular_mean_converges() {
        let input = MonteCarloInput::new(50_000)
            .with_variable("t", Distribution::triangular(0.0, 3.0, 12.0).unwrap());
        let result = MonteCarloSimulator::default()
            .simulate_parallel(&input, 11)
            .unwrap();
        assert!((result.statistics["t"].mean - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_correlated_normals() {
        let input = MonteCarloInput::new(1)
            .with_variable("a", Distribution::normal(0.0, 1.0).unwrap())
            .with_variable("b", Distribution::normal(0.0, 1.0).unwrap())
            .with_correlation("a", "b", 0.8);
        let plan = SimulationPlan::from_input(&input).unwrap();
        let mut sampler = DistributionSampler::from_seed(3);
        let columns = plan.draw(&mut sampler, 50_000);
        let rho = pearson(&columns[0], &columns[1]);
        assert!((rho - 0.8).abs() < 0.02, "rho = {}", rho);
    }

    #[test]
    fn test_correlated_uniform_copula_keeps_marginals() {
        let input = MonteCarloInput::new(40_000)
            .with_variable("a", Distribution::uniform(0.0, 100.0).unwrap())
            .with_variable("b", Distribution::uniform(0.0, 100.0).unwrap())
            .with_correlation("b", "a", -0.6);
        let result = MonteCarloSimulator::default()
            .simulate_parallel(&input, 5)
            .unwrap();
        for stats in result.statistics.values() {
            assert!(stats.min >= 0.0 && stats.max <= 100.0);
            assert!((stats.mean - 50.0).abs() < 1.5);
        }

        let plan = SimulationPlan::from_input(&input).unwrap();
        let columns = plan.draw(&mut DistributionSampler::from_seed(5), 20_000);
        assert!(pearson(&columns[0], &columns[1]) < -0.4);
    }

    #[test]
    fn test_identity_correlation_matches_independent() {
        let independent = MonteCarloInput::new(500)
            .with_variable("a", Distribution::uniform(0.0, 1.0).unwrap());
        let mut with_identity = independent.clone();
        with_identity.correlation = Some(BTreeMap::from([(
            "a".to_string(),
            BTreeMap::from([("a".to_string(), 1.0)]),
        )]));
        let simulator = MonteCarloSimulator::default();
        assert_eq!(
            simulator.simulate_parallel(&independent, 1).unwrap(),
            simulator.simulate_parallel(&with_identity, 1).unwrap()
        );
    }

    #[test]
    fn test_validation_errors() {
        let simulator = MonteCarloSimulator::default();
        let uniform = Distribution::uniform(0.0, 1.0).unwrap();

        let zero = MonteCarloInput::new(0).with_variable("a", uniform);
        assert!(matches!(
            simulator.simulate_parallel(&zero, 1),
            Err(RiskError::InvalidInput(_))
        ));

        assert!(matches!(
            simulator.simulate_parallel(&MonteCarloInput::new(10), 1),
            Err(RiskError::InvalidInput(_))
        ));

        let unknown = MonteCarloInput::new(10)
            .with_variable("a", uniform)
            .with_correlation("a", "ghost", 0.5);
        assert!(matches!(
            simulator.simulate_parallel(&unknown, 1),
            Err(RiskError::InvalidInput(_))
        ));

        let bad_rho = MonteCarloInput::new(10)
            .with_variable("a", uniform)
            .with_variable("b", uniform)
            .with_correlation("a", "b", 1.5);
        assert!(matches!(
            simulator.simulate_parallel(&bad_rho, 1),
            Err(RiskError::Correlation(_))
        ));

        let asymmetric = MonteCarloInput::new(10)
            .with_variable("a", uniform)
            .with_variable("b", uniform)
            .with_correlation("a", "b", 0.5)
            .with_correlation("b", "a", 0.2);
        assert!(matches!(
            simulator.simulate_parallel(&asymmetric, 1),
            Err(RiskError::Correlation(_))
        ));

        let invalid = MonteCarloInput::new(10).with_variable(
            "c",
            Distribution::Uniform { min: 2.0, max: 1.0 },
        );
        match simulator.simulate_parallel(&invalid, 1) {
            Err(RiskError::InvalidDistribution { variable, .. }) => assert_eq!(variable, "c"),
            other => panic!("expected InvalidDistribution, got {:?}", other),
        }
    }

    #[test]
    fn test_input_from_json() {
        let input: MonteCarloInput = serde_json::from_str(
            r#"{
                "iterations": 1000,
                "variables": {
                    "cost": {"distribution": "normal", "parameters": [100.0, 10.0]},
                    "duration": {"distribution": "triangular", "parameters": [3.0, 4.0, 8.0]}
                },
                "correlation": {"cost": {"duration": 0.3}}
            }"#,
        )
        .unwrap();
        let result = MonteCarloSimulator::default()
            .simulate_parallel(&input, 2)
            .unwrap();
        assert_eq!(result.statistics.len(), 2);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["statistics"]["cost"]["std"].is_number());
        assert!(json["statistics"]["cost"]["percentiles"]["p75"].is_number());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn percentiles_are_ordered(seed in any::<u64>(), iterations in 1usize..2000) {
            let input = MonteCarloInput::new(iterations)
                .with_variable("x", Distribution::triangular(-5.0, 0.0, 20.0).unwrap());
            let result = MonteCarloSimulator::default().simulate_parallel(&input, seed).unwrap();
            let x = &result.statistics["x"];
            let p = x.percentiles;
            prop_assert!(x.min <= p.p10);
            prop_assert!(p.p10 <= p.p25);
            prop_assert!(p.p25 <= p.p50);
            prop_assert!(p.p50 <= p.p75);
            prop_assert!(p.p75 <= p.p90);
            prop_assert!(p.p90 <= x.max);
        }
    }
}
