//! One-at-a-time sensitivity analysis with tornado ordering.
//!
//! Each variable is moved to its lower and upper bound while the others stay
//! at base; the change in the evaluated outcome is its impact. Variables are
//! ranked by the absolute spread between the two impacts.

use crate::error::RiskError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower and upper scenario values of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableRange {
    /// Pessimistic/low scenario value
    pub min: f64,
    /// Optimistic/high scenario value
    pub max: f64,
}

/// Base outcome and the variables to perturb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Outcome with every variable at base
    pub base_value: f64,
    /// Scenario bounds per variable
    pub variables: BTreeMap<String, VariableRange>,
}

/// Impact of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    /// Variable name
    pub name: String,
    /// `evaluate(min) - base`
    pub min_impact: f64,
    /// `evaluate(max) - base`
    pub max_impact: f64,
    /// `max_impact - min_impact`, sign preserved
    pub range: f64,
    /// `min_impact` relative to base, in percent
    pub min_impact_pct: Option<f64>,
    /// `max_impact` relative to base, in percent
    pub max_impact_pct: Option<f64>,
}

/// Results in tornado order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Base outcome
    pub base_value: f64,
    /// Per-variable impacts, largest absolute range first
    pub variables: Vec<SensitivityResult>,
}

impl SensitivityReport {
    /// Variable names in tornado order.
    pub fn ranking(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Impact of a named variable.
    pub fn get(&self, name: &str) -> Option<&SensitivityResult> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Runs one-at-a-time sensitivity analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Create an analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze with one evaluation function shared by every variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use econ_risk::{SensitivityAnalyzer, SensitivityInput, VariableRange};
    /// use std::collections::BTreeMap;
    ///
    /// let input = SensitivityInput {
    ///     base_value: 100.0,
    ///     variables: BTreeMap::from([(
    ///         "rate".to_string(),
    ///         VariableRange { min: 90.0, max: 120.0 },
    ///     )]),
    /// };
    /// let report = SensitivityAnalyzer::new().analyze(&input, |x| 2.0 * x).unwrap();
    /// assert_eq!(report.variables[0].range, 60.0);
    /// ```
    pub fn analyze<F>(&self, input: &SensitivityInput, evaluate: F) -> Result<SensitivityReport, RiskError>
    where
        F: Fn(f64) -> f64,
    {
        self.analyze_with(input, |_, x| evaluate(x))
    }

    /// Analyze with an evaluation function that also receives the variable name.
    pub fn analyze_with<F>(
        &self,
        input: &SensitivityInput,
        evaluate: F,
    ) -> Result<SensitivityReport, RiskError>
    where
        F: Fn(&str, f64) -> f64,
    {
        let base = input.base_value;
        if !base.is_finite() {
            return Err(RiskError::invalid_input(format!(
                "base value must be finite, got {}",
                base
            )));
        }

        let mut variables = Vec::with_capacity(input.variables.len());
        for (name, bounds) in &input.variables {
            if !bounds.min.is_finite() || !bounds.max.is_finite() {
                return Err(RiskError::invalid_input(format!(
                    "bounds of '{}' must be finite",
                    name
                )));
            }
            let low = evaluate(name, bounds.min);
            let high = evaluate(name, bounds.max);
            if !low.is_finite() || !high.is_finite() {
                return Err(RiskError::invalid_input(format!(
                    "evaluation of '{}' produced a non-finite outcome",
                    name
                )));
            }

            let min_impact = low - base;
            let max_impact = high - base;
            let pct = |impact: f64| (base != 0.0).then(|| impact / base * 100.0);
            variables.push(SensitivityResult {
                name: name.clone(),
                min_impact,
                max_impact,
                range: max_impact - min_impact,
                min_impact_pct: pct(min_impact),
                max_impact_pct: pct(max_impact),
            });
        }

        // BTreeMap iteration is by name, and the sort is stable
        variables.sort_by(|a, b| b.range.abs().total_cmp(&a.range.abs()));

        Ok(SensitivityReport {
            base_value: base,
            variables,
        })
    }

    /// Analyze using each bound itself as the scenario outcome.
    pub fn analyze_direct(&self, input: &SensitivityInput) -> Result<SensitivityReport, RiskError> {
        self.analyze(input, |x| x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn input(base: f64, vars: &[(&str, f64, f64)]) -> SensitivityInput {
        SensitivityInput {
            base_value: base,
            variables: vars
                .iter()
                .map(|(n, min, max)| (n.to_string(), VariableRange { min: *min, max: *max }))
                .collect(),
        }
    }

    #[test]
    fn test_direct_impacts_and_percentages() {
        let report = SensitivityAnalyzer::new()
            .analyze_direct(&input(200.0, &[("cost", 150.0, 260.0)]))
            .unwrap();
        let cost = report.get("cost").unwrap();
        assert_eq!(cost.min_impact, -50.0);
        assert_eq!(cost.max_impact, 60.0);
        assert_eq!(cost.range, 110.0);
        assert_relative_eq!(cost.min_impact_pct.unwrap(), -25.0, epsilon = 1e-12);
        assert_relative_eq!(cost.max_impact_pct.unwrap(), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tornado_order() {
        let report = SensitivityAnalyzer::new()
            .analyze_direct(&input(
                100.0,
                &[("small", 95.0, 105.0), ("large", 50.0, 150.0), ("medium", 80.0, 120.0)],
            ))
            .unwrap();
        assert_eq!(report.ranking(), vec!["large", "medium", "small"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let report = SensitivityAnalyzer::new()
            .analyze_direct(&input(0.0, &[("zeta", -1.0, 1.0), ("alpha", 1.0, -1.0)]))
            .unwrap();
        assert_eq!(report.ranking(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_decreasing_evaluation_gives_negative_range() {
        let report = SensitivityAnalyzer::new()
            .analyze(&input(0.0, &[("x", 1.0, 2.0)]), |x| -x)
            .unwrap();
        assert!(report.variables[0].range < 0.0);
    }

    #[test]
    fn test_zero_base_has_no_percentages() {
        let report = SensitivityAnalyzer::new()
            .analyze_direct(&input(0.0, &[("x", -1.0, 1.0)]))
            .unwrap();
        assert!(report.variables[0].min_impact_pct.is_none());
        assert!(report.variables[0].max_impact_pct.is_none());
    }

    #[test]
    fn test_per_variable_evaluator() {
        let report = SensitivityAnalyzer::new()
            .analyze_with(&input(10.0, &[("a", 0.0, 1.0), ("b", 0.0, 1.0)]), |name, x| {
                if name == "a" {
                    10.0 + 100.0 * x
                } else {
                    10.0 + x
                }
            })
            .unwrap();
        assert_eq!(report.ranking(), vec!["a", "b"]);
        assert_eq!(report.get("a").unwrap().range, 100.0);
    }

    #[test]
    fn test_rejects_non_finite() {
        let analyzer = SensitivityAnalyzer::new();
        assert!(analyzer
            .analyze_direct(&input(f64::NAN, &[("x", 0.0, 1.0)]))
            .is_err());
        assert!(analyzer
            .analyze_direct(&input(1.0, &[("x", 0.0, f64::INFINITY)]))
            .is_err());
        assert!(analyzer
            .analyze(&input(1.0, &[("x", 0.0, 1.0)]), |x| 1.0 / x)
            .is_err());
    }

    #[test]
    fn test_empty_variables() {
        let report = SensitivityAnalyzer::new()
            .analyze_direct(&input(5.0, &[]))
            .unwrap();
        assert!(report.variables.is_empty());
    }

    proptest! {
        #[test]
        fn ranking_is_sorted_by_absolute_range(
            bounds in proptest::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..12)
        ) {
            let vars: Vec<(String, f64, f64)> = bounds
                .iter()
                .enumerate()
                .map(|(i, (a, b))| (format!("v{:02}", i), *a, *b))
                .collect();
            let input = SensitivityInput {
                base_value: 1.0,
                variables: vars
                    .iter()
                    .map(|(n, a, b)| (n.clone(), VariableRange { min: *a, max: *b }))
                    .collect(),
            };
            let report = SensitivityAnalyzer::new().analyze_direct(&input).unwrap();
            for pair in report.variables.windows(2) {
                prop_assert!(pair[0].range.abs() >= pair[1].range.abs());
            }
        }
    }
}
