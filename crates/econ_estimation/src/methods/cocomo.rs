//! Basic COCOMO effort and schedule model.
//!
//! ```text
//! effort   = a * size_kloc^b            (person-months)
//! schedule = 2.5 * effort^d             (months)
//! team     = effort / schedule          (people)
//! ```
//!
//! | Mode          | a   | b    | d    |
//! |---------------|-----|------|------|
//! | organic       | 2.4 | 1.05 | 0.38 |
//! | semi-detached | 3.0 | 1.12 | 0.35 |
//! | embedded      | 3.6 | 1.20 | 0.32 |

use super::require_positive;
use crate::result::{EstimationDetail, EstimationResult, MethodId};
use econ_core::types::EstimationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coefficient of the schedule equation, shared by every mode.
pub const SCHEDULE_COEFFICIENT: f64 = 2.5;

/// COCOMO development mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentMode {
    /// Small experienced team, flexible requirements
    Organic,
    /// Medium team, mixed experience and requirements
    SemiDetached,
    /// Tight hardware, software and operational constraints
    Embedded,
}

impl DevelopmentMode {
    /// Effort coefficients `(a, b)`.
    pub fn effort_coefficients(&self) -> (f64, f64) {
        match self {
            DevelopmentMode::Organic => (2.4, 1.05),
            DevelopmentMode::SemiDetached => (3.0, 1.12),
            DevelopmentMode::Embedded => (3.6, 1.20),
        }
    }

    /// Schedule exponent `d`.
    pub fn schedule_exponent(&self) -> f64 {
        match self {
            DevelopmentMode::Organic => 0.38,
            DevelopmentMode::SemiDetached => 0.35,
            DevelopmentMode::Embedded => 0.32,
        }
    }

    /// Short description of the project class.
    pub fn description(&self) -> &'static str {
        match self {
            DevelopmentMode::Organic => {
                "Small teams with good experience working with less than rigid requirements"
            }
            DevelopmentMode::SemiDetached => {
                "Medium teams with mixed experience working with a mix of rigid and less than rigid requirements"
            }
            DevelopmentMode::Embedded => {
                "Developed within a set of tight constraints (hardware, software, operational)"
            }
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DevelopmentMode::Organic => "organic",
            DevelopmentMode::SemiDetached => "semi_detached",
            DevelopmentMode::Embedded => "embedded",
        }
    }
}

impl fmt::Display for DevelopmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevelopmentMode {
    type Err = EstimationError;

    /// Case-insensitive; accepts `semi-detached` as an alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "organic" => Ok(DevelopmentMode::Organic),
            "semi_detached" | "semi-detached" => Ok(DevelopmentMode::SemiDetached),
            "embedded" => Ok(DevelopmentMode::Embedded),
            _ => Err(EstimationError::InvalidMode(s.to_string())),
        }
    }
}

/// Schedule and coefficients behind a COCOMO estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocomoDetail {
    /// Development mode used
    pub mode: DevelopmentMode,
    /// Description of the mode
    pub mode_description: String,
    /// Size in KLOC
    pub size_kloc: f64,
    /// Effort coefficient `a`
    pub coefficient_a: f64,
    /// Effort exponent `b`
    pub exponent_b: f64,
    /// Schedule exponent `d`
    pub schedule_exponent: f64,
    /// Development time in months
    pub development_time_months: f64,
    /// Average team size (people)
    pub average_team_size: f64,
}

/// Basic COCOMO estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CocomoEstimator;

impl CocomoEstimator {
    /// Create an estimator.
    pub fn new() -> Self {
        Self
    }

    /// Estimate effort from size and a textual mode.
    ///
    /// # Errors
    ///
    /// * [`EstimationError::InvalidInput`] - size is not a positive finite number
    /// * [`EstimationError::InvalidMode`] - mode is not recognised
    pub fn estimate(&self, size_kloc: f64, mode: &str) -> Result<EstimationResult, EstimationError> {
        let size = require_positive("size_kloc", size_kloc)?;
        let mode = mode.parse::<DevelopmentMode>()?;
        self.estimate_mode(size, mode)
    }

    /// Estimate effort from size and an already parsed mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use econ_estimation::{CocomoEstimator, DevelopmentMode, EstimationDetail};
    ///
    /// let result = CocomoEstimator::new()
    ///     .estimate_mode(10.0, DevelopmentMode::Organic)
    ///     .unwrap();
    /// let expected = 2.4 * 10.0_f64.powf(1.05);
    /// assert!((result.effort_person_months - expected).abs() < 1e-9);
    /// assert!(matches!(result.metadata, EstimationDetail::Cocomo(_)));
    /// ```
    pub fn estimate_mode(
        &self,
        size_kloc: f64,
        mode: DevelopmentMode,
    ) -> Result<EstimationResult, EstimationError> {
        let size = require_positive("size_kloc", size_kloc)?;
        let (a, b) = mode.effort_coefficients();
        let d = mode.schedule_exponent();

        let effort = a * size.powf(b);
        let time = SCHEDULE_COEFFICIENT * effort.powf(d);
        let team = effort / time;

        Ok(EstimationResult {
            method: MethodId::Cocomo,
            effort_person_months: effort,
            metadata: EstimationDetail::Cocomo(CocomoDetail {
                mode,
                mode_description: mode.description().to_string(),
                size_kloc: size,
                coefficient_a: a,
                exponent_b: b,
                schedule_exponent: d,
                development_time_months: time,
                average_team_size: team,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn detail(result: &EstimationResult) -> &CocomoDetail {
        match &result.metadata {
            EstimationDetail::Cocomo(d) => d,
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_organic_effort_and_schedule() {
        let result = CocomoEstimator::new().estimate(32.0, "organic").unwrap();
        let effort = 2.4 * 32.0_f64.powf(1.05);
        assert_relative_eq!(result.effort_person_months, effort, epsilon = 1e-10);

        let d = detail(&result);
        let time = 2.5 * effort.powf(0.38);
        assert_relative_eq!(d.development_time_months, time, epsilon = 1e-10);
        assert_relative_eq!(d.average_team_size, effort / time, epsilon = 1e-10);
        assert_eq!(d.mode, DevelopmentMode::Organic);
    }

    #[test]
    fn test_semi_detached_alias() {
        let a = CocomoEstimator::new().estimate(50.0, "semi-detached").unwrap();
        let b = CocomoEstimator::new().estimate(50.0, "semi_detached").unwrap();
        assert_eq!(a, b);
        assert_relative_eq!(
            a.effort_person_months,
            3.0 * 50.0_f64.powf(1.12),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_embedded_coefficients() {
        let result = CocomoEstimator::new().estimate(100.0, "Embedded").unwrap();
        let d = detail(&result);
        assert_eq!(d.coefficient_a, 3.6);
        assert_eq!(d.exponent_b, 1.20);
        assert_eq!(d.schedule_exponent, 0.32);
    }

    #[test]
    fn test_invalid_mode() {
        let err = CocomoEstimator::new().estimate(10.0, "agile").unwrap_err();
        assert_eq!(err, EstimationError::InvalidMode("agile".to_string()));
    }

    #[test]
    fn test_invalid_size() {
        let estimator = CocomoEstimator::new();
        for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                estimator.estimate(size, "organic"),
                Err(EstimationError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_mode_ordering_for_same_size() {
        let estimator = CocomoEstimator::new();
        let organic = estimator.estimate_mode(20.0, DevelopmentMode::Organic).unwrap();
        let semi = estimator
            .estimate_mode(20.0, DevelopmentMode::SemiDetached)
            .unwrap();
        let embedded = estimator.estimate_mode(20.0, DevelopmentMode::Embedded).unwrap();
        assert!(organic.effort_person_months < semi.effort_person_months);
        assert!(semi.effort_person_months < embedded.effort_person_months);
    }

    #[test]
    fn test_mode_round_trip_display() {
        for mode in [
            DevelopmentMode::Organic,
            DevelopmentMode::SemiDetached,
            DevelopmentMode::Embedded,
        ] {
            assert_eq!(mode.to_string().parse::<DevelopmentMode>().unwrap(), mode);
        }
    }

    proptest! {
        #[test]
        fn effort_strictly_increases_with_size(
            size in 0.1f64..1000.0,
            delta in 0.01f64..100.0,
            mode_idx in 0usize..3,
        ) {
            let mode = [
                DevelopmentMode::Organic,
                DevelopmentMode::SemiDetached,
                DevelopmentMode::Embedded,
            ][mode_idx];
            let estimator = CocomoEstimator::new();
            let small = estimator.estimate_mode(size, mode).unwrap();
            let large = estimator.estimate_mode(size + delta, mode).unwrap();
            prop_assert!(large.effort_person_months > small.effort_person_months);
            prop_assert!(small.effort_person_months > 0.0);
        }
    }
}
