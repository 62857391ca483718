//! Budget tracking: actual spend by period and category, variance against
//! the planned budget, and a linear spend forecast.

use crate::error::FinanceError;
use econ_core::math::statistics::LinearFit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of future periods forecast by [`BudgetLedger::analyze`].
pub const FORECAST_PERIODS: usize = 3;

/// One recorded cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Sortable period key, e.g. `2025-06`
    pub period: String,
    /// Cost category
    pub category: String,
    /// Actual cost
    pub amount: f64,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Difference between the planned budget and actual spend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetVariance {
    /// `budget - actual`; positive means under budget
    pub amount: f64,
    /// `amount / budget * 100`
    pub percentage: f64,
}

/// Spend of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    /// Total across all periods
    pub total: f64,
    /// Share of the total actual spend in percent; `None` when nothing was spent
    pub percentage: Option<f64>,
    /// Spend per period
    pub periods: BTreeMap<String, f64>,
}

/// Full budget analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    /// Planned budget, when supplied
    pub total_budget: Option<f64>,
    /// Total recorded spend
    pub total_actual: f64,
    /// Variance against the planned budget
    pub variance: Option<BudgetVariance>,
    /// Per-category breakdown
    pub category_analysis: BTreeMap<String, CategoryAnalysis>,
    /// Recorded periods in ascending order
    pub periods: Vec<String>,
    /// Projected spend of the next periods; requires at least two periods
    pub forecast: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PeriodSpend {
    actual: f64,
    categories: BTreeMap<String, f64>,
}

/// Accumulates actual costs.
///
/// # Examples
///
/// ```
/// use econ_finance::{BudgetEntry, BudgetLedger};
///
/// let mut ledger = BudgetLedger::new();
/// for (period, amount) in [("2025-01", 100.0), ("2025-02", 200.0)] {
///     ledger
///         .record(BudgetEntry {
///             period: period.to_string(),
///             category: "labour".to_string(),
///             amount,
///             description: None,
///         })
///         .unwrap();
/// }
///
/// let analysis = ledger.analyze(Some(1000.0)).unwrap();
/// assert_eq!(analysis.total_actual, 300.0);
/// assert_eq!(analysis.variance.unwrap().amount, 700.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BudgetLedger {
    periods: BTreeMap<String, PeriodSpend>,
    total_actual: f64,
}

impl BudgetLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a batch of entries, stopping at the first invalid one.
    pub fn from_entries<I>(entries: I) -> Result<Self, FinanceError>
    where
        I: IntoIterator<Item = BudgetEntry>,
    {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.record(entry)?;
        }
        Ok(ledger)
    }

    /// Add a cost to its period and category.
    ///
    /// # Errors
    ///
    /// [`FinanceError::InvalidInput`] for a non-finite amount or an empty
    /// period or category.
    pub fn record(&mut self, entry: BudgetEntry) -> Result<(), FinanceError> {
        if !entry.amount.is_finite() {
            return Err(FinanceError::invalid_input(format!(
                "amount must be finite, got {}",
                entry.amount
            )));
        }
        let period = entry.period.trim();
        let category = entry.category.trim();
        if period.is_empty() || category.is_empty() {
            return Err(FinanceError::invalid_input(
                "period and category must not be empty",
            ));
        }

        let spend = self.periods.entry(period.to_string()).or_default();
        spend.actual += entry.amount;
        *spend.categories.entry(category.to_string()).or_insert(0.0) += entry.amount;
        self.total_actual += entry.amount;
        Ok(())
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Total recorded spend.
    pub fn total_actual(&self) -> f64 {
        self.total_actual
    }

    /// Variance against `initial_budget`; `None` unless the budget is positive.
    pub fn variance(&self, initial_budget: f64) -> Option<BudgetVariance> {
        if !(initial_budget.is_finite() && initial_budget > 0.0) {
            return None;
        }
        let amount = initial_budget - self.total_actual;
        Some(BudgetVariance {
            amount,
            percentage: amount / initial_budget * 100.0,
        })
    }

    /// Least-squares trend of per-period spend, evaluated at the next
    /// [`FORECAST_PERIODS`] period indices.
    pub fn forecast(&self) -> Option<Vec<f64>> {
        if self.periods.len() < 2 {
            return None;
        }
        let ys: Vec<f64> = self.periods.values().map(|p| p.actual).collect();
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        let fit = LinearFit::fit(&xs, &ys)?;
        Some(
            (ys.len()..ys.len() + FORECAST_PERIODS)
                .map(|i| fit.predict(i as f64))
                .collect(),
        )
    }

    /// Summarise spend by category, variance and forecast.
    ///
    /// # Errors
    ///
    /// [`FinanceError::EmptyLedger`] when nothing has been recorded.
    pub fn analyze(&self, initial_budget: Option<f64>) -> Result<BudgetAnalysis, FinanceError> {
        if self.is_empty() {
            return Err(FinanceError::EmptyLedger);
        }

        let mut category_analysis: BTreeMap<String, CategoryAnalysis> = BTreeMap::new();
        for (period, spend) in &self.periods {
            for (category, &amount) in &spend.categories {
                let analysis = category_analysis
                    .entry(category.clone())
                    .or_insert_with(|| CategoryAnalysis {
                        total: 0.0,
                        percentage: None,
                        periods: BTreeMap::new(),
                    });
                analysis.total += amount;
                analysis.periods.insert(period.clone(), amount);
            }
        }
        if self.total_actual != 0.0 {
            for analysis in category_analysis.values_mut() {
                analysis.percentage = Some(analysis.total / self.total_actual * 100.0);
            }
        }

        Ok(BudgetAnalysis {
            total_budget: initial_budget,
            total_actual: self.total_actual,
            variance: initial_budget.and_then(|b| self.variance(b)),
            category_analysis,
            periods: self.periods.keys().cloned().collect(),
            forecast: self.forecast(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(period: &str, category: &str, amount: f64) -> BudgetEntry {
        BudgetEntry {
            period: period.to_string(),
            category: category.to_string(),
            amount,
            description: None,
        }
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(BudgetLedger::new().analyze(None), Err(FinanceError::EmptyLedger));
    }

    #[test]
    fn test_category_breakdown() {
        let ledger = BudgetLedger::from_entries([
            entry("2025-02", "labour", 300.0),
            entry("2025-01", "labour", 100.0),
            entry("2025-01", "hardware", 100.0),
        ])
        .unwrap();
        let analysis = ledger.analyze(None).unwrap();

        assert_eq!(analysis.periods, vec!["2025-01", "2025-02"]);
        assert_eq!(analysis.total_actual, 500.0);
        assert!(analysis.variance.is_none());

        let labour = &analysis.category_analysis["labour"];
        assert_eq!(labour.total, 400.0);
        assert_relative_eq!(labour.percentage.unwrap(), 80.0, epsilon = 1e-12);
        assert_eq!(labour.periods["2025-01"], 100.0);
        assert_eq!(labour.periods["2025-02"], 300.0);

        let hardware = &analysis.category_analysis["hardware"];
        assert_relative_eq!(hardware.percentage.unwrap(), 20.0, epsilon = 1e-12);
        assert!(!hardware.periods.contains_key("2025-02"));
    }

    #[test]
    fn test_linear_forecast() {
        let ledger =
            BudgetLedger::from_entries([entry("p1", "ops", 100.0), entry("p2", "ops", 200.0)])
                .unwrap();
        let forecast = ledger.forecast().unwrap();
        assert_eq!(forecast.len(), 3);
        assert_relative_eq!(forecast[0], 300.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[1], 400.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[2], 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_period_has_no_forecast() {
        let ledger = BudgetLedger::from_entries([entry("p1", "ops", 100.0)]).unwrap();
        assert!(ledger.analyze(None).unwrap().forecast.is_none());
    }

    #[test]
    fn test_variance() {
        let ledger = BudgetLedger::from_entries([entry("p1", "ops", 1200.0)]).unwrap();
        let variance = ledger.variance(1000.0).unwrap();
        assert_eq!(variance.amount, -200.0);
        assert_relative_eq!(variance.percentage, -20.0, epsilon = 1e-12);
        assert!(ledger.variance(0.0).is_none());
    }

    #[test]
    fn test_refunds_netting_to_zero() {
        let ledger =
            BudgetLedger::from_entries([entry("p1", "ops", 50.0), entry("p1", "ops", -50.0)])
                .unwrap();
        let analysis = ledger.analyze(Some(100.0)).unwrap();
        assert_eq!(analysis.total_actual, 0.0);
        assert!(analysis.category_analysis["ops"].percentage.is_none());
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let mut ledger = BudgetLedger::new();
        assert!(ledger.record(entry("p1", "ops", f64::NAN)).is_err());
        assert!(ledger.record(entry("  ", "ops", 1.0)).is_err());
        assert!(ledger.record(entry("p1", "", 1.0)).is_err());
        assert!(ledger.is_empty());
    }
}
