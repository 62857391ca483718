//! Investment metrics over a series of periodic cash flows.
//!
//! Period 0 holds the initial investment as an outflow; `cash_flows[t - 1]`
//! is the net inflow at the end of period `t`.
//!
//! ```text
//! ROI     = (Σ CF_t − I) / I · 100
//! NPV(r)  = −I + Σ CF_t / (1 + r)^t
//! IRR     = r such that NPV(r) = 0
//! Payback = (t − 1) + deficit_{t−1} / CF_t    for the first t with cumulative ≥ 0
//! ```

use crate::error::FinanceError;
use econ_core::math::solvers::{BrentSolver, SolverConfig};
use serde::{Deserialize, Serialize};

/// Lowest rate (as a fraction) scanned when bracketing the IRR.
pub const IRR_SCAN_LOWER: f64 = -0.99;
/// Highest rate (as a fraction) scanned when bracketing the IRR.
pub const IRR_SCAN_UPPER: f64 = 10.0;
/// Grid intervals used by the IRR bracket scan.
pub const IRR_SCAN_STEPS: usize = 1000;

/// Investment and projected returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInput {
    /// Up-front outlay (non-negative)
    pub initial_investment: f64,
    /// Net inflow per period, periods 1..=N
    pub cash_flows: Vec<f64>,
    /// Discount rate in percent
    pub discount_rate: f64,
}

/// Echo of the inputs behind a [`FinancialMetrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialDetails {
    /// Initial investment
    pub total_investment: f64,
    /// Sum of all cash flows
    pub total_returns: f64,
    /// Discount rate in percent
    pub discount_rate: f64,
}

/// Computed investment metrics.
///
/// Metrics that are undefined for the given series are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Return on investment in percent; `None` for a zero investment
    pub roi: Option<f64>,
    /// Net present value at the discount rate
    pub npv: f64,
    /// Internal rate of return in percent
    pub irr: Option<f64>,
    /// Periods until the investment is recovered
    pub payback_period: Option<f64>,
    /// Input echo
    pub details: FinancialDetails,
}

/// Calculator for ROI, NPV, IRR and payback period.
#[derive(Debug, Clone)]
pub struct FinancialMetricsCalculator {
    solver: BrentSolver<f64>,
}

impl Default for FinancialMetricsCalculator {
    fn default() -> Self {
        Self {
            solver: BrentSolver::with_defaults(),
        }
    }
}

impl FinancialMetricsCalculator {
    /// Create a calculator whose IRR search uses `config`.
    pub fn new(config: SolverConfig<f64>) -> Self {
        Self {
            solver: BrentSolver::new(config),
        }
    }

    /// Return on investment in percent.
    ///
    /// # Errors
    ///
    /// [`FinanceError::InvalidInput`] when the investment is zero or either
    /// argument is not finite.
    pub fn roi(&self, initial_investment: f64, total_returns: f64) -> Result<f64, FinanceError> {
        if !initial_investment.is_finite() || !total_returns.is_finite() {
            return Err(FinanceError::invalid_input("ROI arguments must be finite"));
        }
        if initial_investment == 0.0 {
            return Err(FinanceError::invalid_input(
                "ROI is undefined for a zero investment",
            ));
        }
        Ok((total_returns - initial_investment) / initial_investment * 100.0)
    }

    /// Net present value at a discount rate given in percent.
    pub fn npv(&self, initial_investment: f64, cash_flows: &[f64], discount_rate: f64) -> f64 {
        npv_at_fraction(initial_investment, cash_flows, discount_rate / 100.0)
    }

    /// Internal rate of return in percent.
    ///
    /// Scans rates from −99 % to 1000 % for a sign change of the NPV and
    /// refines it with Brent's method. Returns `None` when the series never
    /// changes sign, no bracket is found, or the solver does not converge.
    pub fn irr(&self, initial_investment: f64, cash_flows: &[f64]) -> Option<f64> {
        let has_outflow = initial_investment > 0.0 || cash_flows.iter().any(|&cf| cf < 0.0);
        let has_inflow = initial_investment < 0.0 || cash_flows.iter().any(|&cf| cf > 0.0);
        if !has_outflow || !has_inflow {
            return None;
        }

        let npv = |rate: f64| npv_at_fraction(initial_investment, cash_flows, rate);
        let (lo, hi) =
            self.solver
                .find_bracket(npv, IRR_SCAN_LOWER, IRR_SCAN_UPPER, IRR_SCAN_STEPS)?;
        if lo == hi {
            return Some(lo * 100.0);
        }

        match self.solver.find_root(npv, lo, hi) {
            Ok(rate) => Some(rate * 100.0),
            Err(err) => {
                tracing::debug!(error = %err, "IRR solver did not converge");
                None
            }
        }
    }

    /// Periods until cumulative cash flow recovers the investment.
    ///
    /// Interpolates linearly within the recovering period. `None` if the
    /// cumulative position never gets back to zero, including a zero
    /// investment followed by losses.
    pub fn payback_period(&self, initial_investment: f64, cash_flows: &[f64]) -> Option<f64> {
        let mut cumulative = -initial_investment;
        for (i, &cf) in cash_flows.iter().enumerate() {
            let before = cumulative;
            cumulative += cf;
            if cumulative >= 0.0 {
                // before < 0 implies cf > 0 here
                let fraction = if before < 0.0 { -before / cf } else { 0.0 };
                return Some(i as f64 + fraction);
            }
        }
        None
    }

    /// Validate the input and compute every metric.
    ///
    /// # Errors
    ///
    /// * [`FinanceError::InvalidInput`] - negative or non-finite investment,
    ///   non-finite cash flow or discount rate, or discount rate ≤ −100 %
    /// * [`FinanceError::EmptyInput`] - no cash flows
    ///
    /// # Examples
    ///
    /// ```
    /// use econ_finance::{FinancialInput, FinancialMetricsCalculator};
    ///
    /// let metrics = FinancialMetricsCalculator::default()
    ///     .compute(&FinancialInput {
    ///         initial_investment: 1000.0,
    ///         cash_flows: vec![300.0; 5],
    ///         discount_rate: 10.0,
    ///     })
    ///     .unwrap();
    /// assert!((metrics.roi.unwrap() - 50.0).abs() < 1e-9);
    /// assert!((metrics.npv - 137.24).abs() < 0.01);
    /// ```
    pub fn compute(&self, input: &FinancialInput) -> Result<FinancialMetrics, FinanceError> {
        validate(input)?;

        let investment = input.initial_investment;
        let flows = &input.cash_flows;
        let total_returns: f64 = flows.iter().sum();

        let roi = if investment == 0.0 {
            None
        } else {
            Some(self.roi(investment, total_returns)?)
        };

        Ok(FinancialMetrics {
            roi,
            npv: self.npv(investment, flows, input.discount_rate),
            irr: self.irr(investment, flows),
            payback_period: self.payback_period(investment, flows),
            details: FinancialDetails {
                total_investment: investment,
                total_returns,
                discount_rate: input.discount_rate,
            },
        })
    }
}

fn npv_at_fraction(initial_investment: f64, cash_flows: &[f64], rate: f64) -> f64 {
    let growth = 1.0 + rate;
    let mut discount = 1.0;
    let mut pv = -initial_investment;
    for &cf in cash_flows {
        discount *= growth;
        pv += cf / discount;
    }
    pv
}

fn validate(input: &FinancialInput) -> Result<(), FinanceError> {
    if !input.initial_investment.is_finite() || input.initial_investment < 0.0 {
        return Err(FinanceError::invalid_input(format!(
            "initial investment must be a non-negative finite number, got {}",
            input.initial_investment
        )));
    }
    if input.cash_flows.is_empty() {
        return Err(FinanceError::empty_input("at least one cash flow is required"));
    }
    if let Some((t, cf)) = input
        .cash_flows
        .iter()
        .enumerate()
        .find(|(_, cf)| !cf.is_finite())
    {
        return Err(FinanceError::invalid_input(format!(
            "cash flow for period {} is not finite: {}",
            t + 1,
            cf
        )));
    }
    if !input.discount_rate.is_finite() || input.discount_rate <= -100.0 {
        return Err(FinanceError::invalid_input(format!(
            "discount rate must be finite and above -100%, got {}",
            input.discount_rate
        )));
    }
    Ok(())
}
