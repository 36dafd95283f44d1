//! Scenario runner for batch loan evaluation
//!
//! Scenarios are independent pure computations, so batches fan out across
//! threads with rayon and need no coordination.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{total_monthly_payment, EscrowCosts, ScenarioOutcome};
use crate::error::ComputationError;
use crate::loan::{LoanScenario, LoanTerms};

/// Flat per-scenario figures, one row per scenario in batch reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub monthly_payment: f64,
    /// Principal and interest plus the runner's escrow items
    pub total_monthly_obligation: f64,
    pub total_periods: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub periods_saved: f64,
    pub interest_saved: f64,
}

/// Batch runner sharing one set of escrow costs across scenarios
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new().with_escrow(escrow);
/// let summaries = runner.run_batch(&scenarios);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    escrow: EscrowCosts,
}

impl ScenarioRunner {
    /// Runner with no escrow items
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escrow(mut self, escrow: EscrowCosts) -> Self {
        self.escrow = escrow;
        self
    }

    /// Evaluate a single scenario
    pub fn run(&self, scenario: &LoanScenario) -> Result<ScenarioSummary, ComputationError> {
        scenario.validate()?;
        let outcome = ScenarioOutcome::evaluate(scenario)?;
        let obligation = total_monthly_payment(&scenario.terms, &self.escrow)?;
        let schedule = &outcome.schedule;

        Ok(ScenarioSummary {
            name: scenario.name.clone(),
            principal: scenario.terms.principal,
            annual_rate: scenario.terms.annual_rate_percent,
            years: scenario.terms.term_years,
            monthly_payment: outcome.monthly_payment,
            total_monthly_obligation: obligation.total,
            total_periods: schedule.total_periods,
            total_interest: schedule.total_interest,
            total_paid: schedule.total_paid,
            periods_saved: schedule.periods_saved,
            interest_saved: schedule.interest_saved,
        })
    }

    /// Evaluate many scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<Result<ScenarioSummary, ComputationError>> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Re-run one scenario across a set of annual rates
    pub fn run_rate_sweep(
        &self,
        scenario: &LoanScenario,
        rates: &[f64],
    ) -> Vec<Result<ScenarioSummary, ComputationError>> {
        rates
            .par_iter()
            .map(|&rate| {
                let terms = LoanTerms {
                    annual_rate_percent: rate,
                    ..scenario.terms
                };
                let mut variant = scenario.clone();
                variant.terms = terms;
                variant.name = format!("{}@{}%", scenario.name, rate);
                self.run(&variant)
            })
            .collect()
    }
}
