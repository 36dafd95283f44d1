//! Side-by-side comparison of two loan scenarios

use serde::{Deserialize, Serialize};

use crate::amortization::{generate_schedule, monthly_payment, Schedule};
use crate::error::ComputationError;
use crate::loan::LoanScenario;

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: LoanScenario,
    pub monthly_payment: f64,
    pub schedule: Schedule,
}

impl ScenarioOutcome {
    /// Run the schedule for a scenario
    pub fn evaluate(scenario: &LoanScenario) -> Result<Self, ComputationError> {
        let terms = &scenario.terms;
        let schedule = generate_schedule(
            terms.principal,
            terms.annual_rate_percent,
            terms.term_years,
            scenario.extra_payment.as_ref(),
        )?;
        Ok(Self {
            scenario: scenario.clone(),
            monthly_payment: monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_years)?,
            schedule,
        })
    }
}

/// Absolute differences between two scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDifference {
    pub payment_difference: f64,
    pub interest_difference: f64,
    /// Difference in number of periods
    pub time_difference: u32,
    pub total_cost_difference: f64,
}

/// Result of comparing loan A against loan B
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub loan_a: ScenarioOutcome,
    pub loan_b: ScenarioOutcome,
    pub difference: ScenarioDifference,
}

/// Compare two scenarios; differences are symmetric magnitudes
pub fn compare(loan_a: &LoanScenario, loan_b: &LoanScenario) -> Result<ComparisonResult, ComputationError> {
    let a = ScenarioOutcome::evaluate(loan_a)?;
    let b = ScenarioOutcome::evaluate(loan_b)?;

    let difference = ScenarioDifference {
        payment_difference: (a.monthly_payment - b.monthly_payment).abs(),
        interest_difference: (a.schedule.total_interest - b.schedule.total_interest).abs(),
        time_difference: a.schedule.total_periods.abs_diff(b.schedule.total_periods),
        total_cost_difference: (a.schedule.total_paid - b.schedule.total_paid).abs(),
    };

    Ok(ComparisonResult {
        loan_a: a,
        loan_b: b,
        difference,
    })
}
