//! Bi-weekly accelerated payment plan
//!
//! Half the monthly payment every two weeks gives 26 half-payments a year,
//! i.e. 13 monthly payments instead of 12. Interest accrues at rate / 26.

use serde::{Deserialize, Serialize};

use super::engine::{AmortizationEngine, ScheduleConfig};
use super::payment::{monthly_payment, total_interest, total_paid};
use super::schedule::Schedule;
use crate::error::ComputationError;
use crate::loan::LoanTerms;

/// Bi-weekly figures against the equivalent monthly loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    pub monthly_payment: f64,

    /// Lifetime interest of the monthly loan over its full term
    pub monthly_total_interest: f64,

    pub interest_saved: f64,

    /// Years shaved off the contractual term
    pub time_saved_years: f64,
}

/// Result of a bi-weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiWeeklyPlan {
    pub bi_weekly_payment: f64,
    pub total_payments: u32,
    pub years_to_payoff: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub compared_to_monthly: MonthlyComparison,

    /// Full bi-weekly table
    pub schedule: Schedule,
}

/// Build the bi-weekly plan for a loan
pub fn bi_weekly_plan(principal: f64, annual_rate_percent: f64, years: f64) -> Result<BiWeeklyPlan, ComputationError> {
    let terms = LoanTerms::new(principal, annual_rate_percent, years);
    let monthly = monthly_payment(principal, annual_rate_percent, years)?;

    let schedule = AmortizationEngine::new(ScheduleConfig::bi_weekly()).amortize(&terms)?;
    let years_to_payoff = schedule.payoff_years();

    let monthly_total_interest = total_interest(total_paid(monthly, years), principal);

    Ok(BiWeeklyPlan {
        bi_weekly_payment: schedule.scheduled_payment,
        total_payments: schedule.total_periods,
        years_to_payoff,
        total_interest: schedule.total_interest,
        total_paid: schedule.total_paid,
        compared_to_monthly: MonthlyComparison {
            monthly_payment: monthly,
            monthly_total_interest,
            interest_saved: monthly_total_interest - schedule.total_interest,
            time_saved_years: years - years_to_payoff,
        },
        schedule,
    })
}
