//! Refinance break-even and net savings

use log::debug;
use serde::{Deserialize, Serialize};

use super::compare::ScenarioOutcome;
use crate::error::{ComputationError, ValidationError};
use crate::loan::LoanScenario;

/// Months until payment savings recover the closing costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BreakEven {
    /// Break-even after this many periods (fractional)
    Periods(f64),
    /// The new payment is not lower, so closing costs are never recovered
    Never,
}

impl BreakEven {
    fn from_payments(closing_costs: f64, current_payment: f64, new_payment: f64) -> Self {
        let monthly_savings = current_payment - new_payment;
        if monthly_savings <= 0.0 {
            return BreakEven::Never;
        }
        let periods = closing_costs / monthly_savings;
        if periods.is_finite() && periods >= 0.0 {
            BreakEven::Periods(periods)
        } else {
            BreakEven::Never
        }
    }

    /// Finite period count, if any
    pub fn periods(&self) -> Option<f64> {
        match self {
            BreakEven::Periods(p) => Some(*p),
            BreakEven::Never => None,
        }
    }
}

/// Outcome of a refinance evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinanceAssessment {
    pub current_monthly_payment: f64,
    pub new_monthly_payment: f64,
    pub monthly_savings: f64,

    /// Total paid on the current loan less principal already retired
    pub remaining_cost_of_current: f64,

    /// Total paid on the new loan plus closing costs
    pub new_total_cost: f64,

    /// Net savings; positive means the new loan is cheaper
    pub total_savings: f64,

    pub break_even: BreakEven,
    pub worth_refinancing: bool,
}

/// Evaluate switching from `current` to `new` for a one-time `closing_costs`
pub fn refinance(
    current: &LoanScenario,
    new: &LoanScenario,
    closing_costs: f64,
    periods_already_paid: u32,
) -> Result<RefinanceAssessment, ComputationError> {
    if !closing_costs.is_finite() || closing_costs < 0.0 {
        return Err(ValidationError::InvalidClosingCosts.into());
    }

    let current_outcome = ScenarioOutcome::evaluate(current)?;
    let new_outcome = ScenarioOutcome::evaluate(new)?;

    let principal_already_paid = current_outcome
        .schedule
        .cumulative_principal_through(periods_already_paid);
    let remaining_cost_of_current = current_outcome.schedule.total_paid - principal_already_paid;
    let new_total_cost = new_outcome.schedule.total_paid + closing_costs;
    let total_savings = remaining_cost_of_current - new_total_cost;

    let current_payment = current_outcome.monthly_payment;
    let new_payment = new_outcome.monthly_payment;
    let break_even = BreakEven::from_payments(closing_costs, current_payment, new_payment);

    debug!(
        "Refinance: payment {:.2} -> {:.2}, savings {:.2}, break-even {:?}",
        current_payment, new_payment, total_savings, break_even
    );

    Ok(RefinanceAssessment {
        current_monthly_payment: current_payment,
        new_monthly_payment: new_payment,
        monthly_savings: current_payment - new_payment,
        remaining_cost_of_current,
        new_total_cost,
        total_savings,
        break_even,
        worth_refinancing: total_savings > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{ExtraPaymentPolicy, LoanTerms};
    use approx::assert_abs_diff_eq;

    fn loan(principal: f64, rate: f64, years: f64) -> LoanScenario {
        LoanScenario::new(LoanTerms::new(principal, rate, years))
    }

    #[test]
    fn test_lower_rate_refinance() {
        let current = loan(300_000.0, 7.0, 30.0);
        let new = loan(280_000.0, 5.5, 30.0);

        let result = refinance(&current, &new, 5_000.0, 36).unwrap();

        assert!(result.monthly_savings > 0.0);
        assert!(result.worth_refinancing);
        let periods = result.break_even.periods().expect("finite break-even");
        assert_abs_diff_eq!(periods, 5_000.0 / result.monthly_savings, epsilon = 1e-9);
        assert!(periods > 12.0 && periods < 13.0);
    }

    #[test]
    fn test_principal_already_paid_reduces_remaining_cost() {
        let current = loan(200_000.0, 6.0, 30.0);
        let new = loan(190_000.0, 5.0, 30.0);

        let fresh = refinance(&current, &new, 3_000.0, 0).unwrap();
        let seasoned = refinance(&current, &new, 3_000.0, 60).unwrap();

        assert!(seasoned.remaining_cost_of_current < fresh.remaining_cost_of_current);
        assert_abs_diff_eq!(
            fresh.remaining_cost_of_current - seasoned.remaining_cost_of_current,
            ScenarioOutcome::evaluate(&current).unwrap().schedule.cumulative_principal_through(60),
            epsilon = 1e-6
        );
        assert_eq!(fresh.new_total_cost, seasoned.new_total_cost);
    }

    #[test]
    fn test_equal_payments_never_break_even() {
        // Same level payment; the current loan carries extras so it costs less in total
        let current = loan(200_000.0, 6.0, 30.0).with_extra_payment(ExtraPaymentPolicy::monthly(500.0));
        let new = loan(200_000.0, 6.0, 30.0);

        let result = refinance(&current, &new, 2_000.0, 0).unwrap();
        assert_eq!(result.monthly_savings, 0.0);
        assert_eq!(result.break_even, BreakEven::Never);
        assert!(result.break_even.periods().is_none());
        assert!(!result.worth_refinancing);

        // Reversed, the savings are positive even though break-even is still never
        let result = refinance(&new, &current, 2_000.0, 0).unwrap();
        assert_eq!(result.break_even, BreakEven::Never);
        assert!(result.total_savings > 0.0);
        assert!(result.worth_refinancing);
    }

    #[test]
    fn test_higher_new_payment_never_breaks_even() {
        let current = loan(200_000.0, 6.0, 30.0);
        let new = loan(200_000.0, 5.0, 15.0);

        let result = refinance(&current, &new, 4_000.0, 0).unwrap();
        assert!(result.monthly_savings < 0.0);
        assert_eq!(result.break_even, BreakEven::Never);
        // Shorter term still saves interest overall
        assert!(result.worth_refinancing);
    }

    #[test]
    fn test_zero_closing_costs_break_even_immediately() {
        let result = refinance(&loan(200_000.0, 6.0, 30.0), &loan(200_000.0, 5.0, 30.0), 0.0, 0).unwrap();
        assert_eq!(result.break_even, BreakEven::Periods(0.0));
    }

    #[test]
    fn test_invalid_closing_costs_rejected() {
        let current = loan(200_000.0, 6.0, 30.0);
        let new = loan(200_000.0, 5.0, 30.0);
        assert_eq!(
            refinance(&current, &new, -1.0, 0),
            Err(ComputationError::Validation(ValidationError::InvalidClosingCosts))
        );
        assert!(refinance(&current, &new, f64::NAN, 0).is_err());
    }
}
