//! Period-by-period amortization engine

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::payment::monthly_payment;
use super::schedule::{PaymentPeriod, Schedule};
use super::state::AmortizationState;
use crate::error::ComputationError;
use crate::loan::{ExtraPaymentPolicy, LoanTerms};

/// Payment cadence of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCadence {
    /// 12 payments per year of the level monthly amount
    Monthly,
    /// 26 payments per year of half the monthly amount
    BiWeekly,
}

impl PaymentCadence {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentCadence::Monthly => 12,
            PaymentCadence::BiWeekly => 26,
        }
    }
}

/// Configuration for a schedule run
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub cadence: PaymentCadence,

    /// Optional extra principal policy
    pub extra_payment: Option<ExtraPaymentPolicy>,

    /// Override for the level payment (None = derived from the loan terms)
    pub payment_override: Option<f64>,

    /// Iteration cap as a multiple of the contractual period count
    pub cap_multiplier: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cadence: PaymentCadence::Monthly,
            extra_payment: None,
            payment_override: None,
            cap_multiplier: 2,
        }
    }
}

impl ScheduleConfig {
    pub fn with_extra_payment(extra_payment: Option<ExtraPaymentPolicy>) -> Self {
        Self {
            extra_payment,
            ..Default::default()
        }
    }

    pub fn bi_weekly() -> Self {
        Self {
            cadence: PaymentCadence::BiWeekly,
            ..Default::default()
        }
    }
}

/// Residual balance treated as fully repaid; scales with principal so float
/// drift over hundreds of periods never produces a spurious extra period.
pub fn payoff_tolerance(principal: f64) -> f64 {
    (principal.abs() * 1e-10).max(1e-7)
}

/// Main amortization engine
pub struct AmortizationEngine {
    config: ScheduleConfig,
}

impl AmortizationEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Level payment for the configured cadence
    pub fn base_payment(&self, terms: &LoanTerms) -> Result<f64, ComputationError> {
        if let Some(payment) = self.config.payment_override {
            if !payment.is_finite() {
                return Err(ComputationError::NonFiniteInput { field: "payment" });
            }
            return Ok(payment);
        }
        match self.config.cadence {
            PaymentCadence::Monthly => monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_years),
            // Half the monthly payment, 26 times a year: 13 monthly payments' worth
            PaymentCadence::BiWeekly => {
                Ok(monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_years)? / 2.0)
            }
        }
    }

    /// Principal share of the first payment.
    ///
    /// For the contractual level payment this is `P·r / ((1+r)^n - 1)` in closed
    /// form; `M - P·r` cancels to noise once `(1+r)^n` is large.
    fn first_scheduled_principal(&self, terms: &LoanTerms, base_payment: f64, rate: f64, periods: f64) -> f64 {
        let level = self.config.payment_override.is_none() && self.config.cadence == PaymentCadence::Monthly;
        if level && rate > 0.0 {
            terms.principal * rate / (periods * rate.ln_1p()).exp_m1()
        } else {
            base_payment - terms.principal * rate
        }
    }

    /// Run the schedule for a loan until the balance is repaid
    pub fn amortize(&self, terms: &LoanTerms) -> Result<Schedule, ComputationError> {
        let periods_per_year = self.config.cadence.periods_per_year();
        let base_payment = self.base_payment(terms)?;
        let rate = terms.periodic_rate(periods_per_year);
        let scheduled_periods = terms.term_periods(periods_per_year);
        let cap = (scheduled_periods * self.config.cap_multiplier as f64).floor().max(1.0) as u32;
        let tolerance = payoff_tolerance(terms.principal);

        let mut schedule = Schedule::new(terms.principal, base_payment, periods_per_year, scheduled_periods);
        let first_principal = self.first_scheduled_principal(terms, base_payment, rate, scheduled_periods);
        let mut state = AmortizationState::new(terms.principal, first_principal);

        while !state.is_paid_off(tolerance) {
            if state.period >= cap {
                warn!(
                    "Schedule for principal {:.2} did not converge within {} periods ({:.2} outstanding)",
                    terms.principal, cap, state.balance
                );
                return Err(ComputationError::NonConvergentSchedule {
                    periods: state.period,
                    remaining_balance: state.balance,
                });
            }

            state.advance_period();
            let row = self.calculate_period(&mut state, rate, tolerance);
            schedule.add_row(row);
        }

        schedule.finish();
        debug!(
            "Amortized {:.2} at {}% over {} years: {} periods, interest {:.2}",
            terms.principal, terms.annual_rate_percent, terms.term_years, schedule.total_periods, schedule.total_interest
        );

        Ok(schedule)
    }

    /// Split one period's payment and update state
    fn calculate_period(
        &self,
        state: &mut AmortizationState,
        rate: f64,
        tolerance: f64,
    ) -> PaymentPeriod {
        let interest = state.balance * rate;
        let scheduled_principal = state.scheduled_principal;

        let mut extra = self
            .config
            .extra_payment
            .map(|policy| policy.amount_for_period(state.period))
            .unwrap_or(0.0);
        let mut principal = scheduled_principal + extra;

        if (principal - state.balance).abs() <= tolerance {
            // Float dust from the closed-form payment is folded into the final period
            principal = state.balance;
        } else if principal > state.balance {
            // Don't overpay: the extra absorbs the difference and goes negative
            // when the level payment alone already exceeds the balance
            principal = state.balance;
            extra = principal - scheduled_principal;
        }

        state.apply_payment(interest, principal);
        state.roll_scheduled_principal(rate, extra);

        PaymentPeriod {
            index: state.period,
            total_payment: interest + principal,
            principal_portion: principal,
            interest_portion: interest,
            extra_portion: extra,
            remaining_balance: state.balance.max(0.0),
            cumulative_interest: state.cumulative_interest,
            cumulative_principal: state.cumulative_principal,
        }
    }
}

/// Monthly amortization schedule with an optional extra-payment policy
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    extra_payment: Option<&ExtraPaymentPolicy>,
) -> Result<Schedule, ComputationError> {
    let engine = AmortizationEngine::new(ScheduleConfig::with_extra_payment(extra_payment.copied()));
    engine.amortize(&LoanTerms::new(principal, annual_rate_percent, years))
}

/// Schedule paying a fixed caller-supplied amount each month
pub fn generate_schedule_with_payment(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    payment: f64,
) -> Result<Schedule, ComputationError> {
    let engine = AmortizationEngine::new(ScheduleConfig {
        payment_override: Some(payment),
        ..Default::default()
    });
    engine.amortize(&LoanTerms::new(principal, annual_rate_percent, years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::ExtraPaymentFrequency;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_schedule() {
        let schedule = generate_schedule(200_000.0, 5.0, 30.0, None).unwrap();

        assert_eq!(schedule.total_periods, 360);
        assert_eq!(schedule.periods.len(), 360);
        assert_abs_diff_eq!(schedule.scheduled_payment, 1073.64, epsilon = 0.01);
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(schedule.total_principal, 200_000.0, epsilon = 1e-2);
        assert_abs_diff_eq!(schedule.periods_saved, 0.0);
        assert_abs_diff_eq!(schedule.interest_saved, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = generate_schedule(100_000.0, 0.0, 10.0, None).unwrap();

        assert_eq!(schedule.total_periods, 120);
        assert_eq!(schedule.total_interest, 0.0);
        assert_abs_diff_eq!(schedule.scheduled_payment, 833.333_333, epsilon = 1e-5);
        assert_abs_diff_eq!(schedule.total_principal, 100_000.0, epsilon = 1e-2);
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_period_rows_reconcile() {
        let schedule = generate_schedule(150_000.0, 5.5, 20.0, None).unwrap();
        let mut previous_balance = 150_000.0;

        for (i, period) in schedule.periods.iter().enumerate() {
            assert_eq!(period.index, i as u32 + 1);
            assert_abs_diff_eq!(
                period.principal_portion + period.interest_portion,
                period.total_payment,
                epsilon = 1e-9
            );
            assert!(period.remaining_balance <= previous_balance);
            assert!(period.interest_portion >= 0.0);
            previous_balance = period.remaining_balance;
        }

        let principal_sum: f64 = schedule.periods.iter().map(|p| p.principal_portion).sum();
        assert_abs_diff_eq!(principal_sum, 150_000.0, epsilon = 1e-2);
    }

    #[test]
    fn test_monthly_extra_payment_accelerates_payoff() {
        let policy = ExtraPaymentPolicy::monthly(200.0);
        let base = generate_schedule(200_000.0, 5.0, 30.0, None).unwrap();
        let accelerated = generate_schedule(200_000.0, 5.0, 30.0, Some(&policy)).unwrap();

        assert!(accelerated.total_periods < base.total_periods);
        assert!(accelerated.total_interest < base.total_interest);
        assert!(accelerated.periods_saved > 0.0);
        assert!(accelerated.interest_saved > 0.0);
        assert_abs_diff_eq!(accelerated.total_principal, 200_000.0, epsilon = 1e-2);
        assert_abs_diff_eq!(accelerated.final_balance(), 0.0, epsilon = 1e-6);

        // Every non-final period carries the full extra
        for period in &accelerated.periods[..accelerated.periods.len() - 1] {
            assert_eq!(period.extra_portion, 200.0);
        }
    }

    #[test]
    fn test_once_extra_payment() {
        let policy = ExtraPaymentPolicy::new(20_000.0, ExtraPaymentFrequency::Once, 12);
        let schedule = generate_schedule(200_000.0, 5.0, 30.0, Some(&policy)).unwrap();

        let with_extra: Vec<u32> = schedule
            .periods
            .iter()
            .filter(|p| p.extra_portion > 0.0)
            .map(|p| p.index)
            .collect();
        assert_eq!(with_extra, vec![12]);
        assert!(schedule.total_periods < 360);
    }

    #[test]
    fn test_yearly_extra_payment() {
        let policy = ExtraPaymentPolicy::new(2_000.0, ExtraPaymentFrequency::Yearly, 1);
        let schedule = generate_schedule(100_000.0, 6.0, 15.0, Some(&policy)).unwrap();

        assert_eq!(schedule.periods[0].extra_portion, 2_000.0);
        assert_eq!(schedule.periods[1].extra_portion, 0.0);
        assert_eq!(schedule.periods[12].extra_portion, 2_000.0);
        assert!(schedule.total_periods < 180);
    }

    #[test]
    fn test_overpayment_clamped_to_balance() {
        // A one-off extra larger than the loan retires it in the first period
        let policy = ExtraPaymentPolicy::new(50_000.0, ExtraPaymentFrequency::Once, 1);
        let schedule = generate_schedule(10_000.0, 6.0, 5.0, Some(&policy)).unwrap();

        assert_eq!(schedule.total_periods, 1);
        let period = schedule.periods[0];
        assert_eq!(period.principal_portion, 10_000.0);
        assert_eq!(period.remaining_balance, 0.0);
        assert_abs_diff_eq!(period.interest_portion, 50.0, epsilon = 1e-9);
        // Extra is recomputed so the record stays consistent
        let scheduled_principal = schedule.scheduled_payment - period.interest_portion;
        assert_abs_diff_eq!(period.extra_portion, 10_000.0 - scheduled_principal, epsilon = 1e-9);
    }

    #[test]
    fn test_final_period_extra_can_be_negative() {
        // Yearly extras leave a final balance smaller than the level principal,
        // so the recomputed extra in the payoff period is negative
        let policy = ExtraPaymentPolicy::new(2_000.0, ExtraPaymentFrequency::Yearly, 1);
        let schedule = generate_schedule(100_000.0, 6.0, 15.0, Some(&policy)).unwrap();
        let last = schedule.periods.last().unwrap();

        assert_eq!(last.remaining_balance, 0.0);
        assert!(last.extra_portion < 0.0);
        assert_abs_diff_eq!(
            last.principal_portion,
            schedule.scheduled_payment - last.interest_portion + last.extra_portion,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_unaccelerated_final_period_has_no_extra() {
        let schedule = generate_schedule(200_000.0, 5.0, 30.0, None).unwrap();
        assert!(schedule.periods.iter().all(|p| p.extra_portion == 0.0));
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let policy = ExtraPaymentPolicy::new(150.0, ExtraPaymentFrequency::Monthly, 6);
        let first = generate_schedule(325_000.0, 6.75, 30.0, Some(&policy)).unwrap();
        let second = generate_schedule(325_000.0, 6.75, 30.0, Some(&policy)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_payment_schedule() {
        let payment = monthly_payment(100_000.0, 5.0, 10.0).unwrap();
        let schedule = generate_schedule_with_payment(100_000.0, 5.0, 10.0, payment).unwrap();
        assert_eq!(schedule.total_periods, 120);
        for period in &schedule.periods {
            assert_abs_diff_eq!(period.total_payment, payment, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_non_convergent_schedule_is_reported() {
        // Payment below the first period's interest never retires the balance
        let result = generate_schedule_with_payment(100_000.0, 12.0, 10.0, 500.0);
        match result {
            Err(ComputationError::NonConvergentSchedule { periods, remaining_balance }) => {
                assert_eq!(periods, 240);
                assert!(remaining_balance > 100_000.0);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_high_rate_long_term_amortizes_on_schedule() {
        for &(rate, years) in &[(100.0, 50.0), (60.0, 50.0), (40.0, 50.0), (47.0, 30.0)] {
            let schedule = generate_schedule(200_000.0, rate, years, None).unwrap();
            let last = schedule.periods.last().unwrap();

            assert_eq!(schedule.total_periods, (years * 12.0) as u32, "{}% over {} years", rate, years);
            assert_eq!(schedule.final_balance(), 0.0);
            assert_eq!(last.extra_portion, 0.0);
            assert_abs_diff_eq!(schedule.total_principal, 200_000.0, epsilon = 1e-2);
            assert_abs_diff_eq!(last.total_payment, schedule.scheduled_payment, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_non_finite_input_fails() {
        assert!(matches!(
            generate_schedule(f64::NAN, 5.0, 30.0, None),
            Err(ComputationError::NonFiniteInput { .. })
        ));
    }
}
