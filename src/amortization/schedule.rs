//! Amortization table structures

use serde::{Deserialize, Serialize};

/// One row of the amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// Period number (1-based)
    pub index: u32,

    /// Interest plus principal (including any extra) paid this period
    pub total_payment: f64,

    /// Principal retired this period, extra payment included
    pub principal_portion: f64,

    pub interest_portion: f64,

    /// Extra principal applied this period. Can be negative in a final
    /// period where the level payment alone exceeds the remaining balance.
    pub extra_portion: f64,

    /// Balance after this period's payment, floored at 0
    pub remaining_balance: f64,

    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
}

/// Complete amortization schedule with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Financed principal the schedule starts from
    pub principal: f64,

    /// Level payment before extras
    pub scheduled_payment: f64,

    /// Payment cadence (12 = monthly, 26 = bi-weekly)
    pub periods_per_year: u32,

    /// Contractual number of periods (years x periods per year)
    pub scheduled_periods: f64,

    /// Period rows in order
    pub periods: Vec<PaymentPeriod>,

    pub total_periods: u32,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_paid: f64,

    /// Contractual periods minus actual periods
    pub periods_saved: f64,

    /// Interest of the unaccelerated loan minus actual interest
    pub interest_saved: f64,
}

impl Schedule {
    pub fn new(principal: f64, scheduled_payment: f64, periods_per_year: u32, scheduled_periods: f64) -> Self {
        Self {
            principal,
            scheduled_payment,
            periods_per_year,
            scheduled_periods,
            periods: Vec::new(),
            total_periods: 0,
            total_interest: 0.0,
            total_principal: 0.0,
            total_paid: 0.0,
            periods_saved: 0.0,
            interest_saved: 0.0,
        }
    }

    /// Append a period row and roll the totals forward
    pub fn add_row(&mut self, row: PaymentPeriod) {
        self.total_periods += 1;
        self.total_interest += row.interest_portion;
        self.total_principal += row.principal_portion;
        self.total_paid = self.total_interest + self.total_principal;
        self.periods.push(row);
    }

    /// Compute the acceleration figures once all rows are in
    pub(crate) fn finish(&mut self) {
        self.periods_saved = self.scheduled_periods - self.total_periods as f64;
        let unaccelerated_interest = self.scheduled_payment * self.scheduled_periods - self.principal;
        self.interest_saved = unaccelerated_interest - self.total_interest;
    }

    /// Balance after the last period (0 for a fully amortized schedule)
    pub fn final_balance(&self) -> f64 {
        self.periods.last().map(|p| p.remaining_balance).unwrap_or(self.principal)
    }

    /// Cumulative principal paid through `period` (1-based); 0 for period 0
    /// and the schedule total once `period` runs past the payoff.
    pub fn cumulative_principal_through(&self, period: u32) -> f64 {
        if period == 0 {
            return 0.0;
        }
        self.periods
            .get(period as usize - 1)
            .or_else(|| self.periods.last())
            .map(|p| p.cumulative_principal)
            .unwrap_or(0.0)
    }

    /// Time to payoff in years
    pub fn payoff_years(&self) -> f64 {
        self.total_periods as f64 / self.periods_per_year as f64
    }
}
