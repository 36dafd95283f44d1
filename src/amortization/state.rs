//! Running state of a loan while its schedule is generated

/// Balance and accumulators at a point in the schedule
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current period (1-based once advanced; 0 before the first payment)
    pub period: u32,

    /// Outstanding balance before this period's payment
    pub balance: f64,

    /// Principal share of the level payment this period, before extras
    pub scheduled_principal: f64,

    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
}

impl AmortizationState {
    /// Initialize state at origination
    pub fn new(principal: f64, first_scheduled_principal: f64) -> Self {
        Self {
            period: 0,
            balance: principal,
            scheduled_principal: first_scheduled_principal,
            cumulative_interest: 0.0,
            cumulative_principal: 0.0,
        }
    }

    /// Advance to the next period
    pub fn advance_period(&mut self) {
        self.period += 1;
    }

    /// Apply one period's payment split
    pub fn apply_payment(&mut self, interest: f64, principal: f64) {
        self.balance -= principal;
        self.cumulative_interest += interest;
        self.cumulative_principal += principal;
    }

    /// Roll the level principal share forward one period.
    ///
    /// With a level payment `M`, `p(k+1) = M - B(k)·r = p(k)(1+r) + e(k)·r`
    /// where `e(k)` is the extra applied in period `k`.
    pub fn roll_scheduled_principal(&mut self, rate: f64, extra: f64) {
        self.scheduled_principal = self.scheduled_principal * (1.0 + rate) + extra * rate;
    }

    /// Whether the loan is fully repaid
    pub fn is_paid_off(&self, tolerance: f64) -> bool {
        self.balance <= tolerance
    }
}
