//! Closed-form level payment for a fixed-rate amortizing loan
//!
//! Every component that needs a payment amount goes through these functions.

use crate::error::ComputationError;

/// Payments per year for the standard monthly cadence
pub const MONTHS_PER_YEAR: u32 = 12;

fn ensure_finite(value: f64, field: &'static str) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFiniteInput { field })
    }
}

/// Level payment retiring `principal` over `years` with `periods_per_year` payments.
///
/// Uses the annuity formula `P * r(1+r)^n / ((1+r)^n - 1)` where `r` is the
/// periodic rate and `n` the period count. A zero rate amortizes linearly.
pub fn periodic_payment(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    periods_per_year: u32,
) -> Result<f64, ComputationError> {
    let principal = ensure_finite(principal, "principal")?;
    let annual_rate_percent = ensure_finite(annual_rate_percent, "annual_rate")?;
    let years = ensure_finite(years, "years")?;

    let rate = annual_rate_percent / 100.0 / periods_per_year as f64;
    let periods = years * periods_per_year as f64;

    if annual_rate_percent == 0.0 {
        return Ok(principal / periods);
    }

    let growth = (1.0 + rate).powf(periods);
    Ok(principal * (rate * growth) / (growth - 1.0))
}

/// Monthly principal-and-interest payment
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: f64) -> Result<f64, ComputationError> {
    periodic_payment(principal, annual_rate_percent, years, MONTHS_PER_YEAR)
}

/// Total paid over the full scheduled term at a level monthly payment
pub fn total_paid(monthly_payment: f64, years: f64) -> f64 {
    monthly_payment * years * MONTHS_PER_YEAR as f64
}

/// Interest component of a lifetime total
pub fn total_interest(total_paid: f64, principal: f64) -> f64 {
    total_paid - principal
}
