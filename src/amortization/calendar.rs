//! Calendar due dates for schedule periods

use chrono::{Days, Months, NaiveDate};

use super::engine::PaymentCadence;
use super::schedule::Schedule;
use crate::error::ComputationError;

/// Due date of `period` (1-based) given the first payment date.
///
/// Monthly dates are offset from the first date rather than chained, so a
/// loan first due on the 31st falls back to month-end and returns to the 31st.
pub fn due_date(first_payment: NaiveDate, period: u32, cadence: PaymentCadence) -> Result<NaiveDate, ComputationError> {
    let offset = period.saturating_sub(1);
    let date = match cadence {
        PaymentCadence::Monthly => first_payment.checked_add_months(Months::new(offset)),
        PaymentCadence::BiWeekly => first_payment.checked_add_days(Days::new(14 * offset as u64)),
    };
    date.ok_or_else(|| ComputationError::InvalidInput(format!("Due date for period {} overflowed", period)))
}

fn cadence_of(schedule: &Schedule) -> PaymentCadence {
    if schedule.periods_per_year == PaymentCadence::BiWeekly.periods_per_year() {
        PaymentCadence::BiWeekly
    } else {
        PaymentCadence::Monthly
    }
}

/// Due dates for every period of a schedule
pub fn payment_dates(schedule: &Schedule, first_payment: NaiveDate) -> Result<Vec<NaiveDate>, ComputationError> {
    let cadence = cadence_of(schedule);
    schedule
        .periods
        .iter()
        .map(|p| due_date(first_payment, p.index, cadence))
        .collect()
}

/// Date of the final payment (None for an empty schedule)
pub fn payoff_date(schedule: &Schedule, first_payment: NaiveDate) -> Result<Option<NaiveDate>, ComputationError> {
    match schedule.periods.last() {
        Some(last) => due_date(first_payment, last.index, cadence_of(schedule)).map(Some),
        None => Ok(None),
    }
}
