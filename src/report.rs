//! CSV export of schedules and batch summaries

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::amortization::{calendar, Schedule};
use crate::error::ReportError;
use crate::scenario::ScenarioSummary;

/// One CSV row of an amortization table
#[derive(Debug, Serialize)]
struct ScheduleCsvRow {
    period: u32,
    due_date: Option<NaiveDate>,
    payment: f64,
    principal: f64,
    interest: f64,
    extra: f64,
    balance: f64,
    cumulative_interest: f64,
    cumulative_principal: f64,
}

/// Write a schedule as CSV, with due dates when a first payment date is given
pub fn write_schedule_csv<W: Write>(
    schedule: &Schedule,
    first_payment: Option<NaiveDate>,
    writer: W,
) -> Result<(), ReportError> {
    let dates = match first_payment {
        Some(first) => Some(calendar::payment_dates(schedule, first)?),
        None => None,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, period) in schedule.periods.iter().enumerate() {
        csv_writer.serialize(ScheduleCsvRow {
            period: period.index,
            due_date: dates.as_ref().map(|d| d[i]),
            payment: period.total_payment,
            principal: period.principal_portion,
            interest: period.interest_portion,
            extra: period.extra_portion,
            balance: period.remaining_balance,
            cumulative_interest: period.cumulative_interest,
            cumulative_principal: period.cumulative_principal,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write batch summaries as CSV, one row per scenario
pub fn write_summaries_csv<W: Write>(summaries: &[ScenarioSummary], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;
    Ok(())
}
