//! Amortization engine: payment formula, schedule generation and bi-weekly plans

mod payment;
mod state;
mod engine;
mod schedule;
mod biweekly;
pub mod calendar;

pub use payment::{monthly_payment, periodic_payment, total_interest, total_paid, MONTHS_PER_YEAR};
pub use state::AmortizationState;
pub use engine::{
    generate_schedule, generate_schedule_with_payment, payoff_tolerance, AmortizationEngine, PaymentCadence,
    ScheduleConfig,
};
pub use schedule::{PaymentPeriod, Schedule};
pub use biweekly::{bi_weekly_plan, BiWeeklyPlan, MonthlyComparison};
