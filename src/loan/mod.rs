//! Loan terms, extra-payment policies, validation and scenario loading

mod terms;
mod validate;
pub mod loader;

pub use terms::{ExtraPaymentFrequency, ExtraPaymentPolicy, LoanScenario, LoanTerms};
pub use validate::{
    validate, OptionalCosts, ValidationReport, MAX_ANNUAL_RATE_PERCENT, MAX_PRINCIPAL, MAX_TERM_YEARS,
};
pub use loader::{load_scenarios, load_scenarios_from_reader};
