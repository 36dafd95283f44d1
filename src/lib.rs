//! Amortization Engine - payment schedules and loan economics
//!
//! This library provides:
//! - Input validation and the closed-form level payment
//! - Monthly amortization schedules with extra-payment policies
//! - Bi-weekly acceleration plans
//! - Scenario comparison, refinance break-even and escrow aggregation
//! - Tax-adjusted loan composition over an injected tax-rate lookup
//! - Batch scenario evaluation and CSV reports

pub mod error;
pub mod loan;
pub mod amortization;
pub mod analysis;
pub mod tax;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{ComputationError, ValidationError};
pub use loan::{ExtraPaymentFrequency, ExtraPaymentPolicy, LoanScenario, LoanTerms};
pub use amortization::{bi_weekly_plan, generate_schedule, monthly_payment, PaymentPeriod, Schedule};
pub use analysis::{compare, refinance, BreakEven, ComparisonResult, RefinanceAssessment};
pub use tax::{compose_loan, LoanRequest, StaticTaxTable, TaxRateLookup};
pub use scenario::ScenarioRunner;
