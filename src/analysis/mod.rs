//! Loan analysis built on the amortization engine
//!
//! - **compare**: two scenarios side by side with absolute differences
//! - **refinance**: net savings and break-even for switching loans
//! - **escrow**: PMI by loan-to-value and the total monthly obligation

mod compare;
mod refinance;
mod escrow;

pub use compare::{compare, ComparisonResult, ScenarioDifference, ScenarioOutcome};
pub use refinance::{refinance, BreakEven, RefinanceAssessment};
pub use escrow::{
    loan_to_value, pmi, total_monthly_payment, EscrowCosts, MonthlyObligation, DEFAULT_PMI_RATE_PERCENT,
    PMI_LTV_THRESHOLD,
};
