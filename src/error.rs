//! Error types for validation, computation, tax lookup and scenario loading

use thiserror::Error;

/// Structured rejection of loan parameters, reported before any computation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A numeric field was NaN or infinite
    #[error("{field} must be a valid number")]
    NotANumber { field: &'static str },

    /// Principal was zero or negative
    #[error("Loan amount must be greater than 0")]
    NonPositivePrincipal,

    /// Annual rate was negative
    #[error("Interest rate must be 0 or greater")]
    NegativeRate,

    /// Term was zero or negative
    #[error("Loan term must be greater than 0")]
    NonPositiveTerm,

    #[error("Loan amount seems too large")]
    PrincipalTooLarge,

    #[error("Interest rate seems too high")]
    RateTooHigh,

    #[error("Loan term seems too long")]
    TermTooLong,

    /// One of the optional cost fields (tax, insurance, PMI, extra payment) was negative
    #[error("Additional costs must be 0 or greater")]
    NegativeCost,

    /// Extra-payment policy starting before the first period
    #[error("Extra payment start period must be 1 or greater")]
    InvalidExtraPaymentStart,

    /// Closing costs passed to a refinance evaluation were negative or not finite
    #[error("Closing costs must be a finite amount of 0 or greater")]
    InvalidClosingCosts,
}

/// Failure inside a formula or iteration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    /// A formula received a NaN or infinite argument (caller bypassed validation)
    #[error("Invalid input: {field} must be a finite number")]
    NonFiniteInput { field: &'static str },

    /// Arguments are finite but cannot be evaluated (e.g. zero home price)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The iteration cap was reached with a balance still outstanding
    #[error("Schedule did not converge: balance of {remaining_balance:.2} left after {periods} periods")]
    NonConvergentSchedule { periods: u32, remaining_balance: f64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failure reported by a tax-rate lookup collaborator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaxLookupError {
    #[error("Tax service unavailable: {0}")]
    Unavailable(String),
}

/// Failure while reading loan scenarios
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Failure while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}
