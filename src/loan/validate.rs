//! Input validation for loan parameters
//!
//! Rules are checked in a fixed order and the first failure wins:
//! finiteness, sign, upper bounds, then optional cost fields.

use serde::{Deserialize, Serialize};

use super::{ExtraPaymentPolicy, LoanScenario, LoanTerms};
use crate::error::ValidationError;

/// Largest principal accepted (guards against unit confusion, not an economic limit)
pub const MAX_PRINCIPAL: f64 = 100_000_000.0;

/// Largest annual rate accepted, in percent
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

/// Longest term accepted, in years
pub const MAX_TERM_YEARS: f64 = 50.0;

/// Optional cost fields that must be non-negative when supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionalCosts {
    #[serde(default)]
    pub property_tax: f64,
    #[serde(default)]
    pub home_insurance: f64,
    #[serde(default)]
    pub pmi: f64,
    #[serde(default)]
    pub extra_payment: f64,
}

/// Validate loan parameters and optional costs
pub fn validate(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
    costs: &OptionalCosts,
) -> Result<(), ValidationError> {
    if !principal.is_finite() {
        return Err(ValidationError::NotANumber { field: "Loan amount" });
    }
    if !annual_rate_percent.is_finite() {
        return Err(ValidationError::NotANumber { field: "Interest rate" });
    }
    if !term_years.is_finite() {
        return Err(ValidationError::NotANumber { field: "Loan term" });
    }

    if principal <= 0.0 {
        return Err(ValidationError::NonPositivePrincipal);
    }
    if annual_rate_percent < 0.0 {
        return Err(ValidationError::NegativeRate);
    }
    if term_years <= 0.0 {
        return Err(ValidationError::NonPositiveTerm);
    }

    if principal > MAX_PRINCIPAL {
        return Err(ValidationError::PrincipalTooLarge);
    }
    if annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
        return Err(ValidationError::RateTooHigh);
    }
    if term_years > MAX_TERM_YEARS {
        return Err(ValidationError::TermTooLong);
    }

    // NaN compares false against 0.0, so check it explicitly
    let costs_ok = [
        costs.property_tax,
        costs.home_insurance,
        costs.pmi,
        costs.extra_payment,
    ]
    .iter()
    .all(|&c| !c.is_nan() && c >= 0.0);
    if !costs_ok {
        return Err(ValidationError::NegativeCost);
    }

    Ok(())
}

impl LoanTerms {
    /// Validate these terms with no optional costs
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            &OptionalCosts::default(),
        )
    }
}

impl ExtraPaymentPolicy {
    /// Amount must be a non-negative number and the first period 1-based
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_nan() || self.amount < 0.0 {
            return Err(ValidationError::NegativeCost);
        }
        if self.start_period == 0 {
            return Err(ValidationError::InvalidExtraPaymentStart);
        }
        Ok(())
    }
}

impl LoanScenario {
    /// Validate the terms together with the extra-payment policy, if any
    pub fn validate(&self) -> Result<(), ValidationError> {
        let costs = OptionalCosts {
            extra_payment: self.extra_payment.map_or(0.0, |p| p.amount),
            ..Default::default()
        };
        validate(self.terms.principal, self.terms.annual_rate_percent, self.terms.term_years, &costs)?;
        match &self.extra_payment {
            Some(policy) => policy.validate(),
            None => Ok(()),
        }
    }
}

/// Flat `{is_valid, error}` view of a validation outcome, for serialization to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self { is_valid: true, error: None },
            Err(e) => Self { is_valid: false, error: Some(e.to_string()) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(principal: f64, rate: f64, years: f64) -> Result<(), ValidationError> {
        validate(principal, rate, years, &OptionalCosts::default())
    }

    #[test]
    fn test_accepts_valid_inputs() {
        let report = ValidationReport::from(check(200_000.0, 5.0, 30.0));
        assert_eq!(report, ValidationReport { is_valid: true, error: None });
        assert!(check(100_000.0, 0.0, 10.0).is_ok());
        assert!(check(MAX_PRINCIPAL, MAX_ANNUAL_RATE_PERCENT, MAX_TERM_YEARS).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(check(0.0, 5.0, 30.0), Err(ValidationError::NonPositivePrincipal));
        assert_eq!(check(200_000.0, -1.0, 30.0), Err(ValidationError::NegativeRate));
        assert_eq!(check(200_000.0, 5.0, 0.0), Err(ValidationError::NonPositiveTerm));
        assert_eq!(check(200_000_000.0, 5.0, 30.0), Err(ValidationError::PrincipalTooLarge));
        assert_eq!(check(200_000.0, 150.0, 30.0), Err(ValidationError::RateTooHigh));
        assert_eq!(check(200_000.0, 5.0, 60.0), Err(ValidationError::TermTooLong));
    }

    #[test]
    fn test_rejects_non_finite_naming_field() {
        let err = check(f64::INFINITY, 5.0, 30.0).unwrap_err();
        assert_eq!(err.to_string(), "Loan amount must be a valid number");

        let err = check(200_000.0, f64::NAN, 30.0).unwrap_err();
        assert_eq!(err.to_string(), "Interest rate must be a valid number");

        let err = check(200_000.0, 5.0, f64::NEG_INFINITY).unwrap_err();
        assert_eq!(err.to_string(), "Loan term must be a valid number");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Non-finite rate is reported before the non-positive principal
        assert_eq!(
            check(-5.0, f64::NAN, 30.0),
            Err(ValidationError::NotANumber { field: "Interest rate" })
        );
        // Sign checks come before upper bounds
        assert_eq!(check(200_000_000.0, -1.0, 30.0), Err(ValidationError::NegativeRate));
    }

    #[test]
    fn test_rejects_negative_costs() {
        let costs = OptionalCosts { home_insurance: -10.0, ..Default::default() };
        let report = ValidationReport::from(validate(200_000.0, 5.0, 30.0, &costs));
        assert!(!report.is_valid);
        assert_eq!(report.error.as_deref(), Some("Additional costs must be 0 or greater"));

        let costs = OptionalCosts { extra_payment: f64::NAN, ..Default::default() };
        assert_eq!(
            validate(200_000.0, 5.0, 30.0, &costs),
            Err(ValidationError::NegativeCost)
        );
    }

    #[test]
    fn test_scenario_checks_extra_payment() {
        use crate::loan::ExtraPaymentFrequency;

        let terms = LoanTerms::new(200_000.0, 5.0, 30.0);
        let ok = LoanScenario::new(terms).with_extra_payment(ExtraPaymentPolicy::monthly(100.0));
        assert_eq!(ok.validate(), Ok(()));

        let negative = LoanScenario::new(terms).with_extra_payment(ExtraPaymentPolicy::monthly(-100.0));
        assert_eq!(negative.validate(), Err(ValidationError::NegativeCost));

        let period_zero = LoanScenario::new(terms)
            .with_extra_payment(ExtraPaymentPolicy::new(5_000.0, ExtraPaymentFrequency::Once, 0));
        assert_eq!(period_zero.validate(), Err(ValidationError::InvalidExtraPaymentStart));

        // Terms are checked before the policy
        let bad_terms = LoanScenario::new(LoanTerms::new(200_000.0, 150.0, 30.0))
            .with_extra_payment(ExtraPaymentPolicy::monthly(-1.0));
        assert_eq!(bad_terms.validate(), Err(ValidationError::RateTooHigh));
    }
}
