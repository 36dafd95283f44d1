//! Escrow items and total monthly housing obligation

use serde::{Deserialize, Serialize};

use crate::amortization::monthly_payment;
use crate::error::ComputationError;
use crate::loan::LoanTerms;

/// Annual PMI premium as a percent of the loan amount
pub const DEFAULT_PMI_RATE_PERCENT: f64 = 0.5;

/// LTV at or below which PMI is not charged (20% equity)
pub const PMI_LTV_THRESHOLD: f64 = 80.0;

/// Costs paid on top of principal and interest
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EscrowCosts {
    #[serde(default)]
    pub property_tax_annual: f64,
    #[serde(default)]
    pub home_insurance_annual: f64,
    #[serde(default)]
    pub pmi_monthly: f64,
    #[serde(default)]
    pub hoa_monthly: f64,
}

/// Breakdown of the monthly obligation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyObligation {
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub pmi: f64,
    pub hoa_fees: f64,
    pub total: f64,
}

/// Loan-to-value as a percentage
pub fn loan_to_value(home_price: f64, down_payment: f64) -> Result<f64, ComputationError> {
    if !home_price.is_finite() {
        return Err(ComputationError::NonFiniteInput { field: "home_price" });
    }
    if !down_payment.is_finite() {
        return Err(ComputationError::NonFiniteInput { field: "down_payment" });
    }
    if home_price <= 0.0 {
        return Err(ComputationError::InvalidInput("home price must be greater than 0".to_string()));
    }
    Ok((home_price - down_payment) / home_price * 100.0)
}

/// Monthly PMI; zero once the LTV is at or below 80%
pub fn pmi(home_price: f64, down_payment: f64, pmi_rate_percent: f64) -> Result<f64, ComputationError> {
    if !pmi_rate_percent.is_finite() {
        return Err(ComputationError::NonFiniteInput { field: "pmi_rate" });
    }
    let ltv = loan_to_value(home_price, down_payment)?;
    if ltv <= PMI_LTV_THRESHOLD {
        return Ok(0.0);
    }
    let loan_amount = home_price - down_payment;
    Ok(loan_amount * (pmi_rate_percent / 100.0) / 12.0)
}

/// Principal and interest plus monthly escrow items
pub fn total_monthly_payment(terms: &LoanTerms, escrow: &EscrowCosts) -> Result<MonthlyObligation, ComputationError> {
    let principal_and_interest = monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_years)?;
    let property_tax = escrow.property_tax_annual / 12.0;
    let home_insurance = escrow.home_insurance_annual / 12.0;

    Ok(MonthlyObligation {
        principal_and_interest,
        property_tax,
        home_insurance,
        pmi: escrow.pmi_monthly,
        hoa_fees: escrow.hoa_monthly,
        total: principal_and_interest + property_tax + home_insurance + escrow.pmi_monthly + escrow.hoa_monthly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pmi_charged_above_eighty_percent_ltv() {
        let monthly = pmi(300_000.0, 30_000.0, DEFAULT_PMI_RATE_PERCENT).unwrap();
        assert!(monthly > 0.0);
        // 270,000 * 0.5% / 12
        assert_abs_diff_eq!(monthly, 112.5, epsilon = 1e-9);
    }

    #[test]
    fn test_pmi_dropped_at_twenty_percent_equity() {
        assert_eq!(pmi(300_000.0, 70_000.0, DEFAULT_PMI_RATE_PERCENT).unwrap(), 0.0);
        // Exactly 80% LTV is not charged
        assert_eq!(pmi(300_000.0, 60_000.0, DEFAULT_PMI_RATE_PERCENT).unwrap(), 0.0);
    }

    #[test]
    fn test_loan_to_value() {
        assert_abs_diff_eq!(loan_to_value(300_000.0, 30_000.0).unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(loan_to_value(300_000.0, 70_000.0).unwrap(), 76.666_666_7, epsilon = 1e-6);
        assert!(matches!(loan_to_value(0.0, 0.0), Err(ComputationError::InvalidInput(_))));
        assert!(matches!(
            loan_to_value(f64::NAN, 0.0),
            Err(ComputationError::NonFiniteInput { field: "home_price" })
        ));
    }

    #[test]
    fn test_total_monthly_payment() {
        let terms = LoanTerms::new(200_000.0, 5.0, 30.0);
        let escrow = EscrowCosts {
            property_tax_annual: 3_600.0,
            home_insurance_annual: 1_200.0,
            pmi_monthly: 75.0,
            hoa_monthly: 50.0,
        };

        let obligation = total_monthly_payment(&terms, &escrow).unwrap();

        assert_abs_diff_eq!(obligation.principal_and_interest, 1073.64, epsilon = 0.01);
        assert_eq!(obligation.property_tax, 300.0);
        assert_eq!(obligation.home_insurance, 100.0);
        assert_abs_diff_eq!(
            obligation.total,
            obligation.principal_and_interest + 300.0 + 100.0 + 75.0 + 50.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_escrow_is_principal_and_interest() {
        let terms = LoanTerms::new(100_000.0, 0.0, 10.0);
        let obligation = total_monthly_payment(&terms, &EscrowCosts::default()).unwrap();
        assert_eq!(obligation.total, obligation.principal_and_interest);
    }
}
