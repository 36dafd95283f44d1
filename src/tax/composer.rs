//! Loan computation with sales tax folded into the financed principal

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::lookup::{normalize_tax_rate, TaxRateLookup};
use crate::amortization::{generate_schedule, monthly_payment, total_interest, total_paid, Schedule};
use crate::error::ComputationError;

/// Loan request as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    /// Region for the sales-tax lookup (e.g. "WA"); empty skips the lookup
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub include_sales_tax: bool,
}

/// Inputs and resolved tax figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInfo {
    pub principal: f64,
    pub financed_principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    pub region_code: String,
    pub include_sales_tax: bool,
    /// Normalized rate as a fraction
    pub tax_rate: f64,
    pub tax_amount: f64,
    /// Provider of the applied rate, None when no tax was applied
    pub tax_source: Option<String>,
}

/// Closed-form lifetime figures on the financed principal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResults {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetails {
    pub loan_info: LoanInfo,
    pub results: LoanResults,
    pub schedule: Schedule,
}

/// Resolve the tax rate for a request; any lookup failure yields no tax
async fn resolve_tax_rate<L>(request: &LoanRequest, lookup: &L) -> (f64, Option<String>)
where
    L: TaxRateLookup + ?Sized,
{
    if !request.include_sales_tax || request.region_code.trim().is_empty() {
        return (0.0, None);
    }

    match lookup.lookup_region_tax_rate(&request.region_code).await {
        Ok(found) => (normalize_tax_rate(found.rate), Some(found.source)),
        Err(e) => {
            warn!("Tax lookup for {} failed, continuing without sales tax: {}", request.region_code, e);
            (0.0, None)
        }
    }
}

/// Compute payment, totals and schedule with sales tax financed into the loan
pub async fn compose_loan<L>(request: &LoanRequest, lookup: &L) -> Result<LoanDetails, ComputationError>
where
    L: TaxRateLookup + ?Sized,
{
    let (tax_rate, tax_source) = resolve_tax_rate(request, lookup).await;
    let tax_amount = request.principal * tax_rate;
    let financed_principal = request.principal + tax_amount;

    let payment = monthly_payment(financed_principal, request.annual_rate_percent, request.years)?;
    let lifetime_paid = total_paid(payment, request.years);
    let schedule = generate_schedule(financed_principal, request.annual_rate_percent, request.years, None)?;

    debug!(
        "Composed loan for {}: tax {:.4} ({:.2}), financed {:.2}",
        request.region_code, tax_rate, tax_amount, financed_principal
    );

    Ok(LoanDetails {
        loan_info: LoanInfo {
            principal: request.principal,
            financed_principal,
            annual_rate_percent: request.annual_rate_percent,
            years: request.years,
            region_code: request.region_code.clone(),
            include_sales_tax: request.include_sales_tax,
            tax_rate,
            tax_amount,
            tax_source: if tax_amount > 0.0 { tax_source } else { None },
        },
        results: LoanResults {
            monthly_payment: payment,
            total_paid: lifetime_paid,
            total_interest: total_interest(lifetime_paid, financed_principal),
        },
        schedule,
    })
}
