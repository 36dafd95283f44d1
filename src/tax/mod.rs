//! Sales-tax lookup and tax-adjusted loan composition

mod lookup;
mod composer;

pub use lookup::{normalize_tax_rate, RegionInfo, RegionTaxRate, StaticTaxTable, TaxRateLookup};
pub use composer::{compose_loan, LoanDetails, LoanInfo, LoanRequest, LoanResults};
