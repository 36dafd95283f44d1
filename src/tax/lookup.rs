//! Regional sales-tax lookup collaborator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TaxLookupError;

/// Rate as reported by a lookup provider (fraction or percent, see `normalize_tax_rate`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTaxRate {
    pub rate: f64,
    /// Provider that produced the rate (e.g. "static")
    pub source: String,
}

/// Source of sales-tax rates by region code.
///
/// Implementations own their timeout and retry policy; callers invoke
/// `lookup_region_tax_rate` at most once per computation.
#[async_trait]
pub trait TaxRateLookup: Send + Sync {
    async fn lookup_region_tax_rate(&self, region_code: &str) -> Result<RegionTaxRate, TaxLookupError>;
}

/// Convert a provider rate to a fraction.
///
/// Providers return either a fraction (0.065) or a percentage (6.5): values
/// above 1 are treated as percentages. Non-finite or non-positive rates give 0.
pub fn normalize_tax_rate(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    if raw > 1.0 {
        raw / 100.0
    } else {
        raw
    }
}

/// Region metadata from the static table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// Statewide base sales-tax rates (fractions), local add-ons excluded
const STATE_SALES_TAX: &[(&str, &str, f64)] = &[
    ("AL", "Alabama", 0.04),
    ("AK", "Alaska", 0.0),
    ("AZ", "Arizona", 0.056),
    ("AR", "Arkansas", 0.065),
    ("CA", "California", 0.0725),
    ("CO", "Colorado", 0.029),
    ("CT", "Connecticut", 0.0635),
    ("DE", "Delaware", 0.0),
    ("DC", "District of Columbia", 0.06),
    ("FL", "Florida", 0.06),
    ("GA", "Georgia", 0.04),
    ("HI", "Hawaii", 0.04),
    ("ID", "Idaho", 0.06),
    ("IL", "Illinois", 0.0625),
    ("IN", "Indiana", 0.07),
    ("IA", "Iowa", 0.06),
    ("KS", "Kansas", 0.065),
    ("KY", "Kentucky", 0.06),
    ("LA", "Louisiana", 0.0445),
    ("ME", "Maine", 0.055),
    ("MD", "Maryland", 0.06),
    ("MA", "Massachusetts", 0.0625),
    ("MI", "Michigan", 0.06),
    ("MN", "Minnesota", 0.06875),
    ("MS", "Mississippi", 0.07),
    ("MO", "Missouri", 0.04225),
    ("MT", "Montana", 0.0),
    ("NE", "Nebraska", 0.055),
    ("NV", "Nevada", 0.0685),
    ("NH", "New Hampshire", 0.0),
    ("NJ", "New Jersey", 0.06625),
    ("NM", "New Mexico", 0.04875),
    ("NY", "New York", 0.04),
    ("NC", "North Carolina", 0.0475),
    ("ND", "North Dakota", 0.05),
    ("OH", "Ohio", 0.0575),
    ("OK", "Oklahoma", 0.045),
    ("OR", "Oregon", 0.0),
    ("PA", "Pennsylvania", 0.06),
    ("RI", "Rhode Island", 0.07),
    ("SC", "South Carolina", 0.06),
    ("SD", "South Dakota", 0.042),
    ("TN", "Tennessee", 0.07),
    ("TX", "Texas", 0.0625),
    ("UT", "Utah", 0.061),
    ("VT", "Vermont", 0.06),
    ("VA", "Virginia", 0.053),
    ("WA", "Washington", 0.065),
    ("WV", "West Virginia", 0.06),
    ("WI", "Wisconsin", 0.05),
    ("WY", "Wyoming", 0.04),
];

/// Built-in state sales-tax table; unknown codes resolve to a zero rate
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTaxTable;

impl StaticTaxTable {
    pub const SOURCE: &'static str = "static";

    pub fn new() -> Self {
        Self
    }

    /// All regions in the table
    pub fn regions(&self) -> impl Iterator<Item = RegionInfo> {
        STATE_SALES_TAX.iter().map(|&(code, name, _)| RegionInfo { code, name })
    }

    /// Synchronous rate lookup (fraction)
    pub fn rate_for(&self, region_code: &str) -> f64 {
        let code = region_code.trim();
        STATE_SALES_TAX
            .iter()
            .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
            .map(|&(_, _, rate)| rate)
            .unwrap_or(0.0)
    }
}

#[async_trait]
impl TaxRateLookup for StaticTaxTable {
    async fn lookup_region_tax_rate(&self, region_code: &str) -> Result<RegionTaxRate, TaxLookupError> {
        Ok(RegionTaxRate {
            rate: self.rate_for(region_code),
            source: Self::SOURCE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_fraction_passthrough() {
        assert_eq!(normalize_tax_rate(0.07), 0.07);
        assert_eq!(normalize_tax_rate(1.0), 1.0);
    }

    #[test]
    fn test_normalize_percentage() {
        assert_abs_diff_eq!(normalize_tax_rate(7.0), 0.07, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_tax_rate(6.25), 0.0625, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_guards_invalid() {
        assert_eq!(normalize_tax_rate(-1.0), 0.0);
        assert_eq!(normalize_tax_rate(0.0), 0.0);
        assert_eq!(normalize_tax_rate(f64::NAN), 0.0);
        assert_eq!(normalize_tax_rate(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_static_table_metadata() {
        let table = StaticTaxTable::new();
        assert!(table.regions().count() > 40);
        let ca = table.regions().find(|r| r.code == "CA").unwrap();
        assert_eq!(ca.name, "California");
    }

    #[tokio::test]
    async fn test_static_table_lookup() {
        let table = StaticTaxTable::new();

        let ca = table.lookup_region_tax_rate("CA").await.unwrap();
        assert_abs_diff_eq!(ca.rate, 0.0725, epsilon = 1e-12);
        assert_eq!(ca.source, "static");

        let tx = table.lookup_region_tax_rate(" tx ").await.unwrap();
        assert_abs_diff_eq!(tx.rate, 0.0625, epsilon = 1e-12);

        let unknown = table.lookup_region_tax_rate("ZZ").await.unwrap();
        assert_eq!(unknown.rate, 0.0);
    }
}
