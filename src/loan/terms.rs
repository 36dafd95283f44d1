//! Loan terms and extra-payment policy structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Core loan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate as a percentage (5.0 = 5%)
    pub annual_rate_percent: f64,

    /// Term in years (may be fractional)
    pub term_years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Periodic rate for a cadence with `periods_per_year` payments
    pub fn periodic_rate(&self, periods_per_year: u32) -> f64 {
        self.annual_rate_percent / 100.0 / periods_per_year as f64
    }

    /// Scheduled number of periods (years x periods per year)
    pub fn term_periods(&self, periods_per_year: u32) -> f64 {
        self.term_years * periods_per_year as f64
    }
}

/// How often an extra principal payment recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraPaymentFrequency {
    /// Every period from the start period onwards
    Monthly,
    /// Every 12th period, starting at the start period
    Yearly,
    /// Only at the start period
    Once,
}

impl ExtraPaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraPaymentFrequency::Monthly => "monthly",
            ExtraPaymentFrequency::Yearly => "yearly",
            ExtraPaymentFrequency::Once => "once",
        }
    }
}

impl fmt::Display for ExtraPaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtraPaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(ExtraPaymentFrequency::Monthly),
            "yearly" | "annual" | "annually" => Ok(ExtraPaymentFrequency::Yearly),
            "once" | "one-time" | "onetime" => Ok(ExtraPaymentFrequency::Once),
            other => Err(format!("Unknown extra payment frequency: {}", other)),
        }
    }
}

/// Extra principal applied on top of the scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentPolicy {
    /// Extra amount per active period
    pub amount: f64,

    pub frequency: ExtraPaymentFrequency,

    /// First period (1-based) the policy applies to
    pub start_period: u32,
}

impl ExtraPaymentPolicy {
    pub fn new(amount: f64, frequency: ExtraPaymentFrequency, start_period: u32) -> Self {
        Self {
            amount,
            frequency,
            start_period,
        }
    }

    /// Extra payment every period starting at period 1
    pub fn monthly(amount: f64) -> Self {
        Self::new(amount, ExtraPaymentFrequency::Monthly, 1)
    }

    /// Whether the policy contributes an extra payment in `period` (1-based)
    pub fn is_active_this_period(&self, period: u32) -> bool {
        if period < self.start_period {
            return false;
        }
        match self.frequency {
            ExtraPaymentFrequency::Monthly => true,
            ExtraPaymentFrequency::Yearly => (period - self.start_period) % 12 == 0,
            ExtraPaymentFrequency::Once => period == self.start_period,
        }
    }

    /// Extra amount contributed in `period`
    pub fn amount_for_period(&self, period: u32) -> f64 {
        if self.is_active_this_period(period) {
            self.amount
        } else {
            0.0
        }
    }
}

/// A loan together with its optional acceleration policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    /// Free-form label used in reports
    #[serde(default)]
    pub name: String,

    pub terms: LoanTerms,

    #[serde(default)]
    pub extra_payment: Option<ExtraPaymentPolicy>,
}

impl LoanScenario {
    pub fn new(terms: LoanTerms) -> Self {
        Self {
            name: String::new(),
            terms,
            extra_payment: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_extra_payment(mut self, policy: ExtraPaymentPolicy) -> Self {
        self.extra_payment = Some(policy);
        self
    }
}
