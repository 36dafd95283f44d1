//! Load loan scenarios from CSV
//!
//! Expected columns: `name, principal, annual_rate, years` plus the optional
//! `extra_payment, extra_frequency, extra_start` acceleration columns.

use super::{validate, ExtraPaymentFrequency, ExtraPaymentPolicy, LoanScenario, LoanTerms, OptionalCosts};
use crate::error::LoaderError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: String,
    principal: f64,
    annual_rate: f64,
    years: f64,
    #[serde(default)]
    extra_payment: Option<f64>,
    #[serde(default)]
    extra_frequency: Option<String>,
    #[serde(default)]
    extra_start: Option<u32>,
}

impl CsvRow {
    fn to_scenario(self, row: usize) -> Result<LoanScenario, LoaderError> {
        let invalid = |message: String| LoaderError::InvalidRow { row, message };

        let extra_amount = self.extra_payment.unwrap_or(0.0);
        validate(
            self.principal,
            self.annual_rate,
            self.years,
            &OptionalCosts { extra_payment: extra_amount, ..Default::default() },
        )
        .map_err(|e| invalid(e.to_string()))?;

        let mut scenario = LoanScenario::new(LoanTerms::new(self.principal, self.annual_rate, self.years))
            .named(self.name);

        if extra_amount > 0.0 {
            let frequency = match self.extra_frequency.as_deref() {
                Some(s) if !s.trim().is_empty() => s.parse::<ExtraPaymentFrequency>().map_err(invalid)?,
                _ => ExtraPaymentFrequency::Monthly,
            };
            let policy = ExtraPaymentPolicy::new(extra_amount, frequency, self.extra_start.unwrap_or(1));
            policy.validate().map_err(|e| invalid(e.to_string()))?;
            scenario = scenario.with_extra_payment(policy);
        }

        Ok(scenario)
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>, LoaderError> {
    let file = std::fs::File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g. string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanScenario>, LoaderError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario(index + 1)?);
    }

    Ok(scenarios)
}
