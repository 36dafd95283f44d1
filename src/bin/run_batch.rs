//! Run every scenario in a CSV file and write a summary per scenario
//!
//! Scenarios are evaluated in parallel; rows that fail validation are
//! reported and left out of the output.

use amortization_engine::analysis::EscrowCosts;
use amortization_engine::loan::load_scenarios;
use amortization_engine::report::write_summaries_csv;
use amortization_engine::scenario::{ScenarioRunner, ScenarioSummary};
use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch", about = "Evaluate a file of loan scenarios")]
struct Args {
    /// Scenario CSV (name, principal, annual_rate, years, extra_payment, extra_frequency, extra_start)
    #[arg(short, long, default_value = "scenarios.csv")]
    input: String,

    /// Summary CSV to write
    #[arg(short, long, default_value = "batch_summary.csv")]
    output: String,

    /// Annual property tax applied to every scenario
    #[arg(long, default_value_t = 0.0)]
    property_tax: f64,

    /// Annual home insurance applied to every scenario
    #[arg(long, default_value_t = 0.0)]
    insurance: f64,

    /// Monthly HOA fees applied to every scenario
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input);
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("Failed to load scenarios from {}", args.input))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::new().with_escrow(EscrowCosts {
        property_tax_annual: args.property_tax,
        home_insurance_annual: args.insurance,
        pmi_monthly: 0.0,
        hoa_monthly: args.hoa,
    });

    println!("Running schedules...");
    let run_start = Instant::now();
    let results = runner.run_batch(&scenarios);
    println!("Schedules complete in {:?}", run_start.elapsed());

    let mut summaries: Vec<ScenarioSummary> = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (scenario, result) in scenarios.iter().zip(results) {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!("Scenario '{}' failed: {}", scenario.name, e);
                failed += 1;
            }
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output))?;
    write_summaries_csv(&summaries, BufWriter::new(file))?;

    let total_interest: f64 = summaries.iter().map(|s| s.total_interest).sum();
    let total_saved: f64 = summaries.iter().map(|s| s.interest_saved).sum();

    println!("\nSummary:");
    println!("  Scenarios:        {}", summaries.len());
    println!("  Failed:           {}", failed);
    println!("  Total Interest:   ${:.2}", total_interest);
    println!("  Interest Saved:   ${:.2}", total_saved);
    println!("\nResults written to: {}", args.output);
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
