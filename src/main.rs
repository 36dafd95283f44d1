//! Amortization Engine CLI
//!
//! Command-line interface for payment schedules and loan analysis

use amortization_engine::amortization::{bi_weekly_plan, calendar, generate_schedule, monthly_payment, total_interest, total_paid};
use amortization_engine::analysis::{compare, pmi, refinance, total_monthly_payment, BreakEven, EscrowCosts, DEFAULT_PMI_RATE_PERCENT};
use amortization_engine::loan::{validate, ExtraPaymentFrequency, ExtraPaymentPolicy, LoanScenario, LoanTerms, OptionalCosts};
use amortization_engine::report::write_schedule_csv;
use amortization_engine::tax::{compose_loan, LoanRequest, StaticTaxTable};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;

/// Amortization and loan-economics calculator
#[derive(Parser)]
#[command(name = "amortization_engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Principal, annual rate and term shared by most commands
#[derive(Args, Debug, Clone, Copy)]
struct LoanArgs {
    /// Loan amount
    #[arg(short, long)]
    principal: f64,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(short, long)]
    rate: f64,

    /// Term in years
    #[arg(short, long)]
    years: f64,
}

impl LoanArgs {
    fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.rate, self.years)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly payment with lifetime totals
    Payment {
        #[command(flatten)]
        loan: LoanArgs,
    },

    /// Full amortization schedule
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// Extra principal per active period
        #[arg(long)]
        extra: Option<f64>,

        /// Extra payment frequency (monthly, yearly, once)
        #[arg(long, default_value = "monthly")]
        extra_frequency: ExtraPaymentFrequency,

        /// First period the extra payment applies to
        #[arg(long, default_value_t = 1)]
        extra_start: u32,

        /// Date of the first payment (YYYY-MM-DD)
        #[arg(long)]
        first_payment: Option<NaiveDate>,

        /// Write the full schedule to this CSV file
        #[arg(long)]
        csv: Option<String>,

        /// Number of rows to print to the console
        #[arg(long, default_value_t = 12)]
        rows: usize,
    },

    /// Bi-weekly plan against the monthly loan
    Biweekly {
        #[command(flatten)]
        loan: LoanArgs,
    },

    /// Compare two loans
    Compare {
        /// Loan A as principal,rate,years
        #[arg(long)]
        a: String,

        /// Loan B as principal,rate,years
        #[arg(long)]
        b: String,
    },

    /// Evaluate a refinance
    Refinance {
        /// Current loan as principal,rate,years
        #[arg(long)]
        current: String,

        /// New loan as principal,rate,years
        #[arg(long)]
        new: String,

        /// One-time closing costs
        #[arg(long, default_value_t = 0.0)]
        closing_costs: f64,

        /// Payments already made on the current loan
        #[arg(long, default_value_t = 0)]
        paid: u32,
    },

    /// Total monthly obligation including escrow items
    Total {
        #[command(flatten)]
        loan: LoanArgs,

        /// Annual property tax
        #[arg(long, default_value_t = 0.0)]
        property_tax: f64,

        /// Annual home insurance
        #[arg(long, default_value_t = 0.0)]
        insurance: f64,

        /// Monthly PMI
        #[arg(long, default_value_t = 0.0)]
        pmi: f64,

        /// Monthly HOA fees
        #[arg(long, default_value_t = 0.0)]
        hoa: f64,
    },

    /// Monthly PMI from home price and down payment
    Pmi {
        #[arg(long)]
        home_price: f64,

        #[arg(long)]
        down_payment: f64,

        /// Annual PMI rate in percent of the loan amount
        #[arg(long, default_value_t = DEFAULT_PMI_RATE_PERCENT)]
        pmi_rate: f64,
    },

    /// Loan with state sales tax folded into the principal
    Compose {
        #[command(flatten)]
        loan: LoanArgs,

        /// Two-letter state code
        #[arg(long)]
        region: String,

        /// Skip the sales-tax lookup
        #[arg(long)]
        no_sales_tax: bool,
    },
}

/// Parse "principal,rate,years"
fn parse_scenario(name: &str, value: &str) -> Result<LoanScenario> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        anyhow::bail!("{} must be principal,rate,years (got '{}')", name, value);
    }
    let principal: f64 = parts[0].parse().with_context(|| format!("{}: bad principal", name))?;
    let rate: f64 = parts[1].parse().with_context(|| format!("{}: bad rate", name))?;
    let years: f64 = parts[2].parse().with_context(|| format!("{}: bad years", name))?;

    let terms = LoanTerms::new(principal, rate, years);
    terms.validate().with_context(|| format!("{} is invalid", name))?;
    Ok(LoanScenario::new(terms).named(name))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_break_even(break_even: &BreakEven) -> String {
    match break_even.periods() {
        Some(periods) => format!("{:.1} months", periods),
        None => "never".to_string(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Payment { loan } => {
            loan.terms().validate()?;
            let payment = monthly_payment(loan.principal, loan.rate, loan.years)?;
            let paid = total_paid(payment, loan.years);
            let interest = total_interest(paid, loan.principal);

            if json {
                print_json(&serde_json::json!({
                    "monthly_payment": payment,
                    "total_paid": paid,
                    "total_interest": interest,
                }))?;
            } else {
                println!("Monthly Payment: ${:.2}", payment);
                println!("Total Paid:      ${:.2}", paid);
                println!("Total Interest:  ${:.2}", interest);
            }
        }

        Commands::Schedule { loan, extra, extra_frequency, extra_start, first_payment, csv, rows } => {
            let costs = OptionalCosts {
                extra_payment: extra.unwrap_or(0.0),
                ..Default::default()
            };
            validate(loan.principal, loan.rate, loan.years, &costs)?;

            let policy = extra.map(|amount| ExtraPaymentPolicy::new(amount, extra_frequency, extra_start));
            if let Some(policy) = &policy {
                policy.validate()?;
            }
            let schedule = generate_schedule(loan.principal, loan.rate, loan.years, policy.as_ref())?;
            info!("Generated {} periods", schedule.total_periods);

            if let Some(path) = &csv {
                let file = File::create(path).with_context(|| format!("Unable to create {}", path))?;
                write_schedule_csv(&schedule, first_payment, BufWriter::new(file))?;
            }

            if json {
                print_json(&schedule)?;
            } else {
                println!("{:>6} {:>12} {:>12} {:>12} {:>10} {:>14}",
                    "Period", "Payment", "Principal", "Interest", "Extra", "Balance");
                println!("{}", "-".repeat(71));
                for row in schedule.periods.iter().take(rows) {
                    println!("{:>6} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>14.2}",
                        row.index,
                        row.total_payment,
                        row.principal_portion,
                        row.interest_portion,
                        row.extra_portion,
                        row.remaining_balance,
                    );
                }
                if schedule.periods.len() > rows {
                    println!("... ({} more periods)", schedule.periods.len() - rows);
                }

                println!("\nSummary:");
                println!("  Scheduled Payment: ${:.2}", schedule.scheduled_payment);
                println!("  Total Periods:     {}", schedule.total_periods);
                println!("  Total Interest:    ${:.2}", schedule.total_interest);
                println!("  Total Paid:        ${:.2}", schedule.total_paid);
                if schedule.periods_saved > 0.0 {
                    println!("  Periods Saved:     {:.0}", schedule.periods_saved);
                    println!("  Interest Saved:    ${:.2}", schedule.interest_saved);
                }
                if let Some(first) = first_payment {
                    if let Some(date) = calendar::payoff_date(&schedule, first)? {
                        println!("  Payoff Date:       {}", date);
                    }
                }
                if let Some(path) = &csv {
                    println!("\nFull schedule written to: {}", path);
                }
            }
        }

        Commands::Biweekly { loan } => {
            loan.terms().validate()?;
            let plan = bi_weekly_plan(loan.principal, loan.rate, loan.years)?;

            if json {
                print_json(&plan)?;
            } else {
                let cmp = &plan.compared_to_monthly;
                println!("Bi-weekly Payment: ${:.2}", plan.bi_weekly_payment);
                println!("Total Payments:    {}", plan.total_payments);
                println!("Years to Payoff:   {:.2}", plan.years_to_payoff);
                println!("Total Interest:    ${:.2}", plan.total_interest);
                println!("\nCompared to monthly (${:.2}):", cmp.monthly_payment);
                println!("  Monthly Interest: ${:.2}", cmp.monthly_total_interest);
                println!("  Interest Saved:   ${:.2}", cmp.interest_saved);
                println!("  Time Saved:       {:.2} years", cmp.time_saved_years);
            }
        }

        Commands::Compare { a, b } => {
            let loan_a = parse_scenario("A", &a)?;
            let loan_b = parse_scenario("B", &b)?;
            let result = compare(&loan_a, &loan_b)?;

            if json {
                print_json(&result)?;
            } else {
                println!("{:<20} {:>14} {:>14}", "", "Loan A", "Loan B");
                println!("{:<20} {:>14.2} {:>14.2}", "Monthly Payment",
                    result.loan_a.monthly_payment, result.loan_b.monthly_payment);
                println!("{:<20} {:>14.2} {:>14.2}", "Total Interest",
                    result.loan_a.schedule.total_interest, result.loan_b.schedule.total_interest);
                println!("{:<20} {:>14} {:>14}", "Periods",
                    result.loan_a.schedule.total_periods, result.loan_b.schedule.total_periods);
                println!("{:<20} {:>14.2} {:>14.2}", "Total Paid",
                    result.loan_a.schedule.total_paid, result.loan_b.schedule.total_paid);

                let diff = &result.difference;
                println!("\nDifference:");
                println!("  Payment:    ${:.2}", diff.payment_difference);
                println!("  Interest:   ${:.2}", diff.interest_difference);
                println!("  Periods:    {}", diff.time_difference);
                println!("  Total Cost: ${:.2}", diff.total_cost_difference);
            }
        }

        Commands::Refinance { current, new, closing_costs, paid } => {
            let current = parse_scenario("current", &current)?;
            let new = parse_scenario("new", &new)?;
            let assessment = refinance(&current, &new, closing_costs, paid)?;

            if json {
                print_json(&assessment)?;
            } else {
                println!("Current Payment:   ${:.2}", assessment.current_monthly_payment);
                println!("New Payment:       ${:.2}", assessment.new_monthly_payment);
                println!("Monthly Savings:   ${:.2}", assessment.monthly_savings);
                println!("Remaining Cost:    ${:.2}", assessment.remaining_cost_of_current);
                println!("New Total Cost:    ${:.2}", assessment.new_total_cost);
                println!("Total Savings:     ${:.2}", assessment.total_savings);
                println!("Break-even:        {}", format_break_even(&assessment.break_even));
                println!("Worth Refinancing: {}", if assessment.worth_refinancing { "yes" } else { "no" });
            }
        }

        Commands::Total { loan, property_tax, insurance, pmi, hoa } => {
            let costs = OptionalCosts {
                property_tax,
                home_insurance: insurance,
                pmi,
                extra_payment: 0.0,
            };
            validate(loan.principal, loan.rate, loan.years, &costs)?;

            let escrow = EscrowCosts {
                property_tax_annual: property_tax,
                home_insurance_annual: insurance,
                pmi_monthly: pmi,
                hoa_monthly: hoa,
            };
            let obligation = total_monthly_payment(&loan.terms(), &escrow)?;

            if json {
                print_json(&obligation)?;
            } else {
                println!("Principal & Interest: ${:.2}", obligation.principal_and_interest);
                println!("Property Tax:         ${:.2}", obligation.property_tax);
                println!("Home Insurance:       ${:.2}", obligation.home_insurance);
                println!("PMI:                  ${:.2}", obligation.pmi);
                println!("HOA Fees:             ${:.2}", obligation.hoa_fees);
                println!("{}", "-".repeat(32));
                println!("Total:                ${:.2}", obligation.total);
            }
        }

        Commands::Pmi { home_price, down_payment, pmi_rate } => {
            let monthly = pmi(home_price, down_payment, pmi_rate)?;
            if json {
                print_json(&serde_json::json!({ "pmi_monthly": monthly }))?;
            } else {
                println!("Monthly PMI: ${:.2}", monthly);
            }
        }

        Commands::Compose { loan, region, no_sales_tax } => {
            loan.terms().validate()?;
            let request = LoanRequest {
                principal: loan.principal,
                annual_rate_percent: loan.rate,
                years: loan.years,
                region_code: region,
                include_sales_tax: !no_sales_tax,
            };
            let details = compose_loan(&request, &StaticTaxTable::new()).await?;

            if json {
                print_json(&details)?;
            } else {
                let info = &details.loan_info;
                println!("Region:            {}", info.region_code);
                println!("Tax Rate:          {:.4}%", info.tax_rate * 100.0);
                println!("Tax Amount:        ${:.2}", info.tax_amount);
                println!("Financed:          ${:.2}", info.financed_principal);
                if let Some(source) = &info.tax_source {
                    println!("Tax Source:        {}", source);
                }
                println!("Monthly Payment:   ${:.2}", details.results.monthly_payment);
                println!("Total Paid:        ${:.2}", details.results.total_paid);
                println!("Total Interest:    ${:.2}", details.results.total_interest);
            }
        }
    }

    Ok(())
}
