mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::arithmetic::CalcArgs;
use commands::financial_math::{
    AmortizationArgs, BreakEvenArgs, EquivalentRateArgs, FutureValueArgs, InterestArgs,
    PresentValueArgs, RoiArgs,
};
use commands::fixed_income::{CompareArgs, TaxRatesArgs, YieldArgs};

/// Brazilian fixed-income yield comparison and everyday financial math
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Brazilian fixed-income yield comparison and financial calculators",
    long_about = "Compares CDB, LCI, LCA, Tesouro Direto and savings yields net of IOF \
                  and income tax, with decimal precision. Also covers simple and compound \
                  interest, present and future value, SAC and Price amortization tables, \
                  ROI, break-even and plain arithmetic."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the standard seven-product shelf (or an input file) by net return
    Compare(CompareArgs),
    /// Gross and net yield of a single investment
    Yield(YieldArgs),
    /// IOF and income tax rates for a holding period
    TaxRates(TaxRatesArgs),
    /// Simple interest J = C * i * n
    SimpleInterest(InterestArgs),
    /// Compound interest M = C * (1 + i)^n
    CompoundInterest(InterestArgs),
    /// Discount a future amount to today
    PresentValue(PresentValueArgs),
    /// Grow a present amount forward
    FutureValue(FutureValueArgs),
    /// SAC or Price amortization table
    Amortization(AmortizationArgs),
    /// Return on investment
    Roi(RoiArgs),
    /// Convert a rate between periods of different length
    EquivalentRate(EquivalentRateArgs),
    /// Break-even units and revenue
    BreakEven(BreakEvenArgs),
    /// Evaluate a single arithmetic expression, e.g. `calc 12,5 * 3`
    Calc(CalcArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::fixed_income::run_compare(args),
        Commands::Yield(args) => commands::fixed_income::run_yield(args),
        Commands::TaxRates(args) => commands::fixed_income::run_tax_rates(args),
        Commands::SimpleInterest(args) => commands::financial_math::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::financial_math::run_compound_interest(args),
        Commands::PresentValue(args) => commands::financial_math::run_present_value(args),
        Commands::FutureValue(args) => commands::financial_math::run_future_value(args),
        Commands::Amortization(args) => commands::financial_math::run_amortization(args),
        Commands::Roi(args) => commands::financial_math::run_roi(args),
        Commands::EquivalentRate(args) => commands::financial_math::run_equivalent_rate(args),
        Commands::BreakEven(args) => commands::financial_math::run_break_even(args),
        Commands::Calc(args) => commands::arithmetic::run_calc(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
