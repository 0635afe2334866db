use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use fincalc_core::financial_math::amortization::{
    amortization_table, AmortizationInput, AmortizationSystem,
};
use fincalc_core::financial_math::interest::{compound_interest, simple_interest, InterestInput};
use fincalc_core::financial_math::returns::{
    break_even, return_on_investment, BreakEvenInput, RoiInput,
};
use fincalc_core::time_value;
use fincalc_core::{with_metadata, Money, Rate};

use super::from_pct;

/// Arguments for simple and compound interest
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct InterestArgs {
    /// Initial capital
    #[arg(long)]
    pub capital: Decimal,

    /// Rate per period, %
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub periods: u32,
}

/// Arguments for discounting a future amount
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PresentValueArgs {
    /// Amount received at the end
    #[arg(long)]
    pub future_value: Decimal,

    /// Discount rate per period, %
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub periods: u32,
}

/// Arguments for growing a present amount
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FutureValueArgs {
    /// Amount invested today
    #[arg(long)]
    pub present_value: Decimal,

    /// Rate per period, %
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub periods: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemArg {
    Sac,
    Price,
}

impl From<SystemArg> for AmortizationSystem {
    fn from(arg: SystemArg) -> Self {
        match arg {
            SystemArg::Sac => AmortizationSystem::Sac,
            SystemArg::Price => AmortizationSystem::Price,
        }
    }
}

/// Arguments for an amortization table
#[derive(Args)]
pub struct AmortizationArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Decimal,

    /// Rate per period, %
    #[arg(long)]
    pub rate: Decimal,

    /// Number of installments
    #[arg(long)]
    pub periods: u32,

    /// SAC (constant amortization) or Price (level installments)
    #[arg(long, value_enum, default_value = "price")]
    pub system: SystemArg,
}

/// Arguments for return on investment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoiArgs {
    /// Total amount returned
    #[arg(long)]
    pub gain: Decimal,

    /// Amount invested
    #[arg(long)]
    pub cost: Decimal,
}

/// Arguments for rate conversion between periods
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EquivalentRateArgs {
    /// Rate over the source period, %
    #[arg(long)]
    pub rate: Decimal,

    /// Length of the source period in days (30 for a monthly rate)
    #[arg(long)]
    pub from_days: u32,

    /// Length of the target period in days (360 or 365 for a yearly rate)
    #[arg(long)]
    pub to_days: u32,
}

/// Arguments for break-even analysis
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Fixed costs for the period
    #[arg(long)]
    pub fixed_costs: Decimal,

    /// Selling price per unit
    #[arg(long)]
    pub price: Decimal,

    /// Variable cost per unit
    #[arg(long)]
    pub variable_cost: Decimal,
}

#[derive(Serialize)]
struct Discounted {
    future_value: Money,
    rate: Rate,
    periods: u32,
    present_value: Money,
}

#[derive(Serialize)]
struct Compounded {
    present_value: Money,
    rate: Rate,
    periods: u32,
    future_value: Money,
}

#[derive(Serialize)]
struct Equivalent {
    rate: Rate,
    from_days: u32,
    to_days: u32,
    equivalent_rate: Rate,
    equivalent_rate_pct: Decimal,
}

pub fn run_simple_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = InterestInput {
        capital: args.capital,
        rate: from_pct(args.rate),
        periods: args.periods,
    };
    Ok(serde_json::to_value(simple_interest(&input)?)?)
}

pub fn run_compound_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = InterestInput {
        capital: args.capital,
        rate: from_pct(args.rate),
        periods: args.periods,
    };
    Ok(serde_json::to_value(compound_interest(&input)?)?)
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rate = from_pct(args.rate);
    let present_value = time_value::present_value(args.future_value, rate, args.periods)?;

    let output = with_metadata(
        "Present value: FV / (1 + i)^n",
        &json!({ "rate": rate.to_string(), "periods": args.periods }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        Discounted {
            future_value: args.future_value,
            rate,
            periods: args.periods,
            present_value,
        },
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rate = from_pct(args.rate);
    let future_value = time_value::future_value(args.present_value, rate, args.periods)?;

    let output = with_metadata(
        "Future value: PV * (1 + i)^n",
        &json!({ "rate": rate.to_string(), "periods": args.periods }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        Compounded {
            present_value: args.present_value,
            rate,
            periods: args.periods,
            future_value,
        },
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = AmortizationInput {
        principal: args.principal,
        rate: from_pct(args.rate),
        periods: args.periods,
        system: args.system.into(),
    };
    Ok(serde_json::to_value(amortization_table(&input)?)?)
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = RoiInput {
        gain: args.gain,
        cost: args.cost,
    };
    Ok(serde_json::to_value(return_on_investment(&input)?)?)
}

pub fn run_equivalent_rate(args: EquivalentRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rate = from_pct(args.rate);
    let equivalent = time_value::equivalent_rate(rate, args.from_days, args.to_days)?;

    let output = with_metadata(
        "Equivalent rate: (1 + i)^(to_days / from_days) - 1",
        &json!({ "from_days": args.from_days, "to_days": args.to_days }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        Equivalent {
            rate,
            from_days: args.from_days,
            to_days: args.to_days,
            equivalent_rate: equivalent,
            equivalent_rate_pct: equivalent * Decimal::ONE_HUNDRED,
        },
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = BreakEvenInput {
        fixed_costs: args.fixed_costs,
        unit_price: args.price,
        unit_variable_cost: args.variable_cost,
    };
    Ok(serde_json::to_value(break_even(&input)?)?)
}
