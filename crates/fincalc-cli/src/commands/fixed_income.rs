use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use fincalc_core::fixed_income::portfolio::StandardPortfolio;
use fincalc_core::fixed_income::tax_tables::{tax_schedule, IOF_FREE_FROM_DAY};
use fincalc_core::fixed_income::{
    analyze_investment, compare_investments, income_tax_rate, withholding_tax_rate,
    ComparisonInput, Indexer, Investment, InvestmentInput, InvestmentType,
};
use fincalc_core::{with_metadata, Rate};

use super::{from_pct, TermArgs};
use crate::input;

/// Arguments for ranking the standard product shelf
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompareArgs {
    /// Use the built-in example: R$ 10.000,00 for 365 days at default rates
    #[arg(long, conflicts_with = "input")]
    pub example: bool,

    /// Path to a JSON/YAML comparison file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested in every product (default 10000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    #[command(flatten)]
    pub term: TermArgs,

    /// CDI, % a.a. (e.g. 10.65)
    #[arg(long)]
    pub cdi: Option<Decimal>,

    /// Selic, % a.a.
    #[arg(long)]
    pub selic: Option<Decimal>,

    /// Expected IPCA, % a.a.
    #[arg(long)]
    pub ipca: Option<Decimal>,

    /// CDB offer, % of CDI
    #[arg(long)]
    pub cdb_pct: Option<Decimal>,

    /// LCI offer, % of CDI
    #[arg(long)]
    pub lci_pct: Option<Decimal>,

    /// LCA offer, % of CDI
    #[arg(long)]
    pub lca_pct: Option<Decimal>,

    /// Tesouro IPCA+ real spread, % a.a.
    #[arg(long)]
    pub ipca_spread: Option<Decimal>,

    /// Tesouro Prefixado rate, % a.a.
    #[arg(long)]
    pub prefixed_rate: Option<Decimal>,
}

/// Arguments for a single investment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct YieldArgs {
    /// Path to a JSON/YAML investment file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product: cdb, lci, lca, tesouro-selic, tesouro-ipca, tesouro-prefixado, poupanca
    #[arg(long = "type", value_parser = parse_investment_type)]
    pub investment_type: Option<InvestmentType>,

    /// Amount invested
    #[arg(long)]
    pub principal: Option<Decimal>,

    #[command(flatten)]
    pub term: TermArgs,

    /// Fixed annual rate, % a.a.
    #[arg(long, conflicts_with_all = ["pct_of_cdi", "spread"])]
    pub rate: Option<Decimal>,

    /// Offer as a percentage of CDI (requires --cdi)
    #[arg(long, requires = "cdi")]
    pub pct_of_cdi: Option<Decimal>,

    /// CDI, % a.a.
    #[arg(long)]
    pub cdi: Option<Decimal>,

    /// Real spread over IPCA, % a.a. (requires --ipca)
    #[arg(long, requires = "ipca")]
    pub spread: Option<Decimal>,

    /// Expected IPCA, % a.a.
    #[arg(long)]
    pub ipca: Option<Decimal>,

    /// Selic, % a.a. (Tesouro Selic, or the policy rate for savings)
    #[arg(long)]
    pub selic: Option<Decimal>,

    /// Offer as a percentage of Selic (requires --selic)
    #[arg(long, requires = "selic", conflicts_with = "selic_spread")]
    pub pct_of_selic: Option<Decimal>,

    /// Spread over Selic, % a.a. (requires --selic)
    #[arg(long, requires = "selic")]
    pub selic_spread: Option<Decimal>,

    /// Display label
    #[arg(long)]
    pub label: Option<String>,
}

/// Arguments for the tax-rate lookup
#[derive(Args)]
pub struct TaxRatesArgs {
    /// Holding period in calendar days
    #[arg(long, required_unless_present = "schedule", allow_hyphen_values = true)]
    pub days: Option<i64>,

    /// Print both full tables instead of a single lookup
    #[arg(long, conflicts_with = "days")]
    pub schedule: bool,

    /// Product is income-tax exempt (LCI, LCA, savings)
    #[arg(long)]
    pub exempt: bool,
}

#[derive(Serialize)]
struct TaxRates {
    days: i64,
    exempt: bool,
    withholding_tax_rate: Rate,
    income_tax_rate: Rate,
    iof_free: bool,
}

pub fn parse_investment_type(raw: &str) -> Result<InvestmentType, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
    let kind = match normalized.as_str() {
        "cdb" => InvestmentType::Cdb,
        "lci" => InvestmentType::Lci,
        "lca" => InvestmentType::Lca,
        "tesouro-selic" | "treasury-selic" | "selic" => InvestmentType::TreasurySelic,
        "tesouro-ipca" | "treasury-ipca" | "ipca" => InvestmentType::TreasuryIpca,
        "tesouro-prefixado" | "treasury-prefixed" | "prefixado" | "prefixed" => {
            InvestmentType::TreasuryPrefixed
        }
        "poupanca" | "poupança" | "savings" => InvestmentType::Savings,
        _ => return Err(format!("unknown investment type '{raw}'")),
    };
    Ok(kind)
}

fn portfolio_from_flags(args: &CompareArgs) -> Result<StandardPortfolio, Box<dyn std::error::Error>> {
    let mut portfolio = StandardPortfolio::example();

    if let Some(principal) = args.principal {
        portfolio.principal = principal;
    }
    if let Some(days) = args.term.resolve()? {
        portfolio.term_days = days;
    }
    if let Some(cdi) = args.cdi {
        portfolio.market.cdi_annual = from_pct(cdi);
    }
    if let Some(selic) = args.selic {
        portfolio.market.selic_annual = from_pct(selic);
    }
    if let Some(ipca) = args.ipca {
        portfolio.market.ipca_annual = from_pct(ipca);
    }
    if let Some(pct) = args.cdb_pct {
        portfolio.offers.cdb_pct_of_cdi = pct;
    }
    if let Some(pct) = args.lci_pct {
        portfolio.offers.lci_pct_of_cdi = pct;
    }
    if let Some(pct) = args.lca_pct {
        portfolio.offers.lca_pct_of_cdi = pct;
    }
    if let Some(spread) = args.ipca_spread {
        portfolio.offers.ipca_spread = from_pct(spread);
    }
    if let Some(rate) = args.prefixed_rate {
        portfolio.offers.prefixed_rate = from_pct(rate);
    }
    Ok(portfolio)
}

fn indexer_from_flags(
    kind: InvestmentType,
    args: &YieldArgs,
) -> Result<Indexer, Box<dyn std::error::Error>> {
    if let Some(rate) = args.rate {
        return Ok(Indexer::Prefixed {
            annual_rate: from_pct(rate),
        });
    }
    if let Some(pct) = args.pct_of_cdi {
        let cdi = args.cdi.ok_or("--pct-of-cdi needs --cdi")?;
        return Ok(Indexer::Cdi {
            cdi_annual: from_pct(cdi),
            percent_of_cdi: pct,
        });
    }
    if let Some(spread) = args.spread {
        let ipca = args.ipca.ok_or("--spread needs --ipca")?;
        return Ok(Indexer::InflationPlus {
            inflation_annual: from_pct(ipca),
            spread_annual: from_pct(spread),
        });
    }
    if let Some(selic) = args.selic {
        let selic = from_pct(selic);
        return Ok(if kind == InvestmentType::Savings {
            Indexer::Savings { policy_rate: selic }
        } else if let Some(spread) = args.selic_spread {
            Indexer::SelicPlus {
                selic_annual: selic,
                spread_annual: from_pct(spread),
            }
        } else {
            Indexer::Selic {
                selic_annual: selic,
                percent_of_selic: args.pct_of_selic.unwrap_or(dec!(100)),
            }
        });
    }
    Err("a rate is required: --rate, --pct-of-cdi with --cdi, --spread with --ipca, or --selic".into())
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison = if args.example {
        ComparisonInput::Standard(StandardPortfolio::example())
    } else if let Some(loaded) = input::load::<ComparisonInput>(args.input.as_deref())? {
        loaded
    } else {
        ComparisonInput::Standard(portfolio_from_flags(&args)?)
    };

    let output = compare_investments(&comparison)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_yield(args: YieldArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let investment = if let Some(loaded) = input::load::<InvestmentInput>(args.input.as_deref())? {
        Investment::try_from(loaded)?
    } else {
        let kind = args
            .investment_type
            .ok_or("--type is required (or provide --input)")?;
        let principal = args.principal.ok_or("--principal is required (or provide --input)")?;
        let term_days = args
            .term
            .resolve()?
            .ok_or("a term is required: --days, --months, --years or --start with --end")?;
        let indexer = indexer_from_flags(kind, &args)?;
        tracing::info!(?kind, ?indexer, term_days, "resolved investment from flags");

        let investment = Investment::new(kind, principal, term_days, indexer.effective_annual_rate())?;
        match args.label {
            Some(label) => investment.with_label(label),
            None => investment,
        }
    };

    let output = analyze_investment(&investment)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_tax_rates(args: TaxRatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    if args.schedule {
        let output = with_metadata(
            "IOF regressive table (days 1-29) and income tax regressive tiers",
            &serde_json::json!({ "iof_free_from_day": IOF_FREE_FROM_DAY }),
            Vec::new(),
            start.elapsed().as_micros() as u64,
            tax_schedule(),
        );
        return Ok(serde_json::to_value(output)?);
    }

    let days = args.days.ok_or("--days is required (or pass --schedule)")?;
    let mut warnings = Vec::new();
    if days <= 0 {
        warnings.push(format!("{days} days held: rates for day 1 are shown"));
    }

    let result = TaxRates {
        days,
        exempt: args.exempt,
        withholding_tax_rate: withholding_tax_rate(days),
        income_tax_rate: income_tax_rate(days, args.exempt),
        iof_free: days >= IOF_FREE_FROM_DAY,
    };
    let output = with_metadata(
        "IOF and income tax lookup by calendar days held",
        &serde_json::json!({ "days": days, "exempt": args.exempt }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
