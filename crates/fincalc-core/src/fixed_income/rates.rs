use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Selic level above which savings pay a fixed 0.5% a month.
pub const SAVINGS_SELIC_THRESHOLD: Rate = dec!(0.085);

const SAVINGS_MONTHLY_RATE: Rate = dec!(0.005);
const SAVINGS_SELIC_SHARE: Rate = dec!(0.70);

/// Annual rate for a CDI-linked product paying `percent_of_cdi` (110 = 110% of CDI).
pub fn cdi_linked_rate(cdi_annual: Rate, percent_of_cdi: Decimal) -> Rate {
    cdi_annual * (percent_of_cdi / dec!(100))
}

/// IPCA+ rate: geometric composition of inflation and the real spread.
pub fn inflation_linked_rate(inflation_annual: Rate, spread_annual: Rate) -> Rate {
    (Decimal::ONE + inflation_annual) * (Decimal::ONE + spread_annual) - Decimal::ONE
}

/// Annual rate for a product paying `percent_of_selic` of Selic (100 = 100%).
pub fn selic_linked_rate(selic_annual: Rate, percent_of_selic: Decimal) -> Rate {
    selic_annual * (percent_of_selic / dec!(100))
}

/// Selic plus a spread, composed geometrically.
pub fn selic_plus_rate(selic_annual: Rate, spread_annual: Rate) -> Rate {
    (Decimal::ONE + selic_annual) * (Decimal::ONE + spread_annual) - Decimal::ONE
}

fn full_rate() -> Decimal {
    dec!(100)
}

/// Poupança rate, ignoring TR.
///
/// Selic strictly above 8.5% a.a. pays 0.5% a month compounded; at or below
/// 8.5% it pays 70% of Selic.
pub fn savings_rate(policy_rate: Rate) -> Rate {
    if policy_rate > SAVINGS_SELIC_THRESHOLD {
        let monthly = Decimal::ONE + SAVINGS_MONTHLY_RATE;
        let mut factor = Decimal::ONE;
        for _ in 0..12 {
            factor *= monthly;
        }
        return factor - Decimal::ONE;
    }
    policy_rate * SAVINGS_SELIC_SHARE
}

/// How a product's annual rate is quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "indexer", rename_all = "snake_case")]
pub enum Indexer {
    /// Percentage of CDI, e.g. 110% of a 10.65% CDI.
    Cdi {
        cdi_annual: Rate,
        percent_of_cdi: Decimal,
    },
    /// IPCA plus a real spread.
    InflationPlus {
        inflation_annual: Rate,
        spread_annual: Rate,
    },
    /// Fixed annual rate agreed at purchase.
    Prefixed { annual_rate: Rate },
    /// Percentage of Selic, 100% when omitted.
    Selic {
        selic_annual: Rate,
        #[serde(default = "full_rate")]
        percent_of_selic: Decimal,
    },
    /// Selic plus an annual spread.
    SelicPlus {
        selic_annual: Rate,
        spread_annual: Rate,
    },
    /// Savings account rule applied to the policy rate.
    Savings { policy_rate: Rate },
}

impl Indexer {
    pub fn effective_annual_rate(&self) -> Rate {
        match self {
            Indexer::Cdi {
                cdi_annual,
                percent_of_cdi,
            } => cdi_linked_rate(*cdi_annual, *percent_of_cdi),
            Indexer::InflationPlus {
                inflation_annual,
                spread_annual,
            } => inflation_linked_rate(*inflation_annual, *spread_annual),
            Indexer::Prefixed { annual_rate } => *annual_rate,
            Indexer::Selic {
                selic_annual,
                percent_of_selic,
            } => selic_linked_rate(*selic_annual, *percent_of_selic),
            Indexer::SelicPlus {
                selic_annual,
                spread_annual,
            } => selic_plus_rate(*selic_annual, *spread_annual),
            Indexer::Savings { policy_rate } => savings_rate(*policy_rate),
        }
    }
}
