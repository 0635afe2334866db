pub mod arithmetic;
pub mod financial_math;
pub mod fixed_income;

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fincalc_core::fixed_income::term::{term_days_between, TermUnit};
use fincalc_core::FinCalcResult;

/// Flags quote rates as percentages; the core works in decimals.
pub(crate) fn from_pct(value: Decimal) -> Decimal {
    value / dec!(100)
}

/// Holding period, given as a count of days, months or years, or as two dates.
#[derive(Args, Debug, Default)]
pub struct TermArgs {
    /// Term in calendar days
    #[arg(long, conflicts_with_all = ["months", "years", "start"])]
    pub days: Option<u32>,

    /// Term in 30-day months
    #[arg(long, conflicts_with_all = ["years", "start"])]
    pub months: Option<u32>,

    /// Term in 365-day years
    #[arg(long, conflicts_with = "start")]
    pub years: Option<u32>,

    /// Application date (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Redemption date (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
}

impl TermArgs {
    pub fn resolve(&self) -> FinCalcResult<Option<u32>> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            return term_days_between(start, end).map(Some);
        }
        if let Some(days) = self.days {
            return TermUnit::Days.to_days(days).map(Some);
        }
        if let Some(months) = self.months {
            return TermUnit::Months.to_days(months).map(Some);
        }
        if let Some(years) = self.years {
            return TermUnit::Years.to_days(years).map(Some);
        }
        Ok(None)
    }
}
