use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::FinCalcResult;

/// Unit a holding period is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    Days,
    /// 30 calendar days each
    Months,
    /// 365 calendar days each
    Years,
}

impl TermUnit {
    pub fn to_days(self, count: u32) -> FinCalcResult<u32> {
        let per_unit: u32 = match self {
            TermUnit::Days => 1,
            TermUnit::Months => 30,
            TermUnit::Years => 365,
        };
        count
            .checked_mul(per_unit)
            .ok_or_else(|| FinCalcError::overflow(format!("term of {count} {self:?}")))
    }
}

/// Calendar days held between an application and a redemption date.
pub fn term_days_between(start: NaiveDate, end: NaiveDate) -> FinCalcResult<u32> {
    let days = (end - start).num_days();
    if days <= 0 {
        return Err(FinCalcError::DateError(format!(
            "redemption date {end} must be after application date {start}"
        )));
    }
    u32::try_from(days)
        .map_err(|_| FinCalcError::DateError(format!("term of {days} days is too long")))
}
