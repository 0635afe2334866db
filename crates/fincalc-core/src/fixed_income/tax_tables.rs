use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::trace;

use crate::types::Rate;

// ---------------------------------------------------------------------------
// Rule sets
// ---------------------------------------------------------------------------

/// One row of a regressive tax table: applies when `days <= max_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRule {
    pub max_days: i64,
    pub rate: Rate,
}

const fn rule(max_days: i64, rate: Rate) -> RateRule {
    RateRule { max_days, rate }
}

/// An ordered rule set evaluated top-down; the first matching rule wins.
#[derive(Debug, Clone, Copy)]
pub struct RateSchedule {
    pub name: &'static str,
    pub rules: &'static [RateRule],
}

impl RateSchedule {
    /// Rate for a holding period. Falls back to the last rule's rate, so the
    /// lookup is total even for a schedule whose last row is not open-ended.
    pub fn rate_for(&self, days: i64) -> Rate {
        let rate = self
            .rules
            .iter()
            .find(|r| days <= r.max_days)
            .or(self.rules.last())
            .map(|r| r.rate)
            .unwrap_or(Decimal::ZERO);
        trace!(schedule = self.name, days, %rate, "tax rate lookup");
        rate
    }
}

// ---------------------------------------------------------------------------
// IOF: Decreto 6.306/2007 (share of the yield retained, by day held)
// ---------------------------------------------------------------------------

const IOF_RULES: [RateRule; 30] = [
    rule(1, dec!(0.96)),
    rule(2, dec!(0.93)),
    rule(3, dec!(0.90)),
    rule(4, dec!(0.86)),
    rule(5, dec!(0.83)),
    rule(6, dec!(0.80)),
    rule(7, dec!(0.76)),
    rule(8, dec!(0.73)),
    rule(9, dec!(0.70)),
    rule(10, dec!(0.66)),
    rule(11, dec!(0.63)),
    rule(12, dec!(0.60)),
    rule(13, dec!(0.56)),
    rule(14, dec!(0.53)),
    rule(15, dec!(0.50)),
    rule(16, dec!(0.46)),
    rule(17, dec!(0.43)),
    rule(18, dec!(0.40)),
    rule(19, dec!(0.36)),
    rule(20, dec!(0.33)),
    rule(21, dec!(0.30)),
    rule(22, dec!(0.26)),
    rule(23, dec!(0.23)),
    rule(24, dec!(0.20)),
    rule(25, dec!(0.16)),
    rule(26, dec!(0.13)),
    rule(27, dec!(0.10)),
    rule(28, dec!(0.06)),
    rule(29, dec!(0.03)),
    rule(i64::MAX, dec!(0)),
];

pub const WITHHOLDING_SCHEDULE: RateSchedule = RateSchedule {
    name: "iof",
    rules: &IOF_RULES,
};

/// Day from which no IOF is charged.
pub const IOF_FREE_FROM_DAY: i64 = 30;

// ---------------------------------------------------------------------------
// IR: Lei 11.033/2004 regressive table
// ---------------------------------------------------------------------------

const IR_RULES: [RateRule; 4] = [
    rule(180, dec!(0.225)),
    rule(360, dec!(0.20)),
    rule(720, dec!(0.175)),
    rule(i64::MAX, dec!(0.15)),
];

pub const INCOME_TAX_SCHEDULE: RateSchedule = RateSchedule {
    name: "ir",
    rules: &IR_RULES,
};

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// IOF rate applied to the gross yield. Days <= 0 are clamped to day 1.
pub fn withholding_tax_rate(days: i64) -> Rate {
    WITHHOLDING_SCHEDULE.rate_for(days.max(1))
}

/// IR rate applied to the yield left after IOF.
pub fn income_tax_rate(days: i64, exempt: bool) -> Rate {
    if exempt {
        return Decimal::ZERO;
    }
    INCOME_TAX_SCHEDULE.rate_for(days)
}

/// A rule rendered as a closed day range; `to_day` is `None` for the open-ended tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub from_day: i64,
    pub to_day: Option<i64>,
    pub rate: Rate,
}

/// Both tables, for display.
#[derive(Debug, Clone, Serialize)]
pub struct TaxSchedule {
    pub withholding: Vec<ScheduleRow>,
    pub income_tax: Vec<ScheduleRow>,
}

fn rows(schedule: &RateSchedule) -> Vec<ScheduleRow> {
    let mut from_day = 1;
    schedule
        .rules
        .iter()
        .map(|r| {
            let row = ScheduleRow {
                from_day,
                to_day: (r.max_days != i64::MAX).then_some(r.max_days),
                rate: r.rate,
            };
            from_day = r.max_days.saturating_add(1);
            row
        })
        .collect()
}

pub fn tax_schedule() -> TaxSchedule {
    TaxSchedule {
        withholding: rows(&WITHHOLDING_SCHEDULE),
        income_tax: rows(&INCOME_TAX_SCHEDULE),
    }
}
