use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Fields rendered as Brazilian Real amounts in human-facing output.
const MONEY_KEYS: &[&str] = &[
    "principal",
    "gross_value",
    "gross_yield",
    "withholding_tax",
    "income_tax",
    "net_value",
    "net_yield",
    "capital",
    "interest",
    "amount",
    "payment",
    "amortization",
    "balance",
    "total_payment",
    "total_interest",
    "total_amortization",
    "gain",
    "cost",
    "profit",
    "fixed_costs",
    "unit_price",
    "unit_variable_cost",
    "contribution_margin",
    "break_even_revenue",
    "present_value",
    "future_value",
];

/// `R$ 1.234,56`, rounded half away from zero.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{sign}R$ {grouped},{cents}")
}

pub fn format_pct(value: Decimal) -> String {
    format!("{:.4}%", value.round_dp(4))
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// Display form for a known money or `_pct` field; `None` leaves the value as is.
pub fn format_field(key: &str, value: &Value) -> Option<String> {
    let amount = as_decimal(value)?;
    if key.ends_with("_pct") {
        Some(format_pct(amount))
    } else if MONEY_KEYS.contains(&key) {
        Some(format_brl(amount))
    } else {
        None
    }
}
