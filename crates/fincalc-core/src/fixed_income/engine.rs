use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::investment::{Investment, InvestmentType};
use super::tax_tables::{income_tax_rate, withholding_tax_rate};
use crate::error::FinCalcError;
use crate::time_value::growth_factor;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

/// Calendar-day base used for every product, money-market ones included.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

const HUNDRED: Decimal = dec!(100);

/// Outcome of one investment after IOF and IR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub label: String,
    pub investment_type: InvestmentType,
    pub principal: Money,
    pub term_days: u32,
    pub gross_value: Money,
    pub gross_yield: Money,
    pub withholding_tax: Money,
    pub income_tax: Money,
    pub net_value: Money,
    pub net_yield: Money,
    pub gross_rate_pct: Decimal,
    pub net_rate_pct: Decimal,
    pub gross_annual_rate_pct: Decimal,
    pub net_annual_rate_pct: Decimal,
    pub withholding_tax_rate_pct: Decimal,
    pub income_tax_rate_pct: Decimal,
    pub tax_exempt: bool,
}

impl YieldResult {
    pub fn total_tax(&self) -> Money {
        self.withholding_tax + self.income_tax
    }
}

/// Annualize a period return: ((1 + pct/100)^(365/days) - 1) * 100.
fn annualize_pct(period_pct: Decimal, term_days: u32) -> FinCalcResult<Decimal> {
    let exponent = DAYS_PER_YEAR / Decimal::from(term_days);
    let factor = growth_factor(period_pct / HUNDRED, exponent)?;
    factor
        .checked_sub(Decimal::ONE)
        .and_then(|v| v.checked_mul(HUNDRED))
        .ok_or_else(|| FinCalcError::overflow(format!("annualized rate over {term_days} days")))
}

/// (value / base - 1) * 100, failing on overflow.
fn pct_change(value: Money, base: Money, context: &str) -> FinCalcResult<Decimal> {
    value
        .checked_div(base)
        .and_then(|r| r.checked_sub(Decimal::ONE))
        .and_then(|r| r.checked_mul(HUNDRED))
        .ok_or_else(|| FinCalcError::overflow(context))
}

/// Gross and net outcome of a single investment.
///
/// IOF is charged on the gross yield first; IR is then charged on what
/// remains. All products compound on 365 calendar days.
pub fn calculate(inv: &Investment) -> FinCalcResult<YieldResult> {
    let principal = inv.principal();
    let days = inv.term_days();
    let exempt = inv.is_tax_exempt();

    // 1-2. Gross
    let exponent = Decimal::from(days) / DAYS_PER_YEAR;
    let gross_value = principal
        .checked_mul(growth_factor(inv.annual_rate(), exponent)?)
        .ok_or_else(|| FinCalcError::overflow(format!("gross value of '{}'", inv.label())))?;
    let gross_yield = gross_value - principal;

    // 3-4. IOF
    let iof_rate = withholding_tax_rate(i64::from(days));
    let withholding_tax = gross_yield * iof_rate;
    let yield_after_iof = gross_yield - withholding_tax;

    // 5-7. IR
    let ir_rate = income_tax_rate(i64::from(days), exempt);
    let income_tax = yield_after_iof * ir_rate;
    let net_yield = yield_after_iof - income_tax;
    let net_value = principal + net_yield;

    // 8. Period rates
    let gross_rate_pct = pct_change(gross_value, principal, "gross period rate")?;
    let net_rate_pct = pct_change(net_value, principal, "net period rate")?;

    // 9. Annualized
    let gross_annual_rate_pct = annualize_pct(gross_rate_pct, days)?;
    let net_annual_rate_pct = annualize_pct(net_rate_pct, days)?;

    debug!(
        label = inv.label(),
        days,
        %gross_value,
        %net_value,
        %iof_rate,
        %ir_rate,
        "calculated investment"
    );

    Ok(YieldResult {
        label: inv.label().to_string(),
        investment_type: inv.investment_type(),
        principal,
        term_days: days,
        gross_value,
        gross_yield,
        withholding_tax,
        income_tax,
        net_value,
        net_yield,
        gross_rate_pct,
        net_rate_pct,
        gross_annual_rate_pct,
        net_annual_rate_pct,
        withholding_tax_rate_pct: iof_rate * HUNDRED,
        income_tax_rate_pct: ir_rate * HUNDRED,
        tax_exempt: exempt,
    })
}

/// Results for every investment, best net period return first.
///
/// The sort is stable: equal net rates keep their input order.
pub fn compare(investments: &[Investment]) -> FinCalcResult<Vec<YieldResult>> {
    let mut results = investments
        .iter()
        .map(calculate)
        .collect::<FinCalcResult<Vec<_>>>()?;
    results.sort_by(|a, b| b.net_rate_pct.cmp(&a.net_rate_pct));
    debug!(count = results.len(), "ranked investments");
    Ok(results)
}

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

/// Gross period rate a taxable product needs over the same term to match
/// this result's net rate.
pub fn taxable_equivalent_rate_pct(result: &YieldResult) -> Decimal {
    let ir = income_tax_rate(i64::from(result.term_days), false);
    result.net_rate_pct / (Decimal::ONE - ir)
}

/// Net period return after discounting inflation over the term.
pub fn real_rate_pct(result: &YieldResult, inflation_annual: Rate) -> FinCalcResult<Decimal> {
    let exponent = Decimal::from(result.term_days) / DAYS_PER_YEAR;
    let inflation_factor = growth_factor(inflation_annual, exponent)?;
    let real_value = result
        .net_value
        .checked_div(inflation_factor)
        .ok_or_else(|| FinCalcError::overflow("inflation-adjusted value"))?;
    pct_change(real_value, result.principal, "real rate")
}

/// Net annualized rate expressed as a percentage of CDI.
pub fn cdi_equivalent_pct(result: &YieldResult, cdi_annual: Rate) -> FinCalcResult<Decimal> {
    if cdi_annual.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "CDI equivalent (CDI rate is zero)".into(),
        });
    }
    result
        .net_annual_rate_pct
        .checked_div(cdi_annual)
        .ok_or_else(|| FinCalcError::overflow("CDI equivalent"))
}
