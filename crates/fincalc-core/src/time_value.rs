use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound_factor(rate: Rate, periods: u32) -> FinCalcResult<Decimal> {
    let factor = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| FinCalcError::overflow("compound factor"))?;
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinCalcError::overflow(format!("compound factor over {periods} periods")))?;
    }
    Ok(result)
}

/// (1 + r)^t for a fractional exponent t.
pub fn growth_factor(rate: Rate, exponent: Decimal) -> FinCalcResult<Decimal> {
    let base = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| FinCalcError::overflow("growth factor"))?;
    if rate.is_zero() || exponent.is_zero() {
        return Ok(Decimal::ONE);
    }
    if base <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "rate",
            "Rate must be greater than -100% for fractional compounding",
        ));
    }
    if exponent == Decimal::ONE {
        return Ok(base);
    }
    base.checked_powd(exponent)
        .ok_or_else(|| FinCalcError::overflow(format!("growth factor (1 + {rate})^{exponent}")))
}

/// Present Value of a single future amount
pub fn present_value(future_value: Money, rate: Rate, periods: u32) -> FinCalcResult<Money> {
    let factor = compound_factor(rate, periods)?;
    if factor.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "PV discount factor".into(),
        });
    }
    Ok(future_value / factor)
}

/// Future Value of a single present amount
pub fn future_value(present_value: Money, rate: Rate, periods: u32) -> FinCalcResult<Money> {
    let factor = compound_factor(rate, periods)?;
    present_value
        .checked_mul(factor)
        .ok_or_else(|| FinCalcError::overflow("future value"))
}

/// Level payment that amortizes `principal` over `periods` (Price table installment).
pub fn pmt(rate: Rate, periods: u32, principal: Money) -> FinCalcResult<Money> {
    if periods == 0 {
        return Err(FinCalcError::DivisionByZero {
            context: "PMT number of periods".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .map(|v| v / denominator)
        .ok_or_else(|| FinCalcError::overflow("PMT"))
}

/// Convert a rate quoted over `from_days` into the equivalent rate over `to_days`.
pub fn equivalent_rate(rate: Rate, from_days: u32, to_days: u32) -> FinCalcResult<Rate> {
    if from_days == 0 {
        return Err(FinCalcError::DivisionByZero {
            context: "equivalent rate source period".into(),
        });
    }
    let exponent = Decimal::from(to_days) / Decimal::from(from_days);
    Ok(growth_factor(rate, exponent)? - Decimal::ONE)
}
