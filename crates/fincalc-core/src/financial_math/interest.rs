use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::compound_factor;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    pub capital: Money,
    /// Rate per period, decimal
    pub rate: Rate,
    pub periods: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestOutput {
    pub capital: Money,
    pub rate: Rate,
    pub periods: u32,
    pub interest: Money,
    pub amount: Money,
}

fn warnings_for(input: &InterestInput) -> Vec<String> {
    let mut warnings = Vec::new();
    if input.rate < Decimal::ZERO {
        warnings.push("Negative rate: the amount shrinks over time".to_string());
    }
    if input.periods == 0 {
        warnings.push("Zero periods: no interest accrues".to_string());
    }
    warnings
}

/// Simple interest: J = C * i * n.
pub fn simple_interest(input: &InterestInput) -> FinCalcResult<ComputationOutput<InterestOutput>> {
    let start = Instant::now();
    let warnings = warnings_for(input);

    let interest = input
        .capital
        .checked_mul(input.rate)
        .and_then(|v| v.checked_mul(Decimal::from(input.periods)))
        .ok_or_else(|| FinCalcError::overflow("simple interest"))?;

    let result = InterestOutput {
        capital: input.capital,
        rate: input.rate,
        periods: input.periods,
        interest,
        amount: input.capital + interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple interest J = C * i * n",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Compound interest: M = C * (1 + i)^n.
pub fn compound_interest(
    input: &InterestInput,
) -> FinCalcResult<ComputationOutput<InterestOutput>> {
    let start = Instant::now();
    let warnings = warnings_for(input);

    let amount = input
        .capital
        .checked_mul(compound_factor(input.rate, input.periods)?)
        .ok_or_else(|| FinCalcError::overflow("compound interest"))?;

    let result = InterestOutput {
        capital: input.capital,
        rate: input.rate,
        periods: input.periods,
        interest: amount - input.capital,
        amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound interest M = C * (1 + i)^n",
        input,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(capital: Money, rate: Rate, periods: u32) -> InterestInput {
        InterestInput {
            capital,
            rate,
            periods,
        }
    }

    #[test]
    fn test_simple_interest() {
        let out = simple_interest(&input(dec!(1000), dec!(0.05), 12)).unwrap();
        assert_eq!(out.result.interest, dec!(600));
        assert_eq!(out.result.amount, dec!(1600));
    }

    #[test]
    fn test_compound_interest() {
        let out = compound_interest(&input(dec!(1000), dec!(0.10), 2)).unwrap();
        assert_eq!(out.result.amount, dec!(1210));
        assert_eq!(out.result.interest, dec!(210));
    }

    #[test]
    fn test_compound_beats_simple_after_one_period() {
        let i = input(dec!(1000), dec!(0.02), 24);
        let s = simple_interest(&i).unwrap().result;
        let c = compound_interest(&i).unwrap().result;
        assert!(c.amount > s.amount);
    }

    #[test]
    fn test_zero_periods_warns() {
        let out = simple_interest(&input(dec!(1000), dec!(0.05), 0)).unwrap();
        assert_eq!(out.result.interest, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }
}
