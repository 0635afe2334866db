use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// Total amount returned by the investment
    pub gain: Money,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiOutput {
    pub gain: Money,
    pub cost: Money,
    pub profit: Money,
    pub roi_pct: Decimal,
}

/// Return on investment: (gain - cost) / cost.
pub fn return_on_investment(input: &RoiInput) -> FinCalcResult<ComputationOutput<RoiOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.cost.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "ROI (investment cost is zero)".into(),
        });
    }
    if input.cost < Decimal::ZERO {
        warnings.push("Negative cost: ROI sign is inverted".to_string());
    }

    let profit = input
        .gain
        .checked_sub(input.cost)
        .ok_or_else(|| FinCalcError::overflow("ROI profit"))?;
    let roi_pct = profit
        .checked_div(input.cost)
        .and_then(|r| r.checked_mul(dec!(100)))
        .ok_or_else(|| FinCalcError::overflow("ROI percentage"))?;
    let result = RoiOutput {
        gain: input.gain,
        cost: input.cost,
        profit,
        roi_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ROI = (gain - cost) / cost",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: Money,
    pub unit_price: Money,
    pub unit_variable_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    pub fixed_costs: Money,
    pub unit_price: Money,
    pub unit_variable_cost: Money,
    pub contribution_margin: Money,
    pub break_even_units: Decimal,
    pub break_even_revenue: Money,
}

/// Units (and revenue) at which contribution margin covers fixed costs.
pub fn break_even(input: &BreakEvenInput) -> FinCalcResult<ComputationOutput<BreakEvenOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let margin = input
        .unit_price
        .checked_sub(input.unit_variable_cost)
        .ok_or_else(|| FinCalcError::overflow("contribution margin"))?;
    if margin.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "break-even (unit price equals unit variable cost)".into(),
        });
    }
    if margin < Decimal::ZERO {
        warnings.push(
            "Variable cost exceeds price: every unit sold deepens the loss, break-even is unreachable"
                .to_string(),
        );
    }

    let units = input
        .fixed_costs
        .checked_div(margin)
        .ok_or_else(|| FinCalcError::overflow("break-even units"))?;
    let revenue = units
        .checked_mul(input.unit_price)
        .ok_or_else(|| FinCalcError::overflow("break-even revenue"))?;
    let result = BreakEvenOutput {
        fixed_costs: input.fixed_costs,
        unit_price: input.unit_price,
        unit_variable_cost: input.unit_variable_cost,
        contribution_margin: margin,
        break_even_units: units,
        break_even_revenue: revenue,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Break-even units = fixed costs / (price - variable cost)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_basic() {
        let out = return_on_investment(&RoiInput {
            gain: dec!(1500),
            cost: dec!(1000),
        })
        .unwrap();
        assert_eq!(out.result.profit, dec!(500));
        assert_eq!(out.result.roi_pct, dec!(50));
    }

    #[test]
    fn test_roi_zero_cost() {
        let err = return_on_investment(&RoiInput {
            gain: dec!(10),
            cost: dec!(0),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Division by zero"));
    }

    #[test]
    fn test_break_even_basic() {
        let out = break_even(&BreakEvenInput {
            fixed_costs: dec!(10000),
            unit_price: dec!(50),
            unit_variable_cost: dec!(30),
        })
        .unwrap();
        assert_eq!(out.result.break_even_units, dec!(500));
        assert_eq!(out.result.break_even_revenue, dec!(25000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_break_even_zero_margin() {
        assert!(matches!(
            break_even(&BreakEvenInput {
                fixed_costs: dec!(1000),
                unit_price: dec!(20),
                unit_variable_cost: dec!(20),
            }),
            Err(FinCalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_break_even_negative_margin_warns() {
        let out = break_even(&BreakEvenInput {
            fixed_costs: dec!(1000),
            unit_price: dec!(10),
            unit_variable_cost: dec!(20),
        })
        .unwrap();
        assert!(out.result.break_even_units < Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_roi_tiny_cost_is_overflow() {
        let err = return_on_investment(&RoiInput {
            gain: dec!(1000000000000000000000000000),
            cost: dec!(0.0001),
        })
        .unwrap_err();
        assert!(matches!(err, FinCalcError::Overflow { .. }), "got {err:?}");
    }

    #[test]
    fn test_break_even_tiny_margin_is_overflow() {
        let err = break_even(&BreakEvenInput {
            fixed_costs: dec!(1000000000000000000000000000),
            unit_price: dec!(0.001),
            unit_variable_cost: dec!(0),
        })
        .unwrap_err();
        assert!(matches!(err, FinCalcError::Overflow { .. }), "got {err:?}");
    }
}
