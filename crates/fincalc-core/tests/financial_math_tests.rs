#![cfg(feature = "financial_math")]

use fincalc_core::financial_math::amortization::{
    amortization_table, AmortizationInput, AmortizationSystem,
};
use fincalc_core::financial_math::interest::{compound_interest, simple_interest, InterestInput};
use fincalc_core::financial_math::returns::{break_even, return_on_investment, BreakEvenInput, RoiInput};
use fincalc_core::time_value;
use fincalc_core::FinCalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Interest and time value
// ---------------------------------------------------------------------------

#[test]
fn test_simple_and_compound_agree_for_one_period() {
    let input = InterestInput {
        capital: dec!(2500),
        rate: dec!(0.03),
        periods: 1,
    };
    let s = simple_interest(&input).unwrap().result;
    let c = compound_interest(&input).unwrap().result;
    assert_eq!(s.amount, c.amount);
}

#[test]
fn test_future_and_present_value_round_trip() {
    let fv = time_value::future_value(dec!(1000), dec!(0.01), 24).unwrap();
    assert!((fv - dec!(1269.73)).abs() < dec!(0.01), "fv {fv}");
    let pv = time_value::present_value(fv, dec!(0.01), 24).unwrap();
    assert!((pv - dec!(1000)).abs() < dec!(0.0000001));
}

#[test]
fn test_equivalent_daily_to_monthly() {
    // 0.1% a day over 30 days
    let r = time_value::equivalent_rate(dec!(0.001), 1, 30).unwrap();
    assert!((r - dec!(0.030439)).abs() < dec!(0.000001), "got {r}");
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[test]
fn test_price_total_interest_exceeds_sac() {
    let base = |system| AmortizationInput {
        principal: dec!(100000),
        rate: dec!(0.008),
        periods: 120,
        system,
    };
    let sac = amortization_table(&base(AmortizationSystem::Sac)).unwrap().result;
    let price = amortization_table(&base(AmortizationSystem::Price)).unwrap().result;
    assert!(price.total_interest > sac.total_interest);
    assert_eq!(sac.installments.len(), 120);
    assert_eq!(price.installments.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_amortization_rejects_zero_installments() {
    let err = amortization_table(&AmortizationInput {
        principal: dec!(1000),
        rate: dec!(0.01),
        periods: 0,
        system: AmortizationSystem::Sac,
    })
    .unwrap_err();
    assert!(matches!(err, FinCalcError::DivisionByZero { .. }));
}

#[test]
fn test_amortization_rejects_non_positive_principal() {
    let err = amortization_table(&AmortizationInput {
        principal: dec!(0),
        rate: dec!(0.01),
        periods: 12,
        system: AmortizationSystem::Price,
    })
    .unwrap_err();
    assert!(err.to_string().contains("principal"));
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[test]
fn test_roi_loss() {
    let out = return_on_investment(&RoiInput {
        gain: dec!(800),
        cost: dec!(1000),
    })
    .unwrap();
    assert_eq!(out.result.roi_pct, dec!(-20));
}

#[test]
fn test_break_even_zero_margin_fails() {
    let err = break_even(&BreakEvenInput {
        fixed_costs: dec!(5000),
        unit_price: dec!(12),
        unit_variable_cost: dec!(12),
    })
    .unwrap_err();
    assert!(err.to_string().starts_with("Division by zero"));
}
