use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::time_value::pmt;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationSystem {
    /// Sistema de Amortização Constante: equal principal repayments.
    Sac,
    /// Tabela Price: level installments.
    Price,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    /// Rate per period, decimal
    pub rate: Rate,
    pub periods: u32,
    pub system: AmortizationSystem,
}

/// One row of the table. Values are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub payment: Money,
    pub interest: Money,
    pub amortization: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub system: AmortizationSystem,
    pub principal: Money,
    pub rate: Rate,
    pub periods: u32,
    pub installments: Vec<Installment>,
    /// Totals are sums of the rounded rows.
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_amortization: Money,
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

fn row(number: u32, payment: Money, interest: Money, amortization: Money, balance: Money) -> Installment {
    Installment {
        number,
        payment: payment.round_dp(2),
        interest: interest.round_dp(2),
        amortization: amortization.round_dp(2),
        balance: balance.max(Decimal::ZERO).round_dp(2),
    }
}

/// SAC rows: constant amortization, interest on the running balance.
pub fn sac_schedule(principal: Money, rate: Rate, periods: u32) -> FinCalcResult<Vec<Installment>> {
    if periods == 0 {
        return Err(FinCalcError::DivisionByZero {
            context: "SAC amortization (zero installments)".into(),
        });
    }
    let amortization = principal / Decimal::from(periods);
    let mut balance = principal;
    let mut rows = Vec::with_capacity(periods as usize);

    for n in 1..=periods {
        let interest = balance * rate;
        balance -= amortization;
        rows.push(row(n, amortization + interest, interest, amortization, balance));
    }
    Ok(rows)
}

/// Price rows: level installment, amortization grows as interest falls.
pub fn price_schedule(principal: Money, rate: Rate, periods: u32) -> FinCalcResult<Vec<Installment>> {
    if periods == 0 {
        return Err(FinCalcError::DivisionByZero {
            context: "Price amortization (zero installments)".into(),
        });
    }
    let payment = pmt(rate, periods, principal)?;
    let mut balance = principal;
    let mut rows = Vec::with_capacity(periods as usize);

    for n in 1..=periods {
        let interest = balance * rate;
        let amortization = payment - interest;
        balance -= amortization;
        rows.push(row(n, payment, interest, amortization, balance));
    }
    Ok(rows)
}

/// Build an amortization table with totals.
pub fn amortization_table(
    input: &AmortizationInput,
) -> FinCalcResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.principal <= Decimal::ZERO {
        return Err(FinCalcError::invalid("principal", "Loan amount must be positive"));
    }
    if input.rate < Decimal::ZERO {
        return Err(FinCalcError::invalid("rate", "Interest rate cannot be negative"));
    }
    if input.rate.is_zero() && input.system == AmortizationSystem::Price {
        warnings.push("Zero rate: Price installments reduce to principal / periods".to_string());
    }

    let installments = match input.system {
        AmortizationSystem::Sac => sac_schedule(input.principal, input.rate, input.periods)?,
        AmortizationSystem::Price => price_schedule(input.principal, input.rate, input.periods)?,
    };

    let total_payment: Money = installments.iter().map(|i| i.payment).sum();
    let total_interest: Money = installments.iter().map(|i| i.interest).sum();
    let total_amortization: Money = installments.iter().map(|i| i.amortization).sum();

    let result = AmortizationOutput {
        system: input.system,
        principal: input.principal,
        rate: input.rate,
        periods: input.periods,
        installments,
        total_payment,
        total_interest,
        total_amortization,
    };

    let methodology = match input.system {
        AmortizationSystem::Sac => "SAC: amortization = P / n, interest on outstanding balance",
        AmortizationSystem::Price => "Price: installment = P * i(1+i)^n / ((1+i)^n - 1)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, result))
}
