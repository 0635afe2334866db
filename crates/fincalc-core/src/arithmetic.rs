use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinCalcError;
use crate::FinCalcResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = FinCalcError;

    fn from_str(s: &str) -> FinCalcResult<Self> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "x" | "X" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(FinCalcError::UnknownOperator(other.to_string())),
        }
    }
}

/// Apply `op` to two operands.
pub fn evaluate(lhs: Decimal, op: Operator, rhs: Decimal) -> FinCalcResult<Decimal> {
    let value = match op {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Subtract => lhs.checked_sub(rhs),
        Operator::Multiply => lhs.checked_mul(rhs),
        Operator::Divide => {
            if rhs.is_zero() {
                return Err(FinCalcError::DivisionByZero {
                    context: format!("{lhs} / {rhs}"),
                });
            }
            lhs.checked_div(rhs)
        }
    };
    value.ok_or_else(|| FinCalcError::overflow(format!("{lhs} {op} {rhs}")))
}

/// Parse an operand, accepting a comma as decimal separator.
pub fn parse_number(raw: &str) -> FinCalcResult<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| FinCalcError::InvalidInput {
        field: "operand".into(),
        reason: format!("'{}' is not a number", raw.trim()),
    })
}

/// A parsed `lhs op rhs` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub lhs: Decimal,
    pub op: Operator,
    pub rhs: Decimal,
}

impl Expression {
    pub fn evaluate(&self) -> FinCalcResult<Decimal> {
        evaluate(self.lhs, self.op, self.rhs)
    }
}

/// Split an infix expression such as `12,5 * 3` or `-4-2`.
///
/// The operator is the first `+ - * x /` that follows a digit; a leading sign
/// belongs to the first operand.
pub fn parse_expression(line: &str) -> FinCalcResult<Expression> {
    let line = line.trim();
    let mut prev_is_digit = false;

    for (i, c) in line.char_indices() {
        if prev_is_digit && matches!(c, '+' | '-' | '*' | 'x' | 'X' | '/') {
            let op = Operator::from_str(&line[i..i + c.len_utf8()])?;
            let lhs = parse_number(&line[..i])?;
            let rhs = parse_number(&line[i + c.len_utf8()..])?;
            return Ok(Expression { lhs, op, rhs });
        }
        if !c.is_whitespace() {
            prev_is_digit = c.is_ascii_digit() || c == '.' || c == ',';
        }
    }

    Err(FinCalcError::InvalidInput {
        field: "expression".into(),
        reason: format!("'{line}' is not of the form <number> <operator> <number>"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate(dec!(2), Operator::Add, dec!(3)).unwrap(), dec!(5));
        assert_eq!(evaluate(dec!(2), Operator::Subtract, dec!(3)).unwrap(), dec!(-1));
        assert_eq!(evaluate(dec!(2.5), Operator::Multiply, dec!(4)).unwrap(), dec!(10));
        assert_eq!(evaluate(dec!(9), Operator::Divide, dec!(4)).unwrap(), dec!(2.25));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            evaluate(dec!(1), Operator::Divide, dec!(0)),
            Err(FinCalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            "%".parse::<Operator>(),
            Err(FinCalcError::UnknownOperator(_))
        ));
    }

    #[test]
    fn test_parse_expression_variants() {
        let e = parse_expression("12,5 * 3").unwrap();
        assert_eq!(e.lhs, dec!(12.5));
        assert_eq!(e.op, Operator::Multiply);
        assert_eq!(e.evaluate().unwrap(), dec!(37.5));

        let e = parse_expression("-4-2").unwrap();
        assert_eq!(e.lhs, dec!(-4));
        assert_eq!(e.op, Operator::Subtract);
        assert_eq!(e.rhs, dec!(2));

        let e = parse_expression("10 / -2").unwrap();
        assert_eq!(e.evaluate().unwrap(), dec!(-5));

        assert_eq!(parse_expression("3x4").unwrap().evaluate().unwrap(), dec!(12));
    }

    #[test]
    fn test_parse_expression_rejects_garbage() {
        assert!(parse_expression("hello").is_err());
        assert!(parse_expression("5").is_err());
        assert!(parse_expression("5 + abc").is_err());
    }
}
