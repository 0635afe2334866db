use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use fincalc_core::arithmetic::parse_expression;
use fincalc_core::with_metadata;

/// Arguments for a one-line calculation
#[derive(Args)]
pub struct CalcArgs {
    /// Expression such as `12,5 * 3`; shell-quote `*` or use `x`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
    pub expression: Vec<String>,
}

#[derive(Serialize)]
struct Evaluated {
    expression: String,
    value: Decimal,
}

pub fn run_calc(args: CalcArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let line = args.expression.join(" ");
    let expression = parse_expression(&line)?;
    let value = expression.evaluate()?;
    tracing::debug!(%line, %value, "evaluated expression");

    let output = with_metadata(
        "Decimal arithmetic",
        &json!({ "operator": expression.op.symbol().to_string() }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        Evaluated {
            expression: format!("{} {} {}", expression.lhs, expression.op, expression.rhs),
            value,
        },
    );
    Ok(serde_json::to_value(output)?)
}
