use rust_decimal::Decimal;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::{
    calculate, cdi_equivalent_pct, compare, real_rate_pct, taxable_equivalent_rate_pct,
    YieldResult,
};
use super::investment::{Investment, InvestmentInput};
use super::portfolio::{MarketRates, StandardPortfolio};
use super::tax_tables::{income_tax_rate, IOF_FREE_FROM_DAY};
use crate::types::{with_metadata, ComputationOutput};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Either an explicit list of investments or the standard seven-product shelf.
///
/// A document with an `investments` key is read as the explicit list, anything
/// else as a portfolio, so field errors surface from the chosen shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ComparisonInput {
    Explicit {
        investments: Vec<InvestmentInput>,
        market: Option<MarketRates>,
    },
    Standard(StandardPortfolio),
}

#[derive(Deserialize)]
struct ExplicitComparison {
    investments: Vec<InvestmentInput>,
    #[serde(default)]
    market: Option<MarketRates>,
}

impl<'de> Deserialize<'de> for ComparisonInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("investments").is_some() {
            let explicit = ExplicitComparison::deserialize(value).map_err(D::Error::custom)?;
            Ok(ComparisonInput::Explicit {
                investments: explicit.investments,
                market: explicit.market,
            })
        } else {
            StandardPortfolio::deserialize(value)
                .map(ComparisonInput::Standard)
                .map_err(D::Error::custom)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: usize,
    #[serde(flatten)]
    pub result: YieldResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_rate_pct: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdi_equivalent_pct: Option<Decimal>,
}

/// Gross rate a taxable product would need to match an exempt one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxableEquivalent {
    pub label: String,
    pub net_rate_pct: Decimal,
    pub income_tax_rate_pct: Decimal,
    pub taxable_equivalent_rate_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub ranking: Vec<RankedResult>,
    pub best: Option<String>,
    pub taxable_equivalents: Vec<TaxableEquivalent>,
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn term_warnings(inv: &Investment, warnings: &mut Vec<String>) {
    if i64::from(inv.term_days()) < IOF_FREE_FROM_DAY {
        warnings.push(format!(
            "{}: redeemed before day {IOF_FREE_FROM_DAY}, IOF applies to the yield",
            inv.label()
        ));
    }
    if inv.investment_type().is_money_market() {
        warnings.push(format!(
            "{}: accrued on 365 calendar days; the market convention is 252 business days",
            inv.label()
        ));
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Calculate one investment, wrapped with methodology and warnings.
pub fn analyze_investment(inv: &Investment) -> FinCalcResult<ComputationOutput<YieldResult>> {
    let start = Instant::now();
    let mut warnings = Vec::new();
    term_warnings(inv, &mut warnings);

    let result = calculate(inv)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound growth on a 365-day base; IOF on gross yield, then regressive IR on the remainder",
        inv,
        warnings,
        elapsed,
        result,
    ))
}

/// Rank investments by net period return and derive comparison metrics.
pub fn compare_investments(
    input: &ComparisonInput,
) -> FinCalcResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let (investments, market) = match input {
        ComparisonInput::Explicit {
            investments,
            market,
        } => (
            investments
                .iter()
                .cloned()
                .map(Investment::try_from)
                .collect::<FinCalcResult<Vec<_>>>()?,
            market.clone(),
        ),
        ComparisonInput::Standard(portfolio) => {
            (portfolio.investments()?, Some(portfolio.market.clone()))
        }
    };

    if investments.is_empty() {
        warnings.push("No investments to compare".to_string());
    }
    // Term warnings once per distinct message
    for inv in &investments {
        let mut local = Vec::new();
        term_warnings(inv, &mut local);
        for w in local {
            if !warnings.contains(&w) {
                warnings.push(w);
            }
        }
    }

    let results = compare(&investments)?;

    let mut ranking = Vec::with_capacity(results.len());
    for (i, result) in results.into_iter().enumerate() {
        let (real, cdi_eq) = match &market {
            Some(m) => (
                Some(real_rate_pct(&result, m.ipca_annual)?),
                if m.cdi_annual.is_zero() {
                    None
                } else {
                    Some(cdi_equivalent_pct(&result, m.cdi_annual)?)
                },
            ),
            None => (None, None),
        };
        ranking.push(RankedResult {
            rank: i + 1,
            result,
            real_rate_pct: real,
            cdi_equivalent_pct: cdi_eq,
        });
    }

    let taxable_equivalents = ranking
        .iter()
        .filter(|r| r.result.tax_exempt)
        .map(|r| TaxableEquivalent {
            label: r.result.label.clone(),
            net_rate_pct: r.result.net_rate_pct,
            income_tax_rate_pct: income_tax_rate(i64::from(r.result.term_days), false)
                * Decimal::ONE_HUNDRED,
            taxable_equivalent_rate_pct: taxable_equivalent_rate_pct(&r.result),
        })
        .collect();

    let output = ComparisonOutput {
        best: ranking.first().map(|r| r.result.label.clone()),
        ranking,
        taxable_equivalents,
    };

    let assumptions = serde_json::json!({
        "investments": investments,
        "market": market,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Independent yield calculation per investment, ranked by net period return (descending)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_income::investment::InvestmentType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_example_comparison() {
        let input = ComparisonInput::Standard(StandardPortfolio::example());
        let out = compare_investments(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.ranking.len(), 7);
        assert_eq!(r.ranking[0].rank, 1);
        assert_eq!(r.best.as_deref(), Some(r.ranking[0].result.label.as_str()));
        // LCI, LCA, Poupança
        assert_eq!(r.taxable_equivalents.len(), 3);
        assert!(r.ranking.iter().all(|x| x.real_rate_pct.is_some()));
    }

    #[test]
    fn test_explicit_without_market_has_no_real_rate() {
        let input = ComparisonInput::Explicit {
            investments: vec![InvestmentInput {
                investment_type: InvestmentType::TreasuryPrefixed,
                principal: dec!(1000),
                term_days: 400,
                annual_rate: dec!(0.12),
                label: None,
            }],
            market: None,
        };
        let out = compare_investments(&input).unwrap();
        assert!(out.result.ranking[0].real_rate_pct.is_none());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_short_term_warns_about_iof() {
        let inv = Investment::new(InvestmentType::Cdb, dec!(1000), 10, dec!(0.1)).unwrap();
        let out = analyze_investment(&inv).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("IOF")));
        assert!(out.warnings.iter().any(|w| w.contains("252")));
    }

    #[test]
    fn test_invalid_explicit_investment_names_field() {
        let input: ComparisonInput = serde_json::from_str(
            r#"{"investments":[{"investment_type":"cdb","principal":"1000","term_days":0,"annual_rate":"0.1"}]}"#,
        )
        .unwrap();
        let err = compare_investments(&input).unwrap_err();
        assert!(err.to_string().contains("term_days"), "got {err}");
    }

    #[test]
    fn test_empty_comparison() {
        let input = ComparisonInput::Explicit {
            investments: vec![],
            market: None,
        };
        let out = compare_investments(&input).unwrap();
        assert!(out.result.ranking.is_empty());
        assert!(out.result.best.is_none());
    }

    #[test]
    fn test_untagged_input_parses_both_shapes() {
        let standard: ComparisonInput =
            serde_json::from_str(r#"{"principal":"1000","term_days":90}"#).unwrap();
        assert!(matches!(standard, ComparisonInput::Standard(_)));

        let explicit: ComparisonInput = serde_json::from_str(
            r#"{"investments":[{"investment_type":"cdb","principal":"1000","term_days":90,"annual_rate":"0.1"}]}"#,
        )
        .unwrap();
        assert!(matches!(explicit, ComparisonInput::Explicit { .. }));
    }

    #[test]
    fn test_malformed_explicit_entry_reports_missing_field() {
        let err = serde_json::from_str::<ComparisonInput>(
            r#"{"investments":[{"investment_type":"cdb","principal":"1000","term_days":90}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("annual_rate"), "got {err}");
    }

    #[test]
    fn test_malformed_portfolio_reports_missing_field() {
        let err = serde_json::from_str::<ComparisonInput>(r#"{"principal":"1000"}"#).unwrap_err();
        assert!(err.to_string().contains("term_days"), "got {err}");
    }
}
