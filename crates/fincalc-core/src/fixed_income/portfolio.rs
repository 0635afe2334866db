use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::investment::{Investment, InvestmentType};
use super::rates::{cdi_linked_rate, inflation_linked_rate, savings_rate};
use crate::types::{Money, Rate};
use crate::FinCalcResult;

/// Reference market rates, all annual decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRates {
    pub cdi_annual: Rate,
    pub selic_annual: Rate,
    /// Expected IPCA over the term
    pub ipca_annual: Rate,
}

impl Default for MarketRates {
    fn default() -> Self {
        Self {
            cdi_annual: dec!(0.1065),
            selic_annual: dec!(0.1075),
            ipca_annual: dec!(0.048),
        }
    }
}

/// What each product on the shelf is offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOffers {
    /// Percent of CDI (110 = 110%)
    pub cdb_pct_of_cdi: Decimal,
    pub lci_pct_of_cdi: Decimal,
    pub lca_pct_of_cdi: Decimal,
    /// Real spread over IPCA, decimal
    pub ipca_spread: Rate,
    /// Tesouro Prefixado annual rate, decimal
    pub prefixed_rate: Rate,
}

impl Default for ProductOffers {
    fn default() -> Self {
        Self {
            cdb_pct_of_cdi: dec!(110),
            lci_pct_of_cdi: dec!(92),
            lca_pct_of_cdi: dec!(93),
            ipca_spread: dec!(0.065),
            prefixed_rate: dec!(0.145),
        }
    }
}

/// The seven standard products evaluated for the same principal and term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardPortfolio {
    pub principal: Money,
    pub term_days: u32,
    #[serde(default)]
    pub market: MarketRates,
    #[serde(default)]
    pub offers: ProductOffers,
}

impl StandardPortfolio {
    /// R$ 10,000 for one year at the default market rates and offers.
    pub fn example() -> Self {
        Self {
            principal: dec!(10000),
            term_days: 365,
            market: MarketRates::default(),
            offers: ProductOffers::default(),
        }
    }

    pub fn investments(&self) -> FinCalcResult<Vec<Investment>> {
        let m = &self.market;
        let o = &self.offers;
        let build = |kind: InvestmentType, rate: Rate, label: String| {
            Investment::new(kind, self.principal, self.term_days, rate).map(|i| i.with_label(label))
        };

        Ok(vec![
            build(
                InvestmentType::Cdb,
                cdi_linked_rate(m.cdi_annual, o.cdb_pct_of_cdi),
                format!("CDB {:.0}% CDI", o.cdb_pct_of_cdi),
            )?,
            build(
                InvestmentType::Lci,
                cdi_linked_rate(m.cdi_annual, o.lci_pct_of_cdi),
                format!("LCI {:.0}% CDI (IR exempt)", o.lci_pct_of_cdi),
            )?,
            build(
                InvestmentType::Lca,
                cdi_linked_rate(m.cdi_annual, o.lca_pct_of_cdi),
                format!("LCA {:.0}% CDI (IR exempt)", o.lca_pct_of_cdi),
            )?,
            build(
                InvestmentType::TreasurySelic,
                m.selic_annual,
                "Tesouro Selic".to_string(),
            )?,
            build(
                InvestmentType::TreasuryIpca,
                inflation_linked_rate(m.ipca_annual, o.ipca_spread),
                format!("Tesouro IPCA+ {:.2}%", o.ipca_spread * dec!(100)),
            )?,
            build(
                InvestmentType::TreasuryPrefixed,
                o.prefixed_rate,
                format!("Tesouro Prefixado {:.2}%", o.prefixed_rate * dec!(100)),
            )?,
            build(
                InvestmentType::Savings,
                savings_rate(m.selic_annual),
                "Poupança (IR exempt)".to_string(),
            )?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_builds_seven_products_in_order() {
        let invs = StandardPortfolio::example().investments().unwrap();
        let kinds: Vec<_> = invs.iter().map(|i| i.investment_type()).collect();
        assert_eq!(kinds, InvestmentType::ALL.to_vec());
        assert_eq!(invs[0].label(), "CDB 110% CDI");
        assert_eq!(invs[0].annual_rate(), dec!(0.11715));
        assert_eq!(invs[4].label(), "Tesouro IPCA+ 6.50%");
        assert_eq!(invs[5].label(), "Tesouro Prefixado 14.50%");
    }

    #[test]
    fn test_invalid_principal_propagates() {
        let mut p = StandardPortfolio::example();
        p.principal = Decimal::ZERO;
        assert!(p.investments().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let p: StandardPortfolio =
            serde_json::from_str(r#"{"principal":"5000","term_days":180}"#).unwrap();
        assert_eq!(p.market, MarketRates::default());
        assert_eq!(p.offers.lci_pct_of_cdi, dec!(92));
    }
}
