use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    /// Certificado de Depósito Bancário
    Cdb,
    /// Letra de Crédito Imobiliário
    Lci,
    /// Letra de Crédito do Agronegócio
    Lca,
    #[serde(alias = "tesouro_selic")]
    TreasurySelic,
    #[serde(alias = "tesouro_ipca")]
    TreasuryIpca,
    #[serde(alias = "tesouro_prefixado")]
    TreasuryPrefixed,
    #[serde(alias = "poupanca")]
    Savings,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 7] = [
        InvestmentType::Cdb,
        InvestmentType::Lci,
        InvestmentType::Lca,
        InvestmentType::TreasurySelic,
        InvestmentType::TreasuryIpca,
        InvestmentType::TreasuryPrefixed,
        InvestmentType::Savings,
    ];

    /// Individual investors pay no IR on LCI, LCA and Poupança.
    pub fn is_tax_exempt(self) -> bool {
        matches!(
            self,
            InvestmentType::Lci | InvestmentType::Lca | InvestmentType::Savings
        )
    }

    /// Money-market products conventionally accrue on 252 business days.
    pub fn is_money_market(self) -> bool {
        matches!(
            self,
            InvestmentType::Cdb
                | InvestmentType::Lci
                | InvestmentType::Lca
                | InvestmentType::TreasurySelic
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            InvestmentType::Cdb => "CDB",
            InvestmentType::Lci => "LCI",
            InvestmentType::Lca => "LCA",
            InvestmentType::TreasurySelic => "Tesouro Selic",
            InvestmentType::TreasuryIpca => "Tesouro IPCA+",
            InvestmentType::TreasuryPrefixed => "Tesouro Prefixado",
            InvestmentType::Savings => "Poupança",
        }
    }
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

/// A validated investment. Construct with [`Investment::new`] or deserialize;
/// both reject a non-positive principal or term and a negative rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvestmentInput")]
pub struct Investment {
    investment_type: InvestmentType,
    principal: Money,
    term_days: u32,
    annual_rate: Rate,
    label: String,
}

/// Unvalidated wire form of an [`Investment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub investment_type: InvestmentType,
    pub principal: Money,
    pub term_days: u32,
    /// Effective annual rate as a decimal (0.1065 = 10.65% a.a.)
    pub annual_rate: Rate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TryFrom<InvestmentInput> for Investment {
    type Error = FinCalcError;

    fn try_from(input: InvestmentInput) -> FinCalcResult<Self> {
        let inv = Investment::new(
            input.investment_type,
            input.principal,
            input.term_days,
            input.annual_rate,
        )?;
        Ok(match input.label {
            Some(label) => inv.with_label(label),
            None => inv,
        })
    }
}

impl Investment {
    pub fn new(
        investment_type: InvestmentType,
        principal: Money,
        term_days: u32,
        annual_rate: Rate,
    ) -> FinCalcResult<Self> {
        if principal <= Decimal::ZERO {
            return Err(FinCalcError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if term_days == 0 {
            return Err(FinCalcError::invalid(
                "term_days",
                "Term must be at least one day",
            ));
        }
        if annual_rate < Decimal::ZERO {
            return Err(FinCalcError::invalid(
                "annual_rate",
                "Annual rate cannot be negative",
            ));
        }
        Ok(Self {
            investment_type,
            principal,
            term_days,
            annual_rate,
            label: investment_type.label().to_string(),
        })
    }

    /// Replace the display label. A blank label keeps the type's name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.label = label;
        }
        self
    }

    pub fn investment_type(&self) -> InvestmentType {
        self.investment_type
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn term_days(&self) -> u32 {
        self.term_days
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_tax_exempt(&self) -> bool {
        self.investment_type.is_tax_exempt()
    }
}
