pub mod analysis;
pub mod engine;
pub mod investment;
pub mod portfolio;
pub mod rates;
pub mod tax_tables;
pub mod term;

pub use analysis::{analyze_investment, compare_investments, ComparisonInput, ComparisonOutput};
pub use engine::{calculate, compare, YieldResult};
pub use investment::{Investment, InvestmentInput, InvestmentType};
pub use rates::Indexer;
pub use tax_tables::{income_tax_rate, withholding_tax_rate};
