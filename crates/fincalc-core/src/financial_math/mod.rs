pub mod amortization;
pub mod interest;
pub mod returns;
