//! Tax and personal-finance calculations.
//!
//! [`progressive_bracket_tax`] and [`SelfEmploymentTax`] are the engine;
//! everything under [`calculators`] composes them with different rate sets
//! and post-processing.

pub mod brackets;
pub mod calculators;
pub mod common;
pub mod payroll_tax;
pub mod self_emp;

#[cfg(test)]
pub(crate) mod test_support;

pub use brackets::{BracketAmount, BracketTaxResult, progressive_bracket_tax};
pub use payroll_tax::{PayrollTaxBreakdown, payroll_tax};
pub use self_emp::{SelfEmploymentTax, SelfEmploymentTaxComputation, TaxCalculationResult};
