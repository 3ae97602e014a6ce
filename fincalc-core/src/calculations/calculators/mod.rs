//! Calculators built on the shared tax engine.
//!
//! Each takes plain amounts plus the year's [`TaxYearConfig`](crate::TaxYearConfig)
//! (and, where needed, [`CalculatorAssumptions`](crate::CalculatorAssumptions))
//! and returns a flat result record. None of them fail: degenerate inputs
//! produce zero amounts.

pub mod dui_insurance;
pub mod hourly_rate;
pub mod llc_vs_scorp;
pub mod paycheck;
pub mod quarterly;
pub mod w2_vs_1099;

pub use dui_insurance::{InsuranceImpact, project_insurance_impact};
pub use hourly_rate::{HourlyRateResult, HourlyRateTarget, calculate_hourly_rate};
pub use llc_vs_scorp::{
    EntityComparison, LlcTaxResult, SCorpTaxResult, compare_llc_vs_scorp, default_salary,
};
pub use paycheck::{EmployeeTaxComputation, PayFrequency, PaycheckResult, calculate_paycheck, employee_tax};
pub use quarterly::{QuarterlyPlan, current_quarter, plan_quarterly_payments};
pub use w2_vs_1099::{ContractorTaxResult, W2TaxResult, W2Vs1099Comparison, compare_w2_vs_1099};
