//! Single-member LLC vs. S-Corp election.
//!
//! An LLC owner pays SE tax on all profit. An S-Corp owner pays FICA (both
//! halves) on a reasonable salary only; the rest comes out as a
//! distribution that bears no payroll tax, at the price of a fixed annual
//! administration cost.
//!
//! There is no S-Corp without a salary, so a salary that resolves to zero
//! (including the default at an income of 1) gives no comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::brackets::progressive_bracket_tax;
use crate::calculations::common::{max, round_whole};
use crate::calculations::self_emp::SelfEmploymentTax;
use crate::{SCorpAssumptions, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlcTaxResult {
    pub se_tax: Decimal,
    pub federal_tax: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SCorpTaxResult {
    pub salary: Decimal,

    /// Profit paid out beyond salary and employer FICA, floored at zero.
    pub distribution: Decimal,

    pub employee_fica: Decimal,
    pub employer_fica: Decimal,
    pub total_fica: Decimal,
    pub federal_tax: Decimal,
    pub admin_cost: Decimal,

    /// FICA + federal tax + admin cost.
    pub total_tax: Decimal,

    pub net_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityComparison {
    pub income: Decimal,
    pub llc: LlcTaxResult,
    pub s_corp: SCorpTaxResult,

    /// `llc.total_tax − s_corp.total_tax`.
    pub savings: Decimal,

    /// Whether the savings exceed the S-Corp admin cost.
    pub worth_it: bool,
}

/// Reasonable salary used when the caller does not supply one.
pub fn default_salary(
    income: Decimal,
    assumptions: &SCorpAssumptions,
) -> Decimal {
    round_whole(income * assumptions.default_salary_share)
}

/// Compares LLC and S-Corp tax on `income`.
///
/// `salary` of `None` falls back to [`default_salary`]. Returns `None` when
/// the resolved salary is not positive.
pub fn compare_llc_vs_scorp(
    income: Decimal,
    salary: Option<Decimal>,
    config: &TaxYearConfig,
    assumptions: &SCorpAssumptions,
) -> Option<EntityComparison> {
    let salary = salary.unwrap_or_else(|| default_salary(income, assumptions));
    if salary <= Decimal::ZERO {
        debug!(income = %income, salary = %salary, "No S-Corp salary; skipping comparison");
        return None;
    }
    if salary > income {
        warn!(
            income = %income,
            salary = %salary,
            "S-Corp salary exceeds income; distribution will be zero"
        );
    }

    let llc = llc_tax(income, config);
    let s_corp = s_corp_tax(income, salary, config, assumptions);
    let savings = llc.total_tax - s_corp.total_tax;

    Some(EntityComparison {
        income,
        worth_it: savings > assumptions.admin_cost,
        llc,
        s_corp,
        savings,
    })
}

fn llc_tax(
    income: Decimal,
    config: &TaxYearConfig,
) -> LlcTaxResult {
    let se = SelfEmploymentTax::from_config(config).calculate(income);

    LlcTaxResult {
        se_tax: se.total_se_tax,
        federal_tax: se.federal_tax,
        net_income: income - se.total_tax,
        total_tax: se.total_tax,
    }
}

fn s_corp_tax(
    income: Decimal,
    salary: Decimal,
    config: &TaxYearConfig,
    assumptions: &SCorpAssumptions,
) -> SCorpTaxResult {
    let employee_fica = salary * assumptions.employee_fica_rate;
    let employer_fica = salary * assumptions.employer_fica_rate;
    let total_fica = employee_fica + employer_fica;

    // Employer FICA is paid out of profit before distribution.
    let distribution = income - salary - employer_fica;

    let taxable_income = max(
        salary + distribution - config.standard_deduction(),
        Decimal::ZERO,
    );
    let federal_tax = progressive_bracket_tax(taxable_income, &config.brackets).tax;

    let total_tax = total_fica + federal_tax + assumptions.admin_cost;

    SCorpTaxResult {
        salary,
        distribution: round_whole(max(distribution, Decimal::ZERO)),
        employee_fica: round_whole(employee_fica),
        employer_fica: round_whole(employer_fica),
        total_fica: round_whole(total_fica),
        federal_tax: round_whole(federal_tax),
        admin_cost: assumptions.admin_cost,
        total_tax: round_whole(total_tax),
        net_income: round_whole(income - total_tax),
    }
}
