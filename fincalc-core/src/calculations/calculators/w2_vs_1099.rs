//! Side-by-side tax on the same gross income earned as a W-2 employee or as
//! a 1099 contractor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxYearConfig;
use crate::calculations::calculators::paycheck::employee_tax;
use crate::calculations::common::{percentage, round_whole};
use crate::calculations::self_emp::SelfEmploymentTax;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2TaxResult {
    pub gross_income: Decimal,

    /// Employee social security + Medicare.
    pub fica: Decimal,

    pub federal_tax: Decimal,
    pub total_tax: Decimal,
    pub net_pay: Decimal,
    pub effective_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorTaxResult {
    pub gross_income: Decimal,
    pub se_tax: Decimal,
    pub federal_tax: Decimal,
    pub total_tax: Decimal,
    pub net_pay: Decimal,
    pub effective_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2Vs1099Comparison {
    pub w2: W2TaxResult,
    pub contractor: ContractorTaxResult,

    /// How much more a W-2 employee keeps (`w2.net_pay − contractor.net_pay`).
    pub net_pay_difference: Decimal,

    /// Contract income needed to match the W-2 take-home, as a whole
    /// percentage of the W-2 salary (e.g. `"105"`).
    pub break_even_rate: String,
}

/// Compares W-2 and 1099 tax on `gross_income`.
///
/// For any positive income the contractor pays more, since SE tax carries
/// the employer half of FICA that a W-2 employer would otherwise pay.
pub fn compare_w2_vs_1099(
    gross_income: Decimal,
    config: &TaxYearConfig,
) -> W2Vs1099Comparison {
    let employee = employee_tax(gross_income, config);
    let w2 = W2TaxResult {
        gross_income,
        fica: round_whole(employee.fica.total),
        federal_tax: round_whole(employee.federal_tax),
        total_tax: round_whole(employee.total_tax),
        net_pay: round_whole(gross_income - employee.total_tax),
        effective_rate: percentage(employee.total_tax, gross_income, 1),
    };

    let se = SelfEmploymentTax::from_config(config).compute(gross_income);
    let contractor = ContractorTaxResult {
        gross_income,
        se_tax: round_whole(se.total_se_tax),
        federal_tax: round_whole(se.federal_tax),
        total_tax: round_whole(se.total_tax),
        net_pay: round_whole(gross_income - se.total_tax),
        effective_rate: percentage(se.total_tax, gross_income, 1),
    };

    let net_pay_difference = w2.net_pay - contractor.net_pay;
    let break_even_rate = percentage(gross_income + net_pay_difference, gross_income, 0);

    W2Vs1099Comparison {
        w2,
        contractor,
        net_pay_difference,
        break_even_rate,
    }
}
