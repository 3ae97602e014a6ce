//! Take-home pay for a W-2 salary.
//!
//! Employee FICA (6.2% social security up to the wage base, 1.45% Medicare,
//! 0.9% additional Medicare over $200,000) and federal income tax on
//! `salary − standard deduction` are computed on an annual basis and then
//! split evenly across pay periods.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxYearConfig;
use crate::calculations::brackets::progressive_bracket_tax;
use crate::calculations::common::{max, percentage, round_half_up, round_whole};
use crate::calculations::payroll_tax::{PayrollTaxBreakdown, payroll_tax};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    Weekly,
    Biweekly,
    #[serde(rename = "semimonthly")]
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub const ALL: [PayFrequency; 4] = [
        Self::Weekly,
        Self::Biweekly,
        Self::SemiMonthly,
        Self::Monthly,
    ];

    /// Pay periods per year.
    pub fn periods(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Biweekly => 26,
            Self::SemiMonthly => 24,
            Self::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::SemiMonthly => "semimonthly",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::SemiMonthly => "Semi-monthly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for PayFrequency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annual, unrounded tax on W-2 wages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaxComputation {
    pub salary: Decimal,
    pub fica: PayrollTaxBreakdown,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,

    /// FICA + federal tax.
    pub total_tax: Decimal,
}

/// Employee FICA and federal income tax on an annual `salary`.
pub fn employee_tax(
    salary: Decimal,
    config: &TaxYearConfig,
) -> EmployeeTaxComputation {
    let rates = config
        .employee_fica
        .payroll_rates(config.self_employment.ss_wage_max);
    let fica = payroll_tax(salary, &rates);

    let taxable_income = max(salary - config.standard_deduction(), Decimal::ZERO);
    let federal_tax = progressive_bracket_tax(taxable_income, &config.brackets).tax;
    let total_tax = fica.total + federal_tax;

    EmployeeTaxComputation {
        salary,
        fica,
        taxable_income,
        federal_tax,
        total_tax,
    }
}

/// Per-period paycheck. Per-period amounts are in cents; annual amounts in
/// whole units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckResult {
    pub frequency: PayFrequency,
    pub gross_pay: Decimal,
    pub social_security: Decimal,

    /// Medicare including any additional Medicare.
    pub medicare: Decimal,

    pub federal_tax: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    pub annual_gross: Decimal,
    pub annual_net: Decimal,

    /// (FICA + federal tax) as a percentage of salary, one decimal place.
    pub effective_rate: String,
}

/// Splits the annual tax on `annual_salary` across pay periods.
///
/// Every per-period figure is derived from unrounded annual amounts, so
/// `net_pay` may differ by a cent from `gross_pay − total_deductions`.
pub fn calculate_paycheck(
    annual_salary: Decimal,
    frequency: PayFrequency,
    config: &TaxYearConfig,
) -> PaycheckResult {
    let annual = employee_tax(annual_salary, config);
    let periods = Decimal::from(frequency.periods());

    let gross_per_period = annual_salary / periods;
    let ss_per_period = annual.fica.social_security / periods;
    let medicare_per_period = (annual.fica.medicare + annual.fica.additional_medicare) / periods;
    let federal_per_period = annual.federal_tax / periods;
    let deductions_per_period = annual.fica.total / periods + federal_per_period;
    let net_per_period = gross_per_period - deductions_per_period;

    PaycheckResult {
        frequency,
        gross_pay: round_half_up(gross_per_period),
        social_security: round_half_up(ss_per_period),
        medicare: round_half_up(medicare_per_period),
        federal_tax: round_half_up(federal_per_period),
        total_deductions: round_half_up(deductions_per_period),
        net_pay: round_half_up(net_per_period),
        annual_gross: annual_salary,
        annual_net: round_whole(net_per_period * periods),
        effective_rate: percentage(annual.total_tax, annual_salary, 1),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::test_support::config_2025;

    #[test]
    fn frequency_periods() {
        let periods: Vec<u32> = PayFrequency::ALL.iter().map(|f| f.periods()).collect();

        assert_eq!(periods, vec![52, 26, 24, 12]);
    }

    #[test]
    fn frequency_parse_accepts_ids() {
        assert_eq!(PayFrequency::parse("biweekly"), Some(PayFrequency::Biweekly));
        assert_eq!(
            PayFrequency::parse("semimonthly"),
            Some(PayFrequency::SemiMonthly)
        );
        assert_eq!(PayFrequency::parse("daily"), None);
    }

    #[test]
    fn employee_tax_on_60k() {
        let tax = employee_tax(dec!(60000), &config_2025());

        assert_eq!(tax.fica.social_security, dec!(3720));
        assert_eq!(tax.fica.medicare, dec!(870));
        assert_eq!(tax.fica.additional_medicare, dec!(0));
        assert_eq!(tax.taxable_income, dec!(45000));
        // 1192.50 + (45000 − 11925) × 12%
        assert_eq!(tax.federal_tax, dec!(5161.50));
        assert_eq!(tax.total_tax, dec!(9751.50));
    }

    #[test]
    fn employee_tax_caps_social_security_at_wage_base() {
        let tax = employee_tax(dec!(300000), &config_2025());

        assert_eq!(tax.fica.social_security, dec!(10918.20));
        assert_eq!(tax.fica.additional_medicare, dec!(900));
    }

    #[test]
    fn monthly_paycheck_on_60k() {
        let result = calculate_paycheck(dec!(60000), PayFrequency::Monthly, &config_2025());

        assert_eq!(result.gross_pay, dec!(5000));
        assert_eq!(result.social_security, dec!(310));
        assert_eq!(result.medicare, dec!(72.50));
        assert_eq!(result.federal_tax, dec!(430.13));
        assert_eq!(result.total_deductions, dec!(812.63));
        assert_eq!(result.net_pay, dec!(4187.38));
        assert_eq!(result.annual_gross, dec!(60000));
        assert_eq!(result.annual_net, dec!(50249));
        assert_eq!(result.effective_rate, "16.3");
    }

    #[test]
    fn biweekly_paycheck_rounds_to_cents() {
        let result = calculate_paycheck(dec!(60000), PayFrequency::Biweekly, &config_2025());

        assert_eq!(result.gross_pay, dec!(2307.69));
        assert_eq!(result.social_security, dec!(143.08));
        assert_eq!(result.medicare, dec!(33.46));
        assert_eq!(result.federal_tax, dec!(198.52));
        assert_eq!(result.total_deductions, dec!(375.06));
        assert_eq!(result.net_pay, dec!(1932.63));
    }

    #[test]
    fn paycheck_medicare_includes_additional_medicare() {
        let result = calculate_paycheck(dec!(240000), PayFrequency::Monthly, &config_2025());

        // (240000 × 1.45% + 40000 × 0.9%) / 12
        assert_eq!(result.medicare, dec!(320));
    }

    #[test]
    fn zero_salary_paycheck_is_all_zero() {
        let result = calculate_paycheck(dec!(0), PayFrequency::Weekly, &config_2025());

        assert_eq!(result.net_pay, dec!(0));
        assert_eq!(result.annual_net, dec!(0));
        assert_eq!(result.effective_rate, "0.0");
    }
}
