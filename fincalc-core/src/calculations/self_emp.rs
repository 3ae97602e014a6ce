//! Self-employment tax and the federal income tax owed on 1099 income.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net earnings: gross income × 92.35% (net earnings factor) |
//! | 2    | Social security tax: min(net earnings, wage base) × 12.4% |
//! | 3    | Medicare tax: net earnings × 2.9% |
//! | 4    | Additional Medicare: net earnings above $200,000 × 0.9% |
//! | 5    | SE tax: steps 2 + 3 + 4 |
//! | 6    | SE deduction: SE tax × 50% |
//! | 7    | Taxable income: gross − SE deduction − standard deduction, floored at 0 |
//! | 8    | Federal tax: progressive brackets on step 7 |
//! | 9    | Total tax (5 + 8), quarterly payment, effective rate |
//!
//! Every step works on unrounded values. Rounding to whole units happens
//! once, when [`SelfEmploymentTaxComputation::rounded`] builds the
//! [`TaxCalculationResult`]; rounding earlier changes totals for some inputs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fincalc_core::calculations::SelfEmploymentTax;
//! # use fincalc_core::{BracketSchedule, SeTaxParameters, TaxBracket};
//! # let params = SeTaxParameters {
//! #     ss_wage_max: dec!(176100),
//! #     ss_tax_rate: dec!(0.124),
//! #     medicare_tax_rate: dec!(0.029),
//! #     additional_medicare_rate: dec!(0.009),
//! #     additional_medicare_threshold: dec!(200000),
//! #     net_earnings_factor: dec!(0.9235),
//! #     deduction_factor: dec!(0.5),
//! #     standard_deduction: dec!(15000),
//! # };
//! # let schedule = BracketSchedule::new(vec![
//! #     TaxBracket { min_income: dec!(0), max_income: Some(dec!(11925)), tax_rate: dec!(0.10) },
//! #     TaxBracket { min_income: dec!(11925), max_income: Some(dec!(48475)), tax_rate: dec!(0.12) },
//! #     TaxBracket { min_income: dec!(48475), max_income: None, tax_rate: dec!(0.22) },
//! # ]).unwrap();
//!
//! let result = SelfEmploymentTax::new(&params, &schedule).calculate(dec!(100000));
//!
//! assert_eq!(result.net_earnings, dec!(92350));
//! assert_eq!(result.total_se_tax, dec!(14130));
//! assert_eq!(result.taxable_income, dec!(77935));
//! assert_eq!(result.total_tax, dec!(26189));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::brackets::{BracketAmount, progressive_bracket_tax};
use crate::calculations::common::{max, percentage, round_whole};
use crate::calculations::payroll_tax::payroll_tax;
use crate::{BracketSchedule, SeTaxParameters, TaxYearConfig};

/// Self-employment tax breakdown with every monetary field in whole units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub gross_income: Decimal,

    /// Gross income × net earnings factor.
    pub net_earnings: Decimal,

    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub additional_medicare: Decimal,

    /// Social security + Medicare + additional Medicare.
    pub total_se_tax: Decimal,

    /// Deductible half of SE tax.
    pub se_deduction: Decimal,

    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub total_tax: Decimal,

    /// One quarter of the total tax.
    pub quarterly_payment: Decimal,

    /// Total tax as a percentage of gross income, one decimal place.
    pub effective_rate: String,

    /// Federal tax per bracket reached, lowest bracket first.
    pub brackets: Vec<BracketAmount>,
}

/// The same breakdown as [`TaxCalculationResult`], before rounding.
///
/// `total_tax == total_se_tax + federal_tax` holds exactly here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentTaxComputation {
    pub gross_income: Decimal,
    pub net_earnings: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub additional_medicare: Decimal,
    pub total_se_tax: Decimal,
    pub se_deduction: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub total_tax: Decimal,
    pub quarterly_payment: Decimal,
    pub brackets: Vec<BracketAmount>,
}

impl SelfEmploymentTaxComputation {
    /// Rounds every monetary field to whole units.
    pub fn rounded(&self) -> TaxCalculationResult {
        TaxCalculationResult {
            gross_income: self.gross_income,
            net_earnings: round_whole(self.net_earnings),
            social_security_tax: round_whole(self.social_security_tax),
            medicare_tax: round_whole(self.medicare_tax),
            additional_medicare: round_whole(self.additional_medicare),
            total_se_tax: round_whole(self.total_se_tax),
            se_deduction: round_whole(self.se_deduction),
            standard_deduction: self.standard_deduction,
            taxable_income: round_whole(self.taxable_income),
            federal_tax: round_whole(self.federal_tax),
            total_tax: round_whole(self.total_tax),
            quarterly_payment: round_whole(self.quarterly_payment),
            effective_rate: percentage(self.total_tax, self.gross_income, 1),
            brackets: self.brackets.clone(),
        }
    }
}

/// Calculator for self-employment (1099) income.
///
/// Borrows the year's parameters and bracket schedule; it holds no other
/// state, so a single instance can serve any number of calculations.
#[derive(Debug, Clone, Copy)]
pub struct SelfEmploymentTax<'a> {
    params: &'a SeTaxParameters,
    schedule: &'a BracketSchedule,
}

impl<'a> SelfEmploymentTax<'a> {
    pub fn new(
        params: &'a SeTaxParameters,
        schedule: &'a BracketSchedule,
    ) -> Self {
        Self { params, schedule }
    }

    pub fn from_config(config: &'a TaxYearConfig) -> Self {
        Self::new(&config.self_employment, &config.brackets)
    }

    /// Calculates the rounded breakdown for `gross_income`.
    pub fn calculate(
        &self,
        gross_income: Decimal,
    ) -> TaxCalculationResult {
        self.compute(gross_income).rounded()
    }

    /// Calculates the unrounded breakdown for `gross_income`.
    ///
    /// Derived calculators that post-process SE tax work from this so they
    /// round only once.
    pub fn compute(
        &self,
        gross_income: Decimal,
    ) -> SelfEmploymentTaxComputation {
        // Step 1
        let net_earnings = self.net_earnings(gross_income);

        // Steps 2-5
        let se_tax = payroll_tax(net_earnings, &self.params.payroll_rates());

        // Step 6
        let se_deduction = se_tax.total * self.params.deduction_factor;

        // Step 7
        let taxable_income = self.taxable_income(gross_income, se_deduction);

        // Step 8
        let federal = progressive_bracket_tax(taxable_income, self.schedule);

        // Step 9
        let total_tax = se_tax.total + federal.tax;

        debug!(
            gross_income = %gross_income,
            se_tax = %se_tax.total,
            federal_tax = %federal.tax,
            total_tax = %total_tax,
            "computed self-employment tax"
        );

        SelfEmploymentTaxComputation {
            gross_income,
            net_earnings,
            social_security_tax: se_tax.social_security,
            medicare_tax: se_tax.medicare,
            additional_medicare: se_tax.additional_medicare,
            total_se_tax: se_tax.total,
            se_deduction,
            standard_deduction: self.params.standard_deduction,
            taxable_income,
            federal_tax: federal.tax,
            total_tax,
            quarterly_payment: total_tax / Decimal::from(4),
            brackets: federal.per_bracket,
        }
    }

    fn net_earnings(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        let net_earnings = gross_income * self.params.net_earnings_factor;

        if net_earnings < Decimal::ZERO {
            warn!(
                gross_income = %gross_income,
                net_earnings_factor = %self.params.net_earnings_factor,
                net_earnings = %net_earnings,
                "Net earnings from self-employment is negative"
            );
        }

        net_earnings
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        se_deduction: Decimal,
    ) -> Decimal {
        let taxable = gross_income - se_deduction - self.params.standard_deduction;

        if taxable < Decimal::ZERO {
            debug!(
                gross_income = %gross_income,
                se_deduction = %se_deduction,
                standard_deduction = %self.params.standard_deduction,
                "Deductions exceed income; taxable income floored at zero"
            );
        }

        max(taxable, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::test_support::{config_2025, init_test_tracing};

    // =========================================================================
    // End-to-end scenarios
    // =========================================================================

    #[test]
    fn calculate_100k_scenario() {
        let config = config_2025();

        let result = SelfEmploymentTax::from_config(&config).calculate(dec!(100000));

        assert_eq!(result.gross_income, dec!(100000));
        assert_eq!(result.net_earnings, dec!(92350));
        assert_eq!(result.social_security_tax, dec!(11451));
        assert_eq!(result.medicare_tax, dec!(2678));
        assert_eq!(result.additional_medicare, dec!(0));
        assert_eq!(result.total_se_tax, dec!(14130));
        assert_eq!(result.se_deduction, dec!(7065));
        assert_eq!(result.standard_deduction, dec!(15000));
        assert_eq!(result.taxable_income, dec!(77935));
        assert_eq!(result.federal_tax, dec!(12060));
        assert_eq!(result.total_tax, dec!(26189));
        assert_eq!(result.quarterly_payment, dec!(6547));
        assert_eq!(result.effective_rate, "26.2");
        assert_eq!(
            result.brackets,
            vec![
                BracketAmount {
                    rate: dec!(10),
                    amount: dec!(1193),
                },
                BracketAmount {
                    rate: dec!(12),
                    amount: dec!(4386),
                },
                BracketAmount {
                    rate: dec!(22),
                    amount: dec!(6481),
                },
            ]
        );
    }

    #[test]
    fn compute_100k_scenario_is_unrounded() {
        let config = config_2025();

        let computation = SelfEmploymentTax::from_config(&config).compute(dec!(100000));

        assert_eq!(computation.social_security_tax, dec!(11451.40));
        assert_eq!(computation.medicare_tax, dec!(2678.15));
        assert_eq!(computation.total_se_tax, dec!(14129.55));
        assert_eq!(computation.se_deduction, dec!(7064.775));
        assert_eq!(computation.taxable_income, dec!(77935.225));
        assert_eq!(computation.federal_tax, dec!(12059.7495));
        assert_eq!(computation.total_tax, dec!(26189.2995));
    }

    #[test]
    fn zero_income_owes_nothing() {
        let config = config_2025();

        let result = SelfEmploymentTax::from_config(&config).calculate(dec!(0));

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.quarterly_payment, dec!(0));
        assert_eq!(result.effective_rate, "0.0");
        assert!(result.brackets.is_empty());
    }

    #[test]
    fn income_below_standard_deduction_owes_only_se_tax() {
        let config = config_2025();

        let result = SelfEmploymentTax::from_config(&config).calculate(dec!(10000));

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
        // 9235 × 15.3% = 1412.955
        assert_eq!(result.total_se_tax, dec!(1413));
        assert_eq!(result.total_tax, dec!(1413));
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    #[test]
    fn total_reconciles_exactly_before_rounding() {
        let config = config_2025();
        let calculator = SelfEmploymentTax::from_config(&config);

        for income in [0, 1, 400, 15000, 48475, 100000, 176100, 250000, 1234567] {
            let c = calculator.compute(Decimal::from(income));
            assert_eq!(c.total_tax, c.total_se_tax + c.federal_tax);
            assert_eq!(c.quarterly_payment * Decimal::from(4), c.total_tax);
        }
    }

    #[test]
    fn rounded_total_is_within_one_unit_of_component_sum() {
        let config = config_2025();
        let calculator = SelfEmploymentTax::from_config(&config);

        for income in [1, 999, 52000, 100000, 333333, 987654] {
            let r = calculator.calculate(Decimal::from(income));
            let drift = (r.total_tax - (r.total_se_tax + r.federal_tax)).abs();
            assert!(drift <= Decimal::ONE, "drift {drift} at income {income}");
        }
    }

    #[test]
    fn social_security_never_exceeds_cap() {
        let config = config_2025();
        let calculator = SelfEmploymentTax::from_config(&config);
        let cap = round_whole(dec!(176100) * dec!(0.124));

        // 190690 × 0.9235 = 176102.215, just over the wage base
        for income in [190690, 500000, 5000000, 50000000] {
            let result = calculator.calculate(Decimal::from(income));
            assert_eq!(result.social_security_tax, cap, "at income {income}");
        }

        for income in (0..=190000).step_by(9500) {
            let result = calculator.calculate(Decimal::from(income));
            assert!(result.social_security_tax <= cap, "above cap at income {income}");
        }
    }

    #[test]
    fn social_security_below_wage_base_is_uncapped() {
        let config = config_2025();
        let result = SelfEmploymentTax::from_config(&config).calculate(dec!(190000));

        // 175465 × 12.4%
        assert_eq!(result.social_security_tax, dec!(21758));
    }

    #[test]
    fn additional_medicare_starts_above_threshold() {
        let config = config_2025();
        let calculator = SelfEmploymentTax::from_config(&config);

        // Net earnings of exactly 200000 require gross of 200000 / 0.9235.
        let at_threshold = calculator.compute(dec!(200000) / dec!(0.9235));
        let above = calculator.compute(dec!(300000));

        assert!(at_threshold.additional_medicare <= dec!(0.0000001));
        // (277050 − 200000) × 0.9%
        assert_eq!(above.additional_medicare, dec!(693.45));
    }

    #[test]
    fn calculate_is_idempotent() {
        let config = config_2025();
        let calculator = SelfEmploymentTax::from_config(&config);

        assert_eq!(
            calculator.calculate(dec!(87654)),
            calculator.calculate(dec!(87654))
        );
    }

    #[test]
    fn negative_income_logs_and_owes_nothing() {
        let _guard = init_test_tracing();
        let config = config_2025();

        let result = SelfEmploymentTax::from_config(&config).calculate(dec!(-5000));

        assert_eq!(result.total_se_tax, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
        assert_eq!(result.effective_rate, "0.0");
    }
}
