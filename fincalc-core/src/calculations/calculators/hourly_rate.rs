//! Freelance hourly rate needed to reach a take-home income target.
//!
//! The required gross is solved forward from the effective tax rate at the
//! *target* income, not at the solved gross. Because the gross is higher
//! than the target, the true effective rate is higher too, so the result
//! understates the rate actually needed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{percentage, round_whole};
use crate::calculations::self_emp::SelfEmploymentTax;
use crate::{HourlyRateAssumptions, TaxYearConfig};

/// Inputs to [`calculate_hourly_rate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRateTarget {
    /// Desired income after tax and expenses.
    pub target_income: Decimal,

    /// Working weeks per year; 0 uses the configured default.
    pub weeks_per_year: u32,

    /// Working hours per week; 0 uses the configured default.
    pub hours_per_week: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRateResult {
    pub target_income: Decimal,

    /// SE + federal tax on the target income.
    pub total_tax: Decimal,

    /// `total_tax / target_income` as a percentage, one decimal place.
    pub effective_tax_rate: String,

    /// Worked hours × utilization.
    pub billable_hours: Decimal,

    pub gross_needed: Decimal,

    /// Rate that only covers the target, ignoring tax and expenses.
    pub break_even_rate: Decimal,

    pub min_hourly_rate: Decimal,

    /// Minimum rate × buffer.
    pub recommended_rate: Decimal,

    pub annual_at_recommended: Decimal,
}

pub fn calculate_hourly_rate(
    target: &HourlyRateTarget,
    config: &TaxYearConfig,
    assumptions: &HourlyRateAssumptions,
) -> HourlyRateResult {
    let target_income = target.target_income;
    let weeks = match target.weeks_per_year {
        0 => assumptions.default_weeks_per_year,
        w => w,
    };
    let hours = match target.hours_per_week {
        0 => assumptions.default_hours_per_week,
        h => h,
    };

    let total_tax = SelfEmploymentTax::from_config(config)
        .calculate(target_income)
        .total_tax;
    let effective_tax_rate = if target_income > Decimal::ZERO {
        total_tax / target_income
    } else {
        Decimal::ZERO
    };

    let billable_hours = Decimal::from(weeks) * Decimal::from(hours) * assumptions.utilization_rate;

    let keep_rate = Decimal::ONE - effective_tax_rate - assumptions.expense_rate;
    let gross_needed = if keep_rate > Decimal::ZERO {
        target_income / keep_rate
    } else {
        warn!(
            effective_tax_rate = %effective_tax_rate,
            expense_rate = %assumptions.expense_rate,
            "Tax and expenses consume all income; no gross can reach the target"
        );
        Decimal::ZERO
    };

    let per_hour = |amount: Decimal| {
        if billable_hours > Decimal::ZERO {
            amount / billable_hours
        } else {
            Decimal::ZERO
        }
    };
    let min_hourly_rate = per_hour(gross_needed);
    let break_even_rate = per_hour(target_income);
    let recommended_rate = min_hourly_rate * assumptions.rate_buffer;

    HourlyRateResult {
        target_income,
        total_tax,
        effective_tax_rate: percentage(total_tax, target_income, 1),
        billable_hours: round_whole(billable_hours),
        gross_needed: round_whole(gross_needed),
        break_even_rate: round_whole(break_even_rate),
        min_hourly_rate: round_whole(min_hourly_rate),
        recommended_rate: round_whole(recommended_rate),
        annual_at_recommended: round_whole(recommended_rate * billable_hours),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::test_support::{assumptions, config_2025};

    fn target(
        income: Decimal,
        weeks: u32,
        hours: u32,
    ) -> HourlyRateTarget {
        HourlyRateTarget {
            target_income: income,
            weeks_per_year: weeks,
            hours_per_week: hours,
        }
    }

    #[test]
    fn rate_for_100k_target() {
        let result = calculate_hourly_rate(
            &target(dec!(100000), 48, 40),
            &config_2025(),
            &assumptions().hourly_rate,
        );

        assert_eq!(
            result,
            HourlyRateResult {
                target_income: dec!(100000),
                total_tax: dec!(26189),
                effective_tax_rate: "26.2".to_string(),
                billable_hours: dec!(1440),
                // 100000 / (1 − 0.26189 − 0.10)
                gross_needed: dec!(156713),
                break_even_rate: dec!(69),
                min_hourly_rate: dec!(109),
                recommended_rate: dec!(131),
                annual_at_recommended: dec!(188055),
            }
        );
    }

    #[test]
    fn zero_weeks_and_hours_use_defaults() {
        let with_defaults = calculate_hourly_rate(
            &target(dec!(80000), 0, 0),
            &config_2025(),
            &assumptions().hourly_rate,
        );
        let explicit = calculate_hourly_rate(
            &target(dec!(80000), 48, 40),
            &config_2025(),
            &assumptions().hourly_rate,
        );

        assert_eq!(with_defaults, explicit);
    }

    #[test]
    fn fewer_hours_raise_the_rate() {
        let full_time = calculate_hourly_rate(
            &target(dec!(80000), 48, 40),
            &config_2025(),
            &assumptions().hourly_rate,
        );
        let part_time = calculate_hourly_rate(
            &target(dec!(80000), 48, 20),
            &config_2025(),
            &assumptions().hourly_rate,
        );

        assert!(part_time.recommended_rate > full_time.recommended_rate);
        assert_eq!(part_time.gross_needed, full_time.gross_needed);
    }

    #[test]
    fn zero_target_is_all_zero() {
        let result = calculate_hourly_rate(
            &target(dec!(0), 48, 40),
            &config_2025(),
            &assumptions().hourly_rate,
        );

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_tax_rate, "0.0");
        assert_eq!(result.gross_needed, dec!(0));
        assert_eq!(result.recommended_rate, dec!(0));
    }

    #[test]
    fn expenses_consuming_everything_yield_zero_gross() {
        let hourly = HourlyRateAssumptions {
            expense_rate: dec!(0.95),
            ..assumptions().hourly_rate
        };

        let result = calculate_hourly_rate(&target(dec!(100000), 48, 40), &config_2025(), &hourly);

        assert_eq!(result.gross_needed, dec!(0));
        assert_eq!(result.min_hourly_rate, dec!(0));
        assert_eq!(result.break_even_rate, dec!(69));
    }
}
