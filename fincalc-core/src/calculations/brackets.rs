//! Progressive (marginal-rate) federal income tax.
//!
//! Walks a [`BracketSchedule`] from the bottom up, filling each bracket with
//! as much of the remaining taxable income as it can hold and taxing that
//! slice at the bracket's rate. Brackets above the income are never touched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::BracketSchedule;
use crate::calculations::common::round_whole;

/// Tax attributed to one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAmount {
    /// Marginal rate as a percentage (`22` for 22%).
    pub rate: Decimal,

    /// Tax on the slice of income inside this bracket, in whole units.
    pub amount: Decimal,
}

/// Result of [`progressive_bracket_tax`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    /// Total tax, unrounded.
    pub tax: Decimal,

    /// One entry per bracket the income reached, lowest first.
    pub per_bracket: Vec<BracketAmount>,
}

/// Computes marginal-bracket tax on `taxable_income`.
///
/// Income at or below zero owes nothing and records no brackets; callers
/// clamp negative taxable income before calling.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::{BracketSchedule, TaxBracket};
/// use fincalc_core::calculations::progressive_bracket_tax;
///
/// let schedule = BracketSchedule::new(vec![
///     TaxBracket { min_income: dec!(0), max_income: Some(dec!(11925)), tax_rate: dec!(0.10) },
///     TaxBracket { min_income: dec!(11925), max_income: Some(dec!(48475)), tax_rate: dec!(0.12) },
///     TaxBracket { min_income: dec!(48475), max_income: None, tax_rate: dec!(0.22) },
/// ])
/// .unwrap();
///
/// let result = progressive_bracket_tax(dec!(30000), &schedule);
///
/// // 11925 × 10% + (30000 − 11925) × 12%
/// assert_eq!(result.tax, dec!(3361.50));
/// assert_eq!(result.per_bracket.len(), 2);
/// ```
pub fn progressive_bracket_tax(
    taxable_income: Decimal,
    schedule: &BracketSchedule,
) -> BracketTaxResult {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut per_bracket = Vec::new();

    for bracket in schedule.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable_in_bracket = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax_in_bracket = taxable_in_bracket * bracket.tax_rate;

        tax += tax_in_bracket;
        per_bracket.push(BracketAmount {
            rate: bracket.tax_rate * Decimal::ONE_HUNDRED,
            amount: round_whole(tax_in_bracket),
        });
        remaining -= taxable_in_bracket;
    }

    debug!(
        taxable_income = %taxable_income,
        tax = %tax,
        brackets_used = per_bracket.len(),
        "computed progressive bracket tax"
    );

    BracketTaxResult { tax, per_bracket }
}
