//! Social Security + Medicare tax over a single earnings base.
//!
//! Self-employment tax and employee FICA withholding differ only in their
//! base (92.35% of net profit vs. gross wages) and in their
//! [`PayrollTaxRates`]; both go through [`payroll_tax`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::PayrollTaxRates;
use crate::calculations::common::max;

/// Unrounded payroll tax components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxBreakdown {
    /// Social security tax, capped at the wage base.
    pub social_security: Decimal,

    /// Medicare tax on the whole base.
    pub medicare: Decimal,

    /// Additional Medicare tax on the base above the threshold.
    pub additional_medicare: Decimal,

    pub total: Decimal,
}

/// Applies `rates` to `base`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::PayrollTaxRates;
/// use fincalc_core::calculations::payroll_tax;
///
/// let rates = PayrollTaxRates {
///     ss_wage_max: dec!(176100),
///     ss_tax_rate: dec!(0.062),
///     medicare_tax_rate: dec!(0.0145),
///     additional_medicare_rate: dec!(0.009),
///     additional_medicare_threshold: dec!(200000),
/// };
///
/// let tax = payroll_tax(dec!(60000), &rates);
///
/// assert_eq!(tax.social_security, dec!(3720));
/// assert_eq!(tax.medicare, dec!(870));
/// assert_eq!(tax.total, dec!(4590));
/// ```
pub fn payroll_tax(
    base: Decimal,
    rates: &PayrollTaxRates,
) -> PayrollTaxBreakdown {
    if base < Decimal::ZERO {
        warn!(
            base = %base,
            "Payroll tax base is negative; no payroll tax applies"
        );
        return PayrollTaxBreakdown {
            social_security: Decimal::ZERO,
            medicare: Decimal::ZERO,
            additional_medicare: Decimal::ZERO,
            total: Decimal::ZERO,
        };
    }

    let social_security = base.min(rates.ss_wage_max) * rates.ss_tax_rate;
    let medicare = base * rates.medicare_tax_rate;
    let additional_medicare = max(
        base - rates.additional_medicare_threshold,
        Decimal::ZERO,
    ) * rates.additional_medicare_rate;

    PayrollTaxBreakdown {
        social_security,
        medicare,
        additional_medicare,
        total: social_security + medicare + additional_medicare,
    }
}
