use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PayrollTaxRates;

/// Errors reported by [`SeTaxParameters::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeTaxParametersError {
    /// The net earnings factor must be between 0 and 1 (exclusive of 0).
    #[error("net earnings factor must be between 0 and 1, got {0}")]
    InvalidNetEarningsFactor(Decimal),

    /// The social security tax rate must be between 0 and 1.
    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    /// The Medicare tax rate must be between 0 and 1.
    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    /// The additional Medicare tax rate must be between 0 and 1.
    #[error("additional medicare tax rate must be between 0 and 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    /// The additional Medicare threshold must be non-negative.
    #[error("additional medicare threshold must be non-negative, got {0}")]
    InvalidAdditionalMedicareThreshold(Decimal),

    /// The deduction factor must be between 0 and 1.
    #[error("deduction factor must be between 0 and 1, got {0}")]
    InvalidDeductionFactor(Decimal),

    /// The social security wage maximum must be positive.
    #[error("social security wage maximum must be positive, got {0}")]
    InvalidSsWageMax(Decimal),

    /// The standard deduction must be non-negative.
    #[error("standard deduction must be non-negative, got {0}")]
    InvalidStandardDeduction(Decimal),
}

/// Statutory self-employment tax constants for one tax year.
///
/// For 2025 these are a $176,100 wage base, 12.4% social security,
/// 2.9% Medicare, 0.9% additional Medicare over $200,000, a 92.35% net
/// earnings factor, a 50% deduction factor and a $15,000 standard deduction
/// for single filers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxParameters {
    /// Maximum earnings subject to social security tax.
    pub ss_wage_max: Decimal,

    /// Combined (employer + employee) social security rate.
    pub ss_tax_rate: Decimal,

    /// Combined (employer + employee) Medicare rate.
    pub medicare_tax_rate: Decimal,

    /// Rate applied to net earnings above `additional_medicare_threshold`.
    pub additional_medicare_rate: Decimal,

    pub additional_medicare_threshold: Decimal,

    /// Share of gross self-employment income that SE tax is assessed on.
    pub net_earnings_factor: Decimal,

    /// Share of SE tax deductible from gross income.
    pub deduction_factor: Decimal,

    pub standard_deduction: Decimal,
}

impl SeTaxParameters {
    /// Validates the parameter values.
    ///
    /// # Errors
    ///
    /// Returns [`SeTaxParametersError`] if:
    /// - `net_earnings_factor` is not in (0, 1]
    /// - any rate or `deduction_factor` is not in [0, 1]
    /// - `ss_wage_max` is not positive
    /// - `additional_medicare_threshold` or `standard_deduction` is negative
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fincalc_core::{SeTaxParameters, SeTaxParametersError};
    ///
    /// let params = SeTaxParameters {
    ///     ss_wage_max: dec!(-1000.00),
    ///     ss_tax_rate: dec!(0.124),
    ///     medicare_tax_rate: dec!(0.029),
    ///     additional_medicare_rate: dec!(0.009),
    ///     additional_medicare_threshold: dec!(200000),
    ///     net_earnings_factor: dec!(0.9235),
    ///     deduction_factor: dec!(0.50),
    ///     standard_deduction: dec!(15000),
    /// };
    ///
    /// assert_eq!(
    ///     params.validate(),
    ///     Err(SeTaxParametersError::InvalidSsWageMax(dec!(-1000.00)))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), SeTaxParametersError> {
        let unit = |v: Decimal| v >= Decimal::ZERO && v <= Decimal::ONE;

        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(SeTaxParametersError::InvalidNetEarningsFactor(
                self.net_earnings_factor,
            ));
        }
        if !unit(self.ss_tax_rate) {
            return Err(SeTaxParametersError::InvalidSocialSecurityRate(
                self.ss_tax_rate,
            ));
        }
        if !unit(self.medicare_tax_rate) {
            return Err(SeTaxParametersError::InvalidMedicareRate(
                self.medicare_tax_rate,
            ));
        }
        if !unit(self.additional_medicare_rate) {
            return Err(SeTaxParametersError::InvalidAdditionalMedicareRate(
                self.additional_medicare_rate,
            ));
        }
        if self.additional_medicare_threshold < Decimal::ZERO {
            return Err(SeTaxParametersError::InvalidAdditionalMedicareThreshold(
                self.additional_medicare_threshold,
            ));
        }
        if !unit(self.deduction_factor) {
            return Err(SeTaxParametersError::InvalidDeductionFactor(
                self.deduction_factor,
            ));
        }
        if self.ss_wage_max <= Decimal::ZERO {
            return Err(SeTaxParametersError::InvalidSsWageMax(self.ss_wage_max));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(SeTaxParametersError::InvalidStandardDeduction(
                self.standard_deduction,
            ));
        }
        Ok(())
    }

    /// The payroll-tax rate set that SE tax is assessed with.
    pub fn payroll_rates(&self) -> PayrollTaxRates {
        PayrollTaxRates {
            ss_wage_max: self.ss_wage_max,
            ss_tax_rate: self.ss_tax_rate,
            medicare_tax_rate: self.medicare_tax_rate,
            additional_medicare_rate: self.additional_medicare_rate,
            additional_medicare_threshold: self.additional_medicare_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_params() -> SeTaxParameters {
        SeTaxParameters {
            ss_wage_max: dec!(176100),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: dec!(200000),
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.5),
            standard_deduction: dec!(15000),
        }
    }

    #[test]
    fn validate_accepts_2025_parameters() {
        assert_eq!(test_params().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_net_earnings_factor() {
        let params = SeTaxParameters {
            net_earnings_factor: dec!(0),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidNetEarningsFactor(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_ss_tax_rate_greater_than_one() {
        let params = SeTaxParameters {
            ss_tax_rate: dec!(1.5),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidSocialSecurityRate(dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_negative_medicare_rate() {
        let params = SeTaxParameters {
            medicare_tax_rate: dec!(-0.01),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidMedicareRate(dec!(-0.01)))
        );
    }

    #[test]
    fn validate_rejects_negative_additional_medicare_threshold() {
        let params = SeTaxParameters {
            additional_medicare_threshold: dec!(-1),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidAdditionalMedicareThreshold(
                dec!(-1)
            ))
        );
    }

    #[test]
    fn validate_rejects_deduction_factor_greater_than_one() {
        let params = SeTaxParameters {
            deduction_factor: dec!(1.01),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidDeductionFactor(dec!(1.01)))
        );
    }

    #[test]
    fn validate_rejects_zero_ss_wage_max() {
        let params = SeTaxParameters {
            ss_wage_max: dec!(0),
            ..test_params()
        };

        assert_eq!(
            params.validate(),
            Err(SeTaxParametersError::InvalidSsWageMax(dec!(0)))
        );
    }

    #[test]
    fn validate_accepts_zero_standard_deduction() {
        let params = SeTaxParameters {
            standard_deduction: dec!(0),
            ..test_params()
        };

        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn payroll_rates_maps_all_fields() {
        let rates = test_params().payroll_rates();

        assert_eq!(rates.ss_wage_max, dec!(176100));
        assert_eq!(rates.ss_tax_rate, dec!(0.124));
        assert_eq!(rates.medicare_tax_rate, dec!(0.029));
        assert_eq!(rates.additional_medicare_rate, dec!(0.009));
        assert_eq!(rates.additional_medicare_threshold, dec!(200000));
    }
}
