use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A Social Security + Medicare rate set.
///
/// Self-employment tax and employee FICA withholding are the same
/// computation over different rate sets; see
/// [`payroll_tax`](crate::calculations::payroll_tax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxRates {
    pub ss_wage_max: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    pub additional_medicare_rate: Decimal,
    pub additional_medicare_threshold: Decimal,
}

/// Employee-side FICA rates for W-2 wages.
///
/// The wage base is not repeated here; it is shared with the
/// self-employment parameters of the same year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFicaRates {
    /// Employee social security share (6.2% for 2025).
    pub ss_tax_rate: Decimal,

    /// Employee Medicare share (1.45% for 2025).
    pub medicare_tax_rate: Decimal,

    pub additional_medicare_rate: Decimal,
    pub additional_medicare_threshold: Decimal,
}

impl EmployeeFicaRates {
    pub fn payroll_rates(
        &self,
        ss_wage_max: Decimal,
    ) -> PayrollTaxRates {
        PayrollTaxRates {
            ss_wage_max,
            ss_tax_rate: self.ss_tax_rate,
            medicare_tax_rate: self.medicare_tax_rate,
            additional_medicare_rate: self.additional_medicare_rate,
            additional_medicare_threshold: self.additional_medicare_threshold,
        }
    }
}
