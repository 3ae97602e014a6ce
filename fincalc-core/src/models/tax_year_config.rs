use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketSchedule, EmployeeFicaRates, FilingStatusCode, SeTaxParameters};

/// Every year-specific constant the calculators need, for one filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub filing_status: FilingStatusCode,
    pub brackets: BracketSchedule,
    pub self_employment: SeTaxParameters,
    pub employee_fica: EmployeeFicaRates,

    /// Form 1040-ES due dates for the Q1..Q4 installments.
    pub estimated_payment_due_dates: [NaiveDate; 4],
}

impl TaxYearConfig {
    pub fn standard_deduction(&self) -> Decimal {
        self.self_employment.standard_deduction
    }
}
