mod assumptions;
mod filing_status;
mod payroll_tax_rates;
mod se_tax_parameters;
mod tax_bracket;
mod tax_year_config;

pub use assumptions::{
    CalculatorAssumptions, HourlyRateAssumptions, IncreaseRange, InsuranceAssumptions,
    OffenseTier, SCorpAssumptions,
};
pub use filing_status::FilingStatusCode;
pub use payroll_tax_rates::{EmployeeFicaRates, PayrollTaxRates};
pub use se_tax_parameters::{SeTaxParameters, SeTaxParametersError};
pub use tax_bracket::{BracketSchedule, BracketScheduleError, TaxBracket};
pub use tax_year_config::TaxYearConfig;
