//! Tax-year configuration files.
//!
//! A year file is TOML holding the bracket schedule, self-employment and
//! employee FICA parameters, estimated-payment due dates, and the planning
//! assumptions the derived calculators use. The 2025 single-filer file is
//! compiled in; other years or statuses can be loaded from disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fincalc_core::{
    BracketSchedule, BracketScheduleError, CalculatorAssumptions, EmployeeFicaRates,
    FilingStatusCode, IncreaseRange, SeTaxParameters, SeTaxParametersError, TaxBracket,
    TaxYearConfig,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

const BUILTIN_2025: &str = include_str!("../data/2025.toml");

/// Errors raised while reading or validating a year file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse year config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No built-in configuration for tax year {0}")]
    UnsupportedYear(i32),

    #[error("Invalid bracket schedule: {0}")]
    Brackets(#[from] BracketScheduleError),

    #[error("Invalid self-employment parameters: {0}")]
    SelfEmployment(#[from] SeTaxParametersError),

    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: Decimal },

    #[error("{tier} offense increase range is not ordered: min {min}, avg {avg}, max {max}")]
    IncreaseRange {
        tier: &'static str,
        min: Decimal,
        avg: Decimal,
        max: Decimal,
    },

    #[error("Estimated payment due dates are not in order: {0} follows {1}")]
    DueDatesOutOfOrder(NaiveDate, NaiveDate),
}

/// Raw shape of a year file, before validation.
#[derive(Debug, Deserialize)]
struct YearConfigFile {
    tax_year: i32,
    filing_status: FilingStatusCode,
    estimated_payment_due_dates: [NaiveDate; 4],
    brackets: Vec<TaxBracket>,
    self_employment: SeTaxParameters,
    employee_fica: EmployeeFicaRates,
    assumptions: CalculatorAssumptions,
}

/// A validated year file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearData {
    pub config: TaxYearConfig,
    pub assumptions: CalculatorAssumptions,
}

impl YearData {
    /// Built-in data for `tax_year`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedYear`] when no file is compiled in for that
    /// year.
    pub fn builtin(tax_year: i32) -> Result<Self, ConfigError> {
        match tax_year {
            2025 => Self::from_toml_str(BUILTIN_2025),
            other => Err(ConfigError::UnsupportedYear(other)),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loading year config");
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: YearConfigFile = toml::from_str(contents)?;
        debug!(
            tax_year = file.tax_year,
            filing_status = %file.filing_status,
            brackets = file.brackets.len(),
            "Parsed year config"
        );

        let brackets = BracketSchedule::new(file.brackets)?;
        file.self_employment.validate()?;
        validate_employee_fica(&file.employee_fica)?;
        validate_due_dates(&file.estimated_payment_due_dates)?;
        validate_assumptions(&file.assumptions)?;

        Ok(Self {
            config: TaxYearConfig {
                tax_year: file.tax_year,
                filing_status: file.filing_status,
                brackets,
                self_employment: file.self_employment,
                employee_fica: file.employee_fica,
                estimated_payment_due_dates: file.estimated_payment_due_dates,
            },
            assumptions: file.assumptions,
        })
    }

    /// Replaces the bracket schedule, e.g. with one loaded from CSV.
    pub fn with_brackets(
        mut self,
        brackets: BracketSchedule,
    ) -> Self {
        self.config.brackets = brackets;
        self
    }
}

fn rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigError::RateOutOfRange { field, value });
    }
    Ok(())
}

fn non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value < Decimal::ZERO {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value <= Decimal::ZERO {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn validate_employee_fica(fica: &EmployeeFicaRates) -> Result<(), ConfigError> {
    rate("employee_fica.ss_tax_rate", fica.ss_tax_rate)?;
    rate("employee_fica.medicare_tax_rate", fica.medicare_tax_rate)?;
    rate(
        "employee_fica.additional_medicare_rate",
        fica.additional_medicare_rate,
    )?;
    non_negative(
        "employee_fica.additional_medicare_threshold",
        fica.additional_medicare_threshold,
    )
}

fn validate_due_dates(dates: &[NaiveDate; 4]) -> Result<(), ConfigError> {
    for pair in dates.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ConfigError::DueDatesOutOfOrder(pair[1], pair[0]));
        }
    }
    Ok(())
}

fn validate_increase(
    tier: &'static str,
    range: &IncreaseRange,
) -> Result<(), ConfigError> {
    if range.min < Decimal::ZERO || range.min > range.avg || range.avg > range.max {
        return Err(ConfigError::IncreaseRange {
            tier,
            min: range.min,
            avg: range.avg,
            max: range.max,
        });
    }
    Ok(())
}

fn validate_assumptions(assumptions: &CalculatorAssumptions) -> Result<(), ConfigError> {
    let s_corp = &assumptions.s_corp;
    rate("s_corp.employee_fica_rate", s_corp.employee_fica_rate)?;
    rate("s_corp.employer_fica_rate", s_corp.employer_fica_rate)?;
    rate("s_corp.default_salary_share", s_corp.default_salary_share)?;
    non_negative("s_corp.admin_cost", s_corp.admin_cost)?;

    let hourly = &assumptions.hourly_rate;
    rate("hourly_rate.utilization_rate", hourly.utilization_rate)?;
    rate("hourly_rate.expense_rate", hourly.expense_rate)?;
    positive("hourly_rate.rate_buffer", hourly.rate_buffer)?;
    positive(
        "hourly_rate.default_weeks_per_year",
        Decimal::from(hourly.default_weeks_per_year),
    )?;
    positive(
        "hourly_rate.default_hours_per_week",
        Decimal::from(hourly.default_hours_per_week),
    )?;

    let insurance = &assumptions.insurance;
    validate_increase("first", &insurance.first_offense)?;
    validate_increase("second", &insurance.second_offense)?;
    validate_increase("third", &insurance.third_offense)?;
    non_negative("insurance.sr22_monthly_fee", insurance.sr22_monthly_fee)?;
    positive(
        "insurance.average_annual_premium",
        insurance.average_annual_premium,
    )
}
