use std::collections::HashMap;
use std::io::Read;

use fincalc_core::calculations::progressive_bracket_tax;
use fincalc_core::{BracketSchedule, BracketScheduleError, FilingStatusCode, TaxBracket};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum BracketCsvError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("No brackets for tax year {tax_year}, filing status {filing_status}")]
    NotFound {
        tax_year: i32,
        filing_status: FilingStatusCode,
    },

    #[error("Schedule {schedule} for {tax_year} is not a valid bracket schedule: {source}")]
    Schedule {
        tax_year: i32,
        schedule: String,
        #[source]
        source: BracketScheduleError,
    },

    #[error(
        "Schedule {schedule} bracket starting at {min_income} has base tax {found}, expected {expected}"
    )]
    BaseTaxMismatch {
        schedule: String,
        min_income: Decimal,
        expected: Decimal,
        found: Decimal,
    },
}

impl From<csv::Error> for BracketCsvError {
    fn from(err: csv::Error) -> Self {
        BracketCsvError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ) and Qualifying Surviving Spouse (QSS)
/// - Schedule Y-2 → Married Filing Separately (MFS)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_statuses(schedule: &str) -> Result<&'static [FilingStatusCode], BracketCsvError> {
    use FilingStatusCode::*;

    match schedule {
        "X" => Ok(&[Single]),
        "Y-1" => Ok(&[MarriedFilingJointly, QualifyingSurvivingSpouse]),
        "Y-2" => Ok(&[MarriedFilingSeparately]),
        "Z" => Ok(&[HeadOfHousehold]),
        _ => Err(BracketCsvError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// The CSV format uses IRS schedule designations:
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `base_tax`: Tax owed on `min_income`, as printed in the IRS schedule
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules published as CSV.
///
/// The CSV uses IRS schedule codes (X, Y-1, Y-2, Z) which are mapped to the
/// filing statuses they apply to. Every schedule is checked against the
/// bracket partition rules and against its own `base_tax` column before it
/// is handed out.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, BracketCsvError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "Parsed tax bracket records");
        Ok(records)
    }

    /// Builds a validated schedule for every (tax year, filing status) pair
    /// in `records`.
    ///
    /// Schedule Y-1 yields the same schedule for both MFJ and QSS.
    pub fn schedules(
        records: &[TaxBracketRecord]
    ) -> Result<HashMap<(i32, FilingStatusCode), BracketSchedule>, BracketCsvError> {
        let mut groups: HashMap<(i32, &str), Vec<&TaxBracketRecord>> = HashMap::new();
        for record in records {
            groups
                .entry((record.tax_year, record.schedule.as_str()))
                .or_default()
                .push(record);
        }

        let mut schedules = HashMap::new();
        for ((tax_year, schedule), mut group) in groups {
            let statuses = schedule_to_filing_statuses(schedule)?;
            group.sort_by(|a, b| a.min_income.cmp(&b.min_income));

            let built = build_schedule(tax_year, schedule, &group)?;
            for status in statuses {
                schedules.insert((tax_year, *status), built.clone());
            }
        }

        info!(count = schedules.len(), "Loaded bracket schedules");
        Ok(schedules)
    }

    /// The schedule for one tax year and filing status.
    pub fn schedule_for(
        records: &[TaxBracketRecord],
        tax_year: i32,
        filing_status: FilingStatusCode,
    ) -> Result<BracketSchedule, BracketCsvError> {
        Self::schedules(records)?
            .remove(&(tax_year, filing_status))
            .ok_or(BracketCsvError::NotFound {
                tax_year,
                filing_status,
            })
    }
}

fn build_schedule(
    tax_year: i32,
    schedule: &str,
    records: &[&TaxBracketRecord],
) -> Result<BracketSchedule, BracketCsvError> {
    let brackets = records
        .iter()
        .map(|record| TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
        })
        .collect();

    let built = BracketSchedule::new(brackets).map_err(|source| BracketCsvError::Schedule {
        tax_year,
        schedule: schedule.to_string(),
        source,
    })?;

    // base_tax is redundant with the rates; a mismatch means a typo in the file.
    for record in records {
        let expected = progressive_bracket_tax(record.min_income, &built).tax;
        if expected != record.base_tax {
            return Err(BracketCsvError::BaseTaxMismatch {
                schedule: schedule.to_string(),
                min_income: record.min_income,
                expected,
                found: record.base_tax,
            });
        }
    }

    Ok(built)
}
