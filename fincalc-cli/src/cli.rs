use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use fincalc_core::OffenseTier;
use fincalc_core::calculations::calculators::PayFrequency;
use fincalc_data::{TaxBracketLoader, YearData};
use tracing::info;

use crate::commands;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Freelance and payroll tax calculators.
///
/// Amounts are typed the way they would be written on a form: `$85,000`,
/// `85000` and `85 000` are all accepted. Anything that is not a digit is
/// ignored.
#[derive(Debug, Parser)]
#[command(name = "fincalc", version, about)]
pub struct Cli {
    /// Tax year of the built-in configuration to use.
    #[arg(long, global = true, default_value_t = 2025)]
    pub year: i32,

    /// Year configuration file (TOML); replaces the built-in year.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// IRS bracket schedule CSV; replaces the configured brackets.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Self-employment and federal income tax on 1099 income.
    SeTax {
        #[arg(long)]
        income: String,
    },

    /// Take-home pay per paycheck for a W-2 salary.
    Paycheck {
        #[arg(long)]
        salary: String,

        #[arg(long, default_value = "biweekly", value_parser = parse_frequency)]
        frequency: PayFrequency,
    },

    /// Tax on the same income as a W-2 employee and as a 1099 contractor.
    #[command(name = "w2-vs-1099")]
    W2Vs1099 {
        #[arg(long)]
        income: String,
    },

    /// Single-member LLC vs. S-Corp election.
    LlcVsScorp {
        #[arg(long)]
        income: String,

        /// Reasonable salary; defaults to a share of income.
        #[arg(long, default_value = "")]
        salary: String,
    },

    /// Hourly rate needed to take home a target income.
    HourlyRate {
        /// Target take-home income.
        #[arg(long)]
        income: String,

        /// Working weeks per year [default: from config]
        #[arg(long)]
        weeks: Option<u32>,

        /// Working hours per week [default: from config]
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Remaining quarterly estimated tax payments.
    Quarterly {
        /// Expected annual 1099 income.
        #[arg(long)]
        income: String,

        /// Estimated tax already paid this year.
        #[arg(long, default_value = "")]
        paid: String,

        /// Date to plan from [default: today]
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Car insurance cost after a DUI conviction.
    DuiInsurance {
        /// Current annual premium [default: national average]
        #[arg(long, default_value = "")]
        premium: String,

        #[arg(long, default_value = "first", value_parser = parse_offense)]
        offense: OffenseTier,
    },
}

fn parse_frequency(s: &str) -> Result<PayFrequency, String> {
    PayFrequency::parse(s).ok_or_else(|| {
        let ids: Vec<&str> = PayFrequency::ALL.iter().map(|f| f.as_str()).collect();
        format!("expected one of: {}", ids.join(", "))
    })
}

fn parse_offense(s: &str) -> Result<OffenseTier, String> {
    OffenseTier::parse(s).ok_or_else(|| "expected one of: first, second, third".to_string())
}

// ─── execution ───────────────────────────────────────────────────────────────

impl Cli {
    /// Loads the year configuration, applying `--config` and `--brackets`.
    pub fn year_data(&self) -> Result<YearData> {
        let data = match &self.config {
            Some(path) => YearData::load_from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => YearData::builtin(self.year)?,
        };

        let Some(path) = &self.brackets else {
            return Ok(data);
        };
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = TaxBracketLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let schedule = TaxBracketLoader::schedule_for(
            &records,
            data.config.tax_year,
            data.config.filing_status,
        )
        .with_context(|| format!("Failed to load brackets from: {}", path.display()))?;
        info!(
            path = %path.display(),
            brackets = schedule.len(),
            "Using bracket schedule from CSV"
        );

        Ok(data.with_brackets(schedule))
    }

    /// Runs the selected calculator. `today` is only used by `quarterly`
    /// when no `--date` is given.
    pub fn run(
        &self,
        today: NaiveDate,
    ) -> Result<Option<String>> {
        let data = self.year_data()?;

        let report = match &self.command {
            Command::SeTax { income } => commands::se_tax(income, &data),
            Command::Paycheck { salary, frequency } => commands::paycheck(salary, *frequency, &data),
            Command::W2Vs1099 { income } => commands::w2_vs_1099(income, &data),
            Command::LlcVsScorp { income, salary } => commands::llc_vs_scorp(income, salary, &data),
            Command::HourlyRate {
                income,
                weeks,
                hours,
            } => commands::hourly_rate(
                income,
                weeks.unwrap_or_default(),
                hours.unwrap_or_default(),
                &data,
            ),
            Command::Quarterly { income, paid, date } => {
                commands::quarterly(income, paid, date.unwrap_or(today), &data)
            }
            Command::DuiInsurance { premium, offense } => {
                commands::dui_insurance(premium, *offense, &data)
            }
        };

        Ok(report)
    }
}
