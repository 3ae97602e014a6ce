use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Planning constants the derived calculators use that are not set by
/// statute and so do not change with the tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorAssumptions {
    pub s_corp: SCorpAssumptions,
    pub hourly_rate: HourlyRateAssumptions,
    pub insurance: InsuranceAssumptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SCorpAssumptions {
    /// Employee FICA share withheld from the owner's salary.
    pub employee_fica_rate: Decimal,

    /// Employer FICA share the corporation pays on the salary.
    pub employer_fica_rate: Decimal,

    /// Annual payroll and accounting cost of running an S-Corp.
    pub admin_cost: Decimal,

    /// Share of income used as the reasonable salary when none is given.
    pub default_salary_share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRateAssumptions {
    /// Share of worked hours that can be billed.
    pub utilization_rate: Decimal,

    /// Multiplier applied to the minimum rate to get the recommended rate.
    pub rate_buffer: Decimal,

    /// Share of gross revenue assumed to go to business expenses.
    pub expense_rate: Decimal,

    pub default_weeks_per_year: u32,
    pub default_hours_per_week: u32,
}

/// Observed premium increase for one offense tier, as fractions
/// (0.80 is an 80% increase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreaseRange {
    pub min: Decimal,
    pub max: Decimal,
    pub avg: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffenseTier {
    First,
    Second,
    Third,
}

impl OffenseTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first" => Some(Self::First),
            "second" => Some(Self::Second),
            "third" => Some(Self::Third),
            _ => None,
        }
    }
}

impl fmt::Display for OffenseTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceAssumptions {
    pub first_offense: IncreaseRange,
    pub second_offense: IncreaseRange,
    pub third_offense: IncreaseRange,

    /// Highest monthly SR-22 filing fee.
    pub sr22_monthly_fee: Decimal,

    /// Years an SR-22 filing is mandated.
    pub sr22_years: u32,

    /// Years premiums stay elevated after a conviction.
    pub rate_impact_years: u32,

    /// National average annual premium, used when no premium is given.
    pub average_annual_premium: Decimal,
}

impl InsuranceAssumptions {
    pub fn increase_for(
        &self,
        tier: OffenseTier,
    ) -> &IncreaseRange {
        match tier {
            OffenseTier::First => &self.first_offense,
            OffenseTier::Second => &self.second_offense,
            OffenseTier::Third => &self.third_offense,
        }
    }
}
