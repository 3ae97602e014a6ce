//! Fixtures shared by the calculator unit tests.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::{
    BracketSchedule, CalculatorAssumptions, EmployeeFicaRates, FilingStatusCode,
    HourlyRateAssumptions, IncreaseRange, InsuranceAssumptions, SCorpAssumptions,
    SeTaxParameters, TaxBracket, TaxYearConfig,
};

/// 2025 single-filer configuration.
pub(crate) fn config_2025() -> TaxYearConfig {
    let bounds = [
        (dec!(0), Some(dec!(11925)), dec!(0.10)),
        (dec!(11925), Some(dec!(48475)), dec!(0.12)),
        (dec!(48475), Some(dec!(103350)), dec!(0.22)),
        (dec!(103350), Some(dec!(197300)), dec!(0.24)),
        (dec!(197300), Some(dec!(250525)), dec!(0.32)),
        (dec!(250525), Some(dec!(626350)), dec!(0.35)),
        (dec!(626350), None, dec!(0.37)),
    ];
    let brackets = bounds
        .into_iter()
        .map(|(min_income, max_income, tax_rate)| TaxBracket {
            min_income,
            max_income,
            tax_rate,
        })
        .collect();

    TaxYearConfig {
        tax_year: 2025,
        filing_status: FilingStatusCode::Single,
        brackets: BracketSchedule::new(brackets).unwrap(),
        self_employment: SeTaxParameters {
            ss_wage_max: dec!(176100),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: dec!(200000),
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.5),
            standard_deduction: dec!(15000),
        },
        employee_fica: EmployeeFicaRates {
            ss_tax_rate: dec!(0.062),
            medicare_tax_rate: dec!(0.0145),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold: dec!(200000),
        },
        estimated_payment_due_dates: [
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        ],
    }
}

pub(crate) fn assumptions() -> CalculatorAssumptions {
    CalculatorAssumptions {
        s_corp: SCorpAssumptions {
            employee_fica_rate: dec!(0.0765),
            employer_fica_rate: dec!(0.0765),
            admin_cost: dec!(3000),
            default_salary_share: dec!(0.40),
        },
        hourly_rate: HourlyRateAssumptions {
            utilization_rate: dec!(0.75),
            rate_buffer: dec!(1.2),
            expense_rate: dec!(0.10),
            default_weeks_per_year: 48,
            default_hours_per_week: 40,
        },
        insurance: InsuranceAssumptions {
            first_offense: IncreaseRange {
                min: dec!(0.65),
                max: dec!(0.95),
                avg: dec!(0.80),
            },
            second_offense: IncreaseRange {
                min: dec!(1.00),
                max: dec!(1.50),
                avg: dec!(1.25),
            },
            third_offense: IncreaseRange {
                min: dec!(1.50),
                max: dec!(2.50),
                avg: dec!(2.00),
            },
            sr22_monthly_fee: dec!(50),
            sr22_years: 3,
            rate_impact_years: 5,
            average_annual_premium: dec!(2150),
        },
    }
}

/// Initializes tracing subscriber for tests that verify log output.
pub(crate) fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_span_events(FmtSpan::NONE)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
