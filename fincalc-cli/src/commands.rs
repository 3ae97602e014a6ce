//! One report per calculator.
//!
//! Each function takes raw text input, sanitises it, runs the calculator and
//! renders a plain-text breakdown. `None` means the primary amount was not
//! positive and there is nothing to show.

use std::fmt;

use chrono::NaiveDate;
use fincalc_core::calculations::calculators::{
    HourlyRateTarget, PayFrequency, calculate_hourly_rate, calculate_paycheck,
    compare_llc_vs_scorp, compare_w2_vs_1099, plan_quarterly_payments, project_insurance_impact,
};
use fincalc_core::calculations::SelfEmploymentTax;
use fincalc_core::OffenseTier;
use fincalc_data::YearData;
use rust_decimal::Decimal;
use tracing::debug;

use crate::format::{currency, currency_cents, number};
use crate::input::parse_formatted_number;

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 14;

/// Plain-text report of labelled rows grouped under headings.
#[derive(Debug, Default)]
struct Report {
    lines: Vec<String>,
}

impl Report {
    fn heading(
        &mut self,
        text: impl Into<String>,
    ) -> &mut Self {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let text = text.into();
        let underline = "-".repeat(text.chars().count());
        self.lines.push(text);
        self.lines.push(underline);
        self
    }

    fn row(
        &mut self,
        label: impl fmt::Display,
        value: impl fmt::Display,
    ) -> &mut Self {
        self.lines.push(format!(
            "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}",
            label.to_string(),
            value.to_string()
        ));
        self
    }

    fn note(
        &mut self,
        text: impl Into<String>,
    ) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    fn finish(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn positive(
    raw: &str,
    what: &str,
) -> Option<Decimal> {
    let amount = parse_formatted_number(raw);
    if amount > Decimal::ZERO {
        Some(amount)
    } else {
        debug!(input = %raw, "No positive {what}; nothing to calculate");
        None
    }
}

fn minus(value: Decimal) -> String {
    format!("-{}", currency(value))
}

pub fn se_tax(
    income: &str,
    data: &YearData,
) -> Option<String> {
    let income = positive(income, "income")?;
    let result = SelfEmploymentTax::from_config(&data.config).calculate(income);
    let se = &data.config.self_employment;

    let mut report = Report::default();
    report
        .heading(format!("{} 1099 Self-Employment Tax", data.config.tax_year))
        .row("Gross Income", currency(result.gross_income))
        .row(
            format!("Net Earnings ({}%)", number(se.net_earnings_factor * Decimal::ONE_HUNDRED)),
            currency(result.net_earnings),
        )
        .row(
            format!("Social Security (up to {})", currency(se.ss_wage_max)),
            currency(result.social_security_tax),
        )
        .row("Medicare", currency(result.medicare_tax));
    if result.additional_medicare > Decimal::ZERO {
        report.row("Additional Medicare", currency(result.additional_medicare));
    }
    report
        .row("Total SE Tax", currency(result.total_se_tax))
        .heading("Deductions")
        .row("SE Tax Deduction", minus(result.se_deduction))
        .row("Standard Deduction", minus(result.standard_deduction))
        .row("Taxable Income", currency(result.taxable_income))
        .heading("Federal Income Tax");
    for bracket in &result.brackets {
        report.row(format!("  {}% bracket", number(bracket.rate)), currency(bracket.amount));
    }
    report
        .row("Federal Tax", currency(result.federal_tax))
        .heading("Summary")
        .row("Total Tax", currency(result.total_tax))
        .row("Quarterly Payment", currency(result.quarterly_payment))
        .row("Effective Rate", format!("{}%", result.effective_rate));

    Some(report.finish())
}

pub fn paycheck(
    salary: &str,
    frequency: PayFrequency,
    data: &YearData,
) -> Option<String> {
    let salary = positive(salary, "salary")?;
    let result = calculate_paycheck(salary, frequency, &data.config);

    let mut report = Report::default();
    report
        .heading(format!("{} Paycheck ({})", data.config.tax_year, result.frequency))
        .row("Gross Pay", currency_cents(result.gross_pay))
        .row("Social Security", format!("-{}", currency_cents(result.social_security)))
        .row("Medicare", format!("-{}", currency_cents(result.medicare)))
        .row("Federal Income Tax", format!("-{}", currency_cents(result.federal_tax)))
        .row("Total Deductions", format!("-{}", currency_cents(result.total_deductions)))
        .row("Net Pay", currency_cents(result.net_pay))
        .heading("Annual")
        .row("Gross Salary", currency(result.annual_gross))
        .row("Take-Home Pay", currency(result.annual_net))
        .row("Effective Rate", format!("{}%", result.effective_rate));

    Some(report.finish())
}

pub fn w2_vs_1099(
    income: &str,
    data: &YearData,
) -> Option<String> {
    let income = positive(income, "income")?;
    let comparison = compare_w2_vs_1099(income, &data.config);
    let w2 = &comparison.w2;
    let contractor = &comparison.contractor;

    let mut report = Report::default();
    report
        .heading(format!("{} W-2 Employee", data.config.tax_year))
        .row("FICA (7.65%)", minus(w2.fica))
        .row("Federal Tax", minus(w2.federal_tax))
        .row("Total Tax", currency(w2.total_tax))
        .row("Net Pay", currency(w2.net_pay))
        .row("Effective Rate", format!("{}%", w2.effective_rate))
        .heading(format!("{} 1099 Contractor", data.config.tax_year))
        .row("SE Tax (15.3%)", minus(contractor.se_tax))
        .row("Federal Tax", minus(contractor.federal_tax))
        .row("Total Tax", currency(contractor.total_tax))
        .row("Net Pay", currency(contractor.net_pay))
        .row("Effective Rate", format!("{}%", contractor.effective_rate))
        .heading("Comparison")
        .row("W-2 Keeps More By", currency(comparison.net_pay_difference))
        .note(format!(
            "A 1099 rate of {}% of the W-2 salary ({}) matches the W-2 take-home.",
            comparison.break_even_rate,
            currency(income + comparison.net_pay_difference)
        ));

    Some(report.finish())
}

pub fn llc_vs_scorp(
    income: &str,
    salary: &str,
    data: &YearData,
) -> Option<String> {
    let income = positive(income, "income")?;
    let salary = Some(parse_formatted_number(salary)).filter(|s| *s > Decimal::ZERO);
    let comparison =
        compare_llc_vs_scorp(income, salary, &data.config, &data.assumptions.s_corp)?;
    let llc = &comparison.llc;
    let s_corp = &comparison.s_corp;

    let mut report = Report::default();
    report
        .heading(format!("{} LLC (Self-Employment)", data.config.tax_year))
        .row("SE Tax", minus(llc.se_tax))
        .row("Federal Tax", minus(llc.federal_tax))
        .row("Total Tax", currency(llc.total_tax))
        .row("Net Income", currency(llc.net_income))
        .heading(format!("{} S-Corporation", data.config.tax_year))
        .row("Salary", currency(s_corp.salary))
        .row("Distribution", currency(s_corp.distribution))
        .row("FICA (employee + employer)", minus(s_corp.total_fica))
        .row("Federal Tax", minus(s_corp.federal_tax))
        .row("Admin Cost", minus(s_corp.admin_cost))
        .row("Total Tax", currency(s_corp.total_tax))
        .row("Net Income", currency(s_corp.net_income))
        .heading("Verdict");
    if comparison.savings > Decimal::ZERO {
        report.note(format!("S-Corp saves you {}/year", currency(comparison.savings)));
    } else {
        report.note(format!("LLC is better by {}/year", currency(comparison.savings.abs())));
    }
    if comparison.worth_it {
        report.note("The savings exceed the S-Corp admin cost.");
    } else {
        report.note(format!(
            "The savings do not exceed the {} admin cost.",
            currency(data.assumptions.s_corp.admin_cost)
        ));
    }

    Some(report.finish())
}

pub fn hourly_rate(
    income: &str,
    weeks: u32,
    hours: u32,
    data: &YearData,
) -> Option<String> {
    let target_income = positive(income, "target income")?;
    let target = HourlyRateTarget {
        target_income,
        weeks_per_year: weeks,
        hours_per_week: hours,
    };
    let assumptions = &data.assumptions.hourly_rate;
    let result = calculate_hourly_rate(&target, &data.config, assumptions);

    let mut report = Report::default();
    report
        .heading(format!("{} Freelance Hourly Rate", data.config.tax_year))
        .row("Break-Even Rate", format!("{}/hr", currency(result.break_even_rate)))
        .row("Minimum Rate", format!("{}/hr", currency(result.min_hourly_rate)))
        .row("Recommended Rate", format!("{}/hr", currency(result.recommended_rate)))
        .heading("Calculation Breakdown")
        .row("Target Take-Home", currency(result.target_income))
        .row(
            format!("Estimated Taxes ({}%)", result.effective_tax_rate),
            format!("+{}", currency(result.total_tax)),
        )
        .row(
            format!(
                "Business Expenses ({}%)",
                number(assumptions.expense_rate * Decimal::ONE_HUNDRED)
            ),
            format!("+{}", currency(result.gross_needed * assumptions.expense_rate)),
        )
        .row("Gross Revenue Needed", currency(result.gross_needed))
        .row("Billable Hours", format!("{} hrs/year", number(result.billable_hours)))
        .row("Annual at Recommended", currency(result.annual_at_recommended));

    Some(report.finish())
}

pub fn quarterly(
    income: &str,
    paid: &str,
    today: NaiveDate,
    data: &YearData,
) -> Option<String> {
    let income = positive(income, "income")?;
    let already_paid = parse_formatted_number(paid);
    let plan = plan_quarterly_payments(income, already_paid, today, &data.config);

    let mut report = Report::default();
    report
        .heading(format!("{} Quarterly Estimated Tax", data.config.tax_year))
        .row("Payment Due Each Quarter", currency(plan.remaining_payment))
        .row("Payments Remaining", plan.payments_left)
        .row("Total Tax", currency(plan.total_tax))
        .row("Already Paid", currency(already_paid))
        .heading(format!("{} Payment Schedule", data.config.tax_year));
    for (index, due) in data.config.estimated_payment_due_dates.iter().enumerate() {
        let quarter = index as u32 + 1;
        let status = if quarter < plan.current_quarter {
            "past".to_string()
        } else {
            currency(plan.remaining_payment)
        };
        report.row(format!("Q{quarter}  {}", due.format("%b %-d, %Y")), status);
    }
    match plan.next_due_date {
        Some(due) => report.note(format!("Next payment due {}.", due.format("%B %-d, %Y"))),
        None => report.note("All estimated payments for this year are past due."),
    };

    Some(report.finish())
}

/// A premium of 0 uses the configured national average.
pub fn dui_insurance(
    premium: &str,
    offense: OffenseTier,
    data: &YearData,
) -> Option<String> {
    let insurance = &data.assumptions.insurance;
    let premium = match parse_formatted_number(premium) {
        p if p > Decimal::ZERO => p,
        _ => insurance.average_annual_premium,
    };
    let impact = project_insurance_impact(premium, offense, insurance);

    let mut report = Report::default();
    report
        .heading(format!("DUI Insurance Impact ({} offense)", impact.offense))
        .row("Current Premium", currency(impact.current_annual))
        .row(
            format!("New Premium (+{}%)", number(impact.increase_percent)),
            currency(impact.new_annual),
        )
        .row(
            "Likely Range",
            format!(
                "{} - {}",
                currency(impact.low_estimate_annual),
                currency(impact.high_estimate_annual)
            ),
        )
        .row("Yearly Increase", currency(impact.yearly_increase))
        .row("SR-22 Filing (per year)", currency(impact.sr22_fee))
        .heading("Total Extra Cost")
        .row(
            format!("Over {} years (SR-22 period)", insurance.sr22_years),
            currency(impact.sr22_period_total),
        )
        .row(
            format!("Over {} years", insurance.rate_impact_years),
            currency(impact.impact_period_total),
        );

    Some(report.finish())
}
