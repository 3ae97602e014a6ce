//! Quarterly estimated tax payments for the rest of the year.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxYearConfig;
use crate::calculations::common::max;
use crate::calculations::self_emp::SelfEmploymentTax;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyPlan {
    /// Annual SE + federal tax.
    pub total_tax: Decimal,

    /// Even quarterly share of `total_tax`.
    pub quarterly_payment: Decimal,

    /// Per-payment amount still owed, rounded up.
    pub remaining_payment: Decimal,

    /// Payments left, counting the current quarter.
    pub payments_left: u32,

    pub current_quarter: u32,

    /// First estimated-payment due date on or after `today`, if any remain.
    pub next_due_date: Option<NaiveDate>,
}

/// Calendar quarter (1-4) that `date` falls in.
pub fn current_quarter(date: NaiveDate) -> u32 {
    match date.month0() {
        0..3 => 1,
        3..6 => 2,
        6..9 => 3,
        _ => 4,
    }
}

/// Spreads the tax still owed on `income` over the quarters left in the year.
///
/// `today` is supplied by the caller so the plan is reproducible.
pub fn plan_quarterly_payments(
    income: Decimal,
    already_paid: Decimal,
    today: NaiveDate,
    config: &TaxYearConfig,
) -> QuarterlyPlan {
    let tax = SelfEmploymentTax::from_config(config).calculate(income);

    let quarter = current_quarter(today);
    let payments_left = 5 - quarter;
    let remaining_tax = max(tax.total_tax - already_paid, Decimal::ZERO);
    let remaining_payment = (remaining_tax / Decimal::from(payments_left)).ceil();

    let next_due_date = config
        .estimated_payment_due_dates
        .iter()
        .copied()
        .find(|due| *due >= today);

    QuarterlyPlan {
        total_tax: tax.total_tax,
        quarterly_payment: tax.quarterly_payment,
        remaining_payment,
        payments_left,
        current_quarter: quarter,
        next_due_date,
    }
}
