//! en-US number formatting for reports.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole dollars: `$12,345`, `-$1,234`.
pub fn currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    signed_dollars(rounded, 0)
}

/// Dollars and cents: `$4,187.38`.
pub fn currency_cents(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    signed_dollars(rounded, 2)
}

/// Grouped number without a currency sign: `1,440`.
pub fn number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_thousands(whole)),
        None => format!("{sign}{}", group_thousands(&text)),
    }
}

fn signed_dollars(
    value: Decimal,
    decimal_places: usize,
) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.*}", decimal_places, value.abs());
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(&text)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
