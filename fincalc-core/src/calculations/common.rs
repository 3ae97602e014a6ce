//! Rounding and formatting helpers shared by every calculator.
//!
//! Calculators carry unrounded values through every step and only apply
//! these helpers when building their result records.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to cents, with midpoints rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to the nearest whole currency unit, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(7064.775)), dec!(7065));
/// assert_eq!(round_whole(dec!(11451.4)), dec!(11451));
/// assert_eq!(round_whole(dec!(0.5)), dec!(1));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Formats `numerator / denominator` as a percentage with `decimal_places`
/// digits, e.g. `"26.2"`.
///
/// A non-positive denominator yields zero (`"0.0"` for one decimal place).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::calculations::common::percentage;
///
/// assert_eq!(percentage(dec!(26189.30), dec!(100000), 1), "26.2");
/// assert_eq!(percentage(dec!(500), dec!(0), 1), "0.0");
/// assert_eq!(percentage(dec!(1), dec!(3), 0), "33");
/// ```
pub fn percentage(
    numerator: Decimal,
    denominator: Decimal,
    decimal_places: u32,
) -> String {
    let percent = if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (numerator / denominator * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
    };
    format!("{:.*}", decimal_places as usize, percent)
}
