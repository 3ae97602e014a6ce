use rust_decimal::Decimal;
use tracing::warn;

/// Largest amount accepted from text input (one quadrillion).
///
/// Calculators multiply and divide amounts by rates, so a bound well below
/// `Decimal::MAX` keeps every derived value representable.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses a whole-dollar amount typed the way people type money.
///
/// Every character that is not an ASCII digit is dropped, so `"$85,000"`,
/// `"85000"` and `"85 000"` all read as 85000. Signs and decimal points are
/// dropped too: `"-1,234.56"` reads as 123456. Empty input, or input with
/// no digits, is 0. So is anything above [`MAX_AMOUNT`].
pub fn parse_formatted_number(s: &str) -> Decimal {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    match digits.parse::<Decimal>() {
        Ok(amount) if amount <= MAX_AMOUNT => amount,
        Ok(amount) => {
            warn!(input = %s, amount = %amount, "amount above {MAX_AMOUNT}, using 0");
            Decimal::ZERO
        }
        Err(e) => {
            warn!(input = %s, "amount out of range, using 0: {}", e);
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn strips_currency_symbols_and_separators() {
        assert_eq!(parse_formatted_number("$85,000"), dec!(85000));
        assert_eq!(parse_formatted_number("1,234,567"), dec!(1234567));
        assert_eq!(parse_formatted_number("  42 "), dec!(42));
    }

    #[test]
    fn decimal_point_and_sign_are_not_special() {
        assert_eq!(parse_formatted_number("1,234.56"), dec!(123456));
        assert_eq!(parse_formatted_number("-500"), dec!(500));
    }

    #[test]
    fn empty_or_non_numeric_is_zero() {
        assert_eq!(parse_formatted_number(""), Decimal::ZERO);
        assert_eq!(parse_formatted_number("   "), Decimal::ZERO);
        assert_eq!(parse_formatted_number("abc"), Decimal::ZERO);
    }

    #[test]
    fn too_many_digits_is_zero() {
        assert_eq!(parse_formatted_number(&"9".repeat(40)), Decimal::ZERO);
    }

    #[test]
    fn max_amount_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
    }

    #[test]
    fn amounts_above_ceiling_are_zero() {
        assert_eq!(parse_formatted_number("1,000,000,000,000,000"), MAX_AMOUNT);
        assert_eq!(parse_formatted_number("1,000,000,000,000,001"), Decimal::ZERO);
        assert_eq!(
            parse_formatted_number("50000000000000000000000000000"),
            Decimal::ZERO
        );
    }
}
