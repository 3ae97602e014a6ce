use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One marginal-rate bracket covering the half-open interval
/// `[min_income, max_income)`.
///
/// `max_income` is `None` for the top bracket, which has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Width of the bracket, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}

/// Errors raised when a list of brackets does not partition `[0, ∞)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    /// No brackets were provided.
    #[error("no tax brackets provided")]
    Empty,

    /// The first bracket must start at zero income.
    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    /// A bracket's lower bound does not meet the previous bracket's upper bound.
    #[error("bracket {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bracket's upper bound is not above its lower bound.
    #[error("bracket {index} is empty or inverted: [{min}, {max})")]
    Inverted {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    /// Only the last bracket may omit its upper bound.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    /// The last bracket must be unbounded so every income is covered.
    #[error("last bracket must be unbounded, got upper bound {0}")]
    BoundedTopBracket(Decimal),

    /// Marginal rates must fall in `[0, 1]`.
    #[error("bracket {index} has rate {rate} outside [0, 1]")]
    InvalidRate { index: usize, rate: Decimal },
}

/// An ascending, gapless sequence of [`TaxBracket`]s covering `[0, ∞)`.
///
/// The partition is checked once, when the schedule is built, so tax
/// evaluation over a schedule never fails.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use fincalc_core::{BracketSchedule, TaxBracket};
///
/// let schedule = BracketSchedule::new(vec![
///     TaxBracket { min_income: dec!(0), max_income: Some(dec!(10000)), tax_rate: dec!(0.10) },
///     TaxBracket { min_income: dec!(10000), max_income: None, tax_rate: dec!(0.20) },
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates `brackets` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BracketScheduleError`] describing the first violation of the
    /// partition invariant.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        let first = brackets.first().ok_or(BracketScheduleError::Empty)?;
        if first.min_income != Decimal::ZERO {
            return Err(BracketScheduleError::FirstBracketNotAtZero(
                first.min_income,
            ));
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(BracketScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }

            if index > 0 {
                // The previous bracket is bounded, otherwise we would have
                // returned on the previous iteration.
                let expected = brackets[index - 1].max_income.unwrap_or_default();
                if bracket.min_income != expected {
                    return Err(BracketScheduleError::Gap {
                        index,
                        expected,
                        found: bracket.min_income,
                    });
                }
            }

            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(BracketScheduleError::Inverted {
                        index,
                        min: bracket.min_income,
                        max,
                    });
                }
                Some(max) if index == last_index => {
                    return Err(BracketScheduleError::BoundedTopBracket(max));
                }
                None if index != last_index => {
                    return Err(BracketScheduleError::UnboundedBeforeEnd(index));
                }
                _ => {}
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always `false`; a schedule holds at least one bracket.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Marginal rate that applies to the next unit of `taxable_income`.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.max_income.is_none_or(|max| taxable_income < max))
            .or(self.brackets.last())
            .map(|b| b.tax_rate)
            .unwrap_or_default()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = BracketScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            min_income: min,
            max_income: max,
            tax_rate: rate,
        }
    }

    #[test]
    fn new_accepts_contiguous_schedule() {
        let schedule = BracketSchedule::new(vec![
            bracket(dec!(0), Some(dec!(11925)), dec!(0.10)),
            bracket(dec!(11925), Some(dec!(48475)), dec!(0.12)),
            bracket(dec!(48475), None, dec!(0.22)),
        ]);

        assert_eq!(schedule.map(|s| s.len()), Ok(3));
    }

    #[test]
    fn new_accepts_single_unbounded_bracket() {
        let schedule = BracketSchedule::new(vec![bracket(dec!(0), None, dec!(0.15))]);

        assert!(schedule.is_ok());
    }

    #[test]
    fn new_rejects_empty_list() {
        assert_eq!(BracketSchedule::new(vec![]), Err(BracketScheduleError::Empty));
    }

    #[test]
    fn new_rejects_nonzero_start() {
        let result = BracketSchedule::new(vec![bracket(dec!(100), None, dec!(0.10))]);

        assert_eq!(
            result,
            Err(BracketScheduleError::FirstBracketNotAtZero(dec!(100)))
        );
    }

    #[test]
    fn new_rejects_gap_between_brackets() {
        let result = BracketSchedule::new(vec![
            bracket(dec!(0), Some(dec!(10000)), dec!(0.10)),
            bracket(dec!(10001), None, dec!(0.12)),
        ]);

        assert_eq!(
            result,
            Err(BracketScheduleError::Gap {
                index: 1,
                expected: dec!(10000),
                found: dec!(10001),
            })
        );
    }

    #[test]
    fn new_rejects_inverted_bracket() {
        let result = BracketSchedule::new(vec![
            bracket(dec!(0), Some(dec!(0)), dec!(0.10)),
            bracket(dec!(0), None, dec!(0.12)),
        ]);

        assert_eq!(
            result,
            Err(BracketScheduleError::Inverted {
                index: 0,
                min: dec!(0),
                max: dec!(0),
            })
        );
    }

    #[test]
    fn new_rejects_unbounded_middle_bracket() {
        let result = BracketSchedule::new(vec![
            bracket(dec!(0), None, dec!(0.10)),
            bracket(dec!(10000), None, dec!(0.12)),
        ]);

        assert_eq!(result, Err(BracketScheduleError::UnboundedBeforeEnd(0)));
    }

    #[test]
    fn new_rejects_bounded_top_bracket() {
        let result = BracketSchedule::new(vec![
            bracket(dec!(0), Some(dec!(10000)), dec!(0.10)),
            bracket(dec!(10000), Some(dec!(20000)), dec!(0.12)),
        ]);

        assert_eq!(
            result,
            Err(BracketScheduleError::BoundedTopBracket(dec!(20000)))
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = BracketSchedule::new(vec![bracket(dec!(0), None, dec!(1.5))]);

        assert_eq!(
            result,
            Err(BracketScheduleError::InvalidRate {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn marginal_rate_uses_half_open_intervals() {
        let schedule = BracketSchedule::new(vec![
            bracket(dec!(0), Some(dec!(10000)), dec!(0.10)),
            bracket(dec!(10000), None, dec!(0.20)),
        ])
        .unwrap();

        assert_eq!(schedule.marginal_rate(dec!(9999.99)), dec!(0.10));
        assert_eq!(schedule.marginal_rate(dec!(10000)), dec!(0.20));
        assert_eq!(schedule.marginal_rate(dec!(5000000)), dec!(0.20));
    }

    #[test]
    fn width_is_none_for_top_bracket() {
        assert_eq!(
            bracket(dec!(100), Some(dec!(250)), dec!(0.1)).width(),
            Some(dec!(150))
        );
        assert_eq!(bracket(dec!(100), None, dec!(0.1)).width(), None);
    }
}
