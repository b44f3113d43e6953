//! Installment expansion.
//!
//! An installment entry is persisted as one row per installment, with due
//! dates advancing by calendar months from the first due date. The month
//! arithmetic preserves the day-of-month and clamps to the last day of
//! shorter months (Jan 31 -> Feb 28 -> Mar 31), never rolling over into the
//! following month. Every installment is computed from the *first* due date,
//! so the clamp does not compound.

use chrono::{Months, NaiveDate};
use thiserror::Error;

/// Errors that can occur while expanding installments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallmentError {
    /// Installment count must be at least 1.
    #[error("installment count must be at least 1")]
    ZeroCount,

    /// A computed due date fell outside the supported date range.
    #[error("due date out of range at installment {0}")]
    DateOutOfRange(u32),
}

/// One slice of an expanded installment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPart {
    /// 1-based installment number.
    pub number: u32,
    /// Due date for this installment.
    pub due_date: NaiveDate,
}

/// Adds `months` calendar months to a date, clamping the day to the end of
/// the target month.
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Expands an entry into `count` installment parts, one calendar month apart.
///
/// # Errors
///
/// Returns `InstallmentError::ZeroCount` for a zero count, or
/// `InstallmentError::DateOutOfRange` if a due date cannot be represented.
pub fn expand_installments(
    first_due: NaiveDate,
    count: u32,
) -> Result<Vec<InstallmentPart>, InstallmentError> {
    if count == 0 {
        return Err(InstallmentError::ZeroCount);
    }

    (0..count)
        .map(|i| {
            let due_date = add_months(first_due, i).ok_or(InstallmentError::DateOutOfRange(i + 1))?;
            Ok(InstallmentPart {
                number: i + 1,
                due_date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_three_installments() {
        let parts = expand_installments(date(2026, 1, 15), 3).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].number, 1);
        assert_eq!(parts[0].due_date, date(2026, 1, 15));
        assert_eq!(parts[1].number, 2);
        assert_eq!(parts[1].due_date, date(2026, 2, 15));
        assert_eq!(parts[2].number, 3);
        assert_eq!(parts[2].due_date, date(2026, 3, 15));
    }

    #[test]
    fn test_expand_single_installment() {
        let parts = expand_installments(date(2026, 7, 1), 1).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].number, 1);
        assert_eq!(parts[0].due_date, date(2026, 7, 1));
    }

    #[test]
    fn test_month_end_clamps_and_recovers() {
        // Day 31 clamps in February but comes back in March: the arithmetic
        // is anchored on the first due date, not on the previous installment.
        let parts = expand_installments(date(2026, 1, 31), 4).unwrap();

        let dues: Vec<NaiveDate> = parts.iter().map(|p| p.due_date).collect();
        assert_eq!(
            dues,
            vec![
                date(2026, 1, 31),
                date(2026, 2, 28),
                date(2026, 3, 31),
                date(2026, 4, 30),
            ]
        );
    }

    #[test]
    fn test_leap_year_february() {
        let parts = expand_installments(date(2028, 1, 30), 2).unwrap();
        assert_eq!(parts[1].due_date, date(2028, 2, 29));
    }

    #[test]
    fn test_year_rollover() {
        let parts = expand_installments(date(2026, 11, 10), 4).unwrap();
        assert_eq!(parts[2].due_date, date(2027, 1, 10));
        assert_eq!(parts[3].due_date, date(2027, 2, 10));
    }

    #[test]
    fn test_zero_count_rejected() {
        assert_eq!(
            expand_installments(date(2026, 1, 1), 0),
            Err(InstallmentError::ZeroCount)
        );
    }
}
