//! Property-based tests for installment date arithmetic.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use super::installment::{add_months, expand_installments};

/// Strategy to generate an arbitrary valid date between 2000 and 2100.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=31).prop_filter_map("invalid day for month", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Adding N months advances the month counter by exactly N.
    #[test]
    fn prop_add_months_advances_month(date in any_date(), months in 0u32..120) {
        let result = add_months(date, months).unwrap();
        let base = date.year() as i64 * 12 + i64::from(date.month0());
        let target = result.year() as i64 * 12 + i64::from(result.month0());
        prop_assert_eq!(target - base, i64::from(months));
    }

    /// The day never grows, and is only clamped when the target month is
    /// shorter than the starting day.
    #[test]
    fn prop_add_months_day_clamps(date in any_date(), months in 0u32..120) {
        let result = add_months(date, months).unwrap();
        prop_assert!(result.day() <= date.day());
        if result.day() < date.day() {
            // Clamped: the result must be the last day of its month.
            prop_assert!(add_months(result, 1).is_some());
            prop_assert!(result.succ_opt().is_none_or(|next| next.month() != result.month()));
        }
    }

    /// Expansion yields contiguous 1-based numbers and month-advancing dates.
    #[test]
    fn prop_expand_numbers_and_dates(date in any_date(), count in 1u32..=48) {
        let parts = expand_installments(date, count).unwrap();
        prop_assert_eq!(parts.len() as u32, count);
        for (i, part) in parts.iter().enumerate() {
            prop_assert_eq!(part.number, i as u32 + 1);
            prop_assert_eq!(Some(part.due_date), add_months(date, i as u32));
        }
    }
}
