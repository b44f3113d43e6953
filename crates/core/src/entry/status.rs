//! Read-time status derivation.

use chrono::NaiveDate;

use super::types::EntryStatus;

/// Derives the status an entry should display as of `today`.
///
/// A pending entry whose due date has passed reads as overdue. The stored
/// value is never mutated; paid entries stay paid regardless of date.
#[must_use]
pub fn effective_status(stored: EntryStatus, due_date: NaiveDate, today: NaiveDate) -> EntryStatus {
    match stored {
        EntryStatus::Pending if due_date < today => EntryStatus::Overdue,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pending_past_due_reads_overdue() {
        let status = effective_status(EntryStatus::Pending, date(2026, 3, 10), date(2026, 3, 11));
        assert_eq!(status, EntryStatus::Overdue);
    }

    #[test]
    fn test_pending_due_today_stays_pending() {
        let status = effective_status(EntryStatus::Pending, date(2026, 3, 10), date(2026, 3, 10));
        assert_eq!(status, EntryStatus::Pending);
    }

    #[test]
    fn test_pending_future_stays_pending() {
        let status = effective_status(EntryStatus::Pending, date(2026, 3, 10), date(2026, 3, 1));
        assert_eq!(status, EntryStatus::Pending);
    }

    #[test]
    fn test_paid_never_becomes_overdue() {
        let status = effective_status(EntryStatus::Paid, date(2020, 1, 1), date(2026, 3, 11));
        assert_eq!(status, EntryStatus::Paid);
    }
}
