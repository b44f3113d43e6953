//! Summary-card aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{Summary, SummaryEntry};
use crate::entry::{EntryStatus, EntryType, effective_status};

/// Computes the summary cards over loaded entries as of `today`.
///
/// Status counts use the derived status, so an unpaid entry past its due
/// date counts as overdue even though `pending` is what sits in the row.
#[must_use]
pub fn summarize(entries: &[SummaryEntry], today: NaiveDate) -> Summary {
    let mut income_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    let mut pending_count = 0;
    let mut paid_count = 0;
    let mut overdue_count = 0;

    for entry in entries {
        match entry.entry_type {
            EntryType::Income => income_total += entry.amount,
            EntryType::Expense => expense_total += entry.amount,
        }
        match effective_status(entry.status, entry.due_date, today) {
            EntryStatus::Pending => pending_count += 1,
            EntryStatus::Paid => paid_count += 1,
            EntryStatus::Overdue => overdue_count += 1,
        }
    }

    Summary {
        income_total,
        expense_total,
        balance: income_total - expense_total,
        pending_count,
        paid_count,
        overdue_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(
        entry_type: EntryType,
        amount: Decimal,
        status: EntryStatus,
        due: NaiveDate,
    ) -> SummaryEntry {
        SummaryEntry {
            entry_type,
            amount,
            status,
            due_date: due,
        }
    }

    #[test]
    fn test_totals_and_balance() {
        let today = date(2026, 3, 10);
        let entries = vec![
            entry(EntryType::Income, dec!(300.00), EntryStatus::Paid, today),
            entry(EntryType::Income, dec!(120.50), EntryStatus::Pending, today),
            entry(EntryType::Expense, dec!(80.25), EntryStatus::Paid, today),
        ];

        let summary = summarize(&entries, today);
        assert_eq!(summary.income_total, dec!(420.50));
        assert_eq!(summary.expense_total, dec!(80.25));
        assert_eq!(summary.balance, dec!(340.25));
    }

    #[test]
    fn test_overdue_is_derived_not_stored() {
        let today = date(2026, 3, 10);
        let entries = vec![
            // Past due and still pending: counts as overdue.
            entry(
                EntryType::Expense,
                dec!(10),
                EntryStatus::Pending,
                date(2026, 3, 1),
            ),
            // Past due but paid: stays paid.
            entry(
                EntryType::Expense,
                dec!(10),
                EntryStatus::Paid,
                date(2026, 3, 1),
            ),
            // Future pending.
            entry(
                EntryType::Income,
                dec!(10),
                EntryStatus::Pending,
                date(2026, 4, 1),
            ),
        ];

        let summary = summarize(&entries, today);
        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.pending_count, 1);
    }

    #[test]
    fn test_empty_entries() {
        let summary = summarize(&[], date(2026, 1, 1));
        assert_eq!(summary.income_total, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.pending_count, 0);
    }
}
