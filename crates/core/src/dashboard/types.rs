//! Dashboard summary types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entry::{EntryStatus, EntryType};

/// An entry as seen by the summary aggregator.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    /// Income or expense.
    pub entry_type: EntryType,
    /// Entry amount (always positive).
    pub amount: Decimal,
    /// Stored status (`overdue` is derived, never stored).
    pub status: EntryStatus,
    /// Due date, used to derive overdue.
    pub due_date: NaiveDate,
}

/// Summary-card figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of income amounts.
    pub income_total: Decimal,
    /// Sum of expense amounts.
    pub expense_total: Decimal,
    /// Income minus expense.
    pub balance: Decimal,
    /// Entries still pending (and not yet due).
    pub pending_count: u64,
    /// Entries settled.
    pub paid_count: u64,
    /// Pending entries past their due date.
    pub overdue_count: u64,
}
