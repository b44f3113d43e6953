//! Daily aggregation over loaded entries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{ChartEntry, ChartFilter, ChartPoint};
use crate::entry::EntryType;

/// Aggregates entries into a date-sorted daily income/expense series.
///
/// Entries are filtered first (date range on the chosen field, optional
/// type, category, and description substring), then grouped by the calendar
/// day of the chosen field. Income and expense are summed separately; a day
/// appears in the output only if at least one entry landed on it.
#[must_use]
pub fn aggregate_daily(entries: &[ChartEntry], filter: &ChartFilter) -> Vec<ChartPoint> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for entry in entries.iter().filter(|e| matches_filter(e, filter)) {
        let day = entry.date_for(filter.date_field);
        let sums = days.entry(day).or_default();
        match entry.entry_type {
            EntryType::Income => sums.0 += entry.amount,
            EntryType::Expense => sums.1 += entry.amount,
        }
    }

    days.into_iter()
        .map(|(date, (income, expense))| ChartPoint {
            date,
            income,
            expense,
        })
        .collect()
}

fn matches_filter(entry: &ChartEntry, filter: &ChartFilter) -> bool {
    let date = entry.date_for(filter.date_field);

    if filter.from.is_some_and(|from| date < from) {
        return false;
    }
    if filter.to.is_some_and(|to| date > to) {
        return false;
    }
    if filter.entry_type.is_some_and(|t| t != entry.entry_type) {
        return false;
    }
    if let Some(category) = &filter.category
        && !category.eq_ignore_ascii_case(&entry.category)
    {
        return false;
    }
    if let Some(needle) = &filter.description
        && !entry
            .description
            .to_lowercase()
            .contains(&needle.to_lowercase())
    {
        return false;
    }

    true
}
