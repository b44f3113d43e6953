//! Tests for chart aggregation.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::service::aggregate_daily;
use super::types::{ChartEntry, ChartFilter, DateField};
use crate::entry::EntryType;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(
    entry_type: EntryType,
    amount: rust_decimal::Decimal,
    due: NaiveDate,
    created: NaiveDate,
    category: &str,
    description: &str,
) -> ChartEntry {
    ChartEntry {
        entry_type,
        amount,
        due_date: due,
        created_at: created,
        category: category.to_string(),
        description: description.to_string(),
    }
}

fn sample_entries() -> Vec<ChartEntry> {
    vec![
        entry(
            EntryType::Income,
            dec!(100.00),
            date(2026, 3, 1),
            date(2026, 2, 20),
            "Vendas",
            "Venda balcao",
        ),
        entry(
            EntryType::Income,
            dec!(50.50),
            date(2026, 3, 1),
            date(2026, 2, 21),
            "Vendas",
            "Venda online",
        ),
        entry(
            EntryType::Expense,
            dec!(30.00),
            date(2026, 3, 1),
            date(2026, 2, 21),
            "Aluguel",
            "Aluguel loja",
        ),
        entry(
            EntryType::Expense,
            dec!(70.25),
            date(2026, 3, 5),
            date(2026, 3, 5),
            "Fornecedores",
            "Compra estoque",
        ),
    ]
}

#[test]
fn test_groups_by_due_date_and_sums_per_type() {
    let series = aggregate_daily(&sample_entries(), &ChartFilter::default());

    assert_eq!(series.len(), 2);

    assert_eq!(series[0].date, date(2026, 3, 1));
    assert_eq!(series[0].income, dec!(150.50));
    assert_eq!(series[0].expense, dec!(30.00));

    assert_eq!(series[1].date, date(2026, 3, 5));
    assert_eq!(series[1].income, dec!(0));
    assert_eq!(series[1].expense, dec!(70.25));
}

#[test]
fn test_groups_by_created_at_when_selected() {
    let filter = ChartFilter {
        date_field: DateField::CreatedAt,
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);

    // 2026-02-20: income 100; 2026-02-21: income 50.50, expense 30;
    // 2026-03-05: expense 70.25.
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].date, date(2026, 2, 20));
    assert_eq!(series[0].income, dec!(100.00));
    assert_eq!(series[1].date, date(2026, 2, 21));
    assert_eq!(series[1].income, dec!(50.50));
    assert_eq!(series[1].expense, dec!(30.00));
    assert_eq!(series[2].date, date(2026, 3, 5));
}

#[test]
fn test_date_range_is_inclusive() {
    let filter = ChartFilter {
        from: Some(date(2026, 3, 1)),
        to: Some(date(2026, 3, 5)),
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);
    assert_eq!(series.len(), 2);

    let filter = ChartFilter {
        from: Some(date(2026, 3, 2)),
        to: None,
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, date(2026, 3, 5));
}

#[test]
fn test_type_filter() {
    let filter = ChartFilter {
        entry_type: Some(EntryType::Income),
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].income, dec!(150.50));
    assert_eq!(series[0].expense, dec!(0));
}

#[test]
fn test_category_filter_is_case_insensitive() {
    let filter = ChartFilter {
        category: Some("vendas".to_string()),
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].income, dec!(150.50));
}

#[test]
fn test_description_substring_filter() {
    let filter = ChartFilter {
        description: Some("VENDA".to_string()),
        ..ChartFilter::default()
    };
    let series = aggregate_daily(&sample_entries(), &filter);

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].date, date(2026, 3, 1));
    assert_eq!(series[0].income, dec!(150.50));
    assert_eq!(series[0].expense, dec!(0));
}

#[test]
fn test_empty_input() {
    let series = aggregate_daily(&[], &ChartFilter::default());
    assert!(series.is_empty());
}
