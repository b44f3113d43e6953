//! Chart aggregation types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::{EntryType, ParseEnumError};

/// Which date an entry is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    /// Bucket by due date (the default).
    #[default]
    DueDate,
    /// Bucket by creation date.
    CreatedAt,
}

impl std::str::FromStr for DateField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_date" => Ok(Self::DueDate),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(ParseEnumError {
                what: "date field",
                value: other.to_string(),
            }),
        }
    }
}

/// Filter applied before aggregation.
#[derive(Debug, Clone, Default)]
pub struct ChartFilter {
    /// Which date field buckets the series.
    pub date_field: DateField,
    /// Inclusive range start.
    pub from: Option<NaiveDate>,
    /// Inclusive range end.
    pub to: Option<NaiveDate>,
    /// Only entries of this type.
    pub entry_type: Option<EntryType>,
    /// Only entries in this category (case-insensitive).
    pub category: Option<String>,
    /// Only entries whose description contains this (case-insensitive).
    pub description: Option<String>,
}

/// An entry as seen by the aggregator.
#[derive(Debug, Clone)]
pub struct ChartEntry {
    /// Income or expense.
    pub entry_type: EntryType,
    /// Entry amount (always positive).
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Creation date.
    pub created_at: NaiveDate,
    /// Category label.
    pub category: String,
    /// Description text.
    pub description: String,
}

impl ChartEntry {
    /// Returns the date this entry is bucketed by under `field`.
    #[must_use]
    pub const fn date_for(&self, field: DateField) -> NaiveDate {
        match field {
            DateField::DueDate => self.due_date,
            DateField::CreatedAt => self.created_at,
        }
    }
}

/// One day of the aggregated series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Sum of income amounts on this day.
    pub income: Decimal,
    /// Sum of expense amounts on this day.
    pub expense: Decimal,
}
