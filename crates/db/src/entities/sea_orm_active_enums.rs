//! PostgreSQL enum mappings.
//!
//! Database-side mirrors of the domain enums in `caixa_core::entry`, with
//! conversions in both directions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use caixa_core::entry;

/// Income or expense.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money received.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money spent.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Lump-sum or monthly installments.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Single payment.
    #[sea_orm(string_value = "lump_sum")]
    LumpSum,
    /// Split into monthly installments.
    #[sea_orm(string_value = "installment")]
    Installment,
}

/// Stored settlement status.
///
/// `overdue` exists in the database enum for compatibility but is never
/// written by the application; it is derived at read time.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Not yet settled.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Legacy stored value; new rows never carry it.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// Which entry field a pattern suggests values for.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pattern_field")]
#[serde(rename_all = "snake_case")]
pub enum PatternField {
    /// Description suggestions.
    #[sea_orm(string_value = "description")]
    Description,
    /// Category suggestions.
    #[sea_orm(string_value = "category")]
    Category,
}

impl From<entry::EntryType> for EntryType {
    fn from(value: entry::EntryType) -> Self {
        match value {
            entry::EntryType::Income => Self::Income,
            entry::EntryType::Expense => Self::Expense,
        }
    }
}

impl From<EntryType> for entry::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Income => Self::Income,
            EntryType::Expense => Self::Expense,
        }
    }
}

impl From<entry::PaymentMethod> for PaymentMethod {
    fn from(value: entry::PaymentMethod) -> Self {
        match value {
            entry::PaymentMethod::LumpSum => Self::LumpSum,
            entry::PaymentMethod::Installment => Self::Installment,
        }
    }
}

impl From<PaymentMethod> for entry::PaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::LumpSum => Self::LumpSum,
            PaymentMethod::Installment => Self::Installment,
        }
    }
}

impl From<entry::EntryStatus> for EntryStatus {
    fn from(value: entry::EntryStatus) -> Self {
        match value {
            entry::EntryStatus::Pending => Self::Pending,
            entry::EntryStatus::Paid => Self::Paid,
            entry::EntryStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<EntryStatus> for entry::EntryStatus {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Pending => Self::Pending,
            EntryStatus::Paid => Self::Paid,
            EntryStatus::Overdue => Self::Overdue,
        }
    }
}
