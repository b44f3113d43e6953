//! Entry enums shared by the data and API layers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for parsing an entry enum from its wire form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {what}: {value}")]
pub struct ParseEnumError {
    /// Which enum failed to parse.
    pub what: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// Whether an entry is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl EntryType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ParseEnumError::new("entry type", other)),
        }
    }
}

/// How an entry is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Single payment.
    LumpSum,
    /// Split into monthly installments.
    Installment,
}

impl PaymentMethod {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LumpSum => "lump_sum",
            Self::Installment => "installment",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lump_sum" => Ok(Self::LumpSum),
            "installment" => Ok(Self::Installment),
            other => Err(ParseEnumError::new("payment method", other)),
        }
    }
}

/// Settlement status of an entry.
///
/// `Overdue` is a derived, read-time value; the application never persists
/// it. See [`super::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Not yet settled.
    Pending,
    /// Settled.
    Paid,
    /// Pending and past its due date (derived at read time).
    Overdue,
}

impl EntryStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            other => Err(ParseEnumError::new("entry status", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_trip() {
        for s in ["income", "expense"] {
            assert_eq!(EntryType::from_str(s).unwrap().as_str(), s);
        }
        for s in ["lump_sum", "installment"] {
            assert_eq!(PaymentMethod::from_str(s).unwrap().as_str(), s);
        }
        for s in ["pending", "paid", "overdue"] {
            assert_eq!(EntryStatus::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_unknown_variant() {
        let err = EntryType::from_str("transfer").unwrap_err();
        assert_eq!(err.to_string(), "unknown entry type: transfer");
    }
}
