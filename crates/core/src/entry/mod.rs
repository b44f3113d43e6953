//! Cash-book entry domain logic.
//!
//! Entry enums, read-time status derivation, and installment expansion.

mod installment;
mod status;
mod types;

pub use installment::{InstallmentError, InstallmentPart, add_months, expand_installments};
pub use status::effective_status;
pub use types::{EntryStatus, EntryType, ParseEnumError, PaymentMethod};

#[cfg(test)]
mod props;
