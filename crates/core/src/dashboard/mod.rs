//! Dashboard summary aggregation.

pub mod service;
pub mod types;

pub use service::summarize;
pub use types::{Summary, SummaryEntry};
