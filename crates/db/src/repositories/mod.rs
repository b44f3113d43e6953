//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Transaction and pattern queries always run inside an RLS-scoped
//! transaction; profile and session lookups happen before a profile context
//! exists and use the plain connection.

pub mod pattern;
pub mod profile;
pub mod session;
pub mod transaction;

pub use pattern::PatternRepository;
pub use profile::{ProfileError, ProfileRepository};
pub use session::SessionRepository;
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
