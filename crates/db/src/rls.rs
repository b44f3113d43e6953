//! Row-Level Security (RLS) context management.
//!
//! Transactions and patterns carry forced owner-only policies keyed on the
//! `app.current_profile_id` session variable, so every query against them
//! must run inside a transaction that has set it. `RlsConnection` owns that
//! transaction.

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use uuid::Uuid;

/// A database transaction with the caller's profile set as the RLS context.
///
/// The context is set with `SET LOCAL`, which scopes the variable to the
/// wrapped transaction only.
pub struct RlsConnection {
    txn: DatabaseTransaction,
}

impl RlsConnection {
    /// Begins a transaction and sets `app.current_profile_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the RLS
    /// context cannot be set.
    pub async fn new(db: &DatabaseConnection, profile_id: Uuid) -> Result<Self, DbErr> {
        let txn = db.begin().await?;

        // Uuid's Display is hex-and-dashes only, safe to inline.
        let sql = format!("SET LOCAL app.current_profile_id = '{profile_id}'");
        txn.execute_unprepared(&sql).await?;

        Ok(Self { txn })
    }

    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the transaction, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    // Behavior against a live database is covered by the integration tests;
    // here we only pin the SET LOCAL statement shape.

    #[test]
    fn test_rls_sql_format() {
        let profile_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let sql = format!("SET LOCAL app.current_profile_id = '{profile_id}'");
        assert_eq!(
            sql,
            "SET LOCAL app.current_profile_id = '550e8400-e29b-41d4-a716-446655440000'"
        );
    }
}
