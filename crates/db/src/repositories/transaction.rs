//! Transaction repository for cash-book entry database operations.
//!
//! All queries run inside an RLS-scoped transaction (the transactions table
//! has forced owner-only policies) and are additionally filtered by the
//! owning profile ID.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use caixa_core::chart::DateField;
use caixa_core::entry::{
    EntryStatus, EntryType, InstallmentError, PaymentMethod, expand_installments,
};

use crate::entities::transactions;
use crate::rls::RlsConnection;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or not owned by the caller).
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Installment expansion failed.
    #[error("Installment expansion failed: {0}")]
    Installment(#[from] InstallmentError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Income or expense.
    pub entry_type: EntryType,
    /// Description.
    pub description: String,
    /// Amount per row (installments share it, they do not split it).
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Number of installments; ignored (treated as 1) for lump-sum.
    pub installment_count: u32,
    /// Due date of the first (or only) installment.
    pub due_date: NaiveDate,
    /// Category label.
    pub category: String,
}

/// Fields that can be updated on an existing transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New stored status (`pending` or `paid`; `overdue` is derived and is
    /// rejected by the API layer before reaching here).
    pub status: Option<EntryStatus>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by effective status (overdue = pending past due).
    pub status: Option<EntryStatus>,
    /// Filter by entry type.
    pub entry_type: Option<EntryType>,
    /// Filter by category (case-insensitive equality).
    pub category: Option<String>,
    /// Filter by description substring (case-insensitive).
    pub description: Option<String>,
    /// Which date field the range below applies to.
    pub date_field: DateField,
    /// Inclusive range start.
    pub from: Option<NaiveDate>,
    /// Inclusive range end.
    pub to: Option<NaiveDate>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the rows for one logical entry.
    ///
    /// A lump-sum entry becomes a single row. An installment entry is
    /// expanded into `installment_count` rows sharing description, amount,
    /// type, and category, with due dates one calendar month apart and
    /// installment numbers 1..=count. All rows are inserted in a single
    /// database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion fails or the insert fails.
    pub async fn create(
        &self,
        profile_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let count = match input.payment_method {
            PaymentMethod::LumpSum => 1,
            PaymentMethod::Installment => input.installment_count,
        };
        let parts = expand_installments(input.due_date, count)?;

        let rls = RlsConnection::new(&self.db, profile_id).await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let mut created = Vec::with_capacity(parts.len());
        for part in &parts {
            let row = transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                profile_id: Set(profile_id),
                entry_type: Set(input.entry_type.into()),
                description: Set(input.description.clone()),
                amount: Set(input.amount),
                payment_method: Set(input.payment_method.into()),
                installment_count: Set(parts.len() as i32),
                installment_number: Set(part.number as i32),
                due_date: Set(part.due_date),
                category: Set(input.category.clone()),
                status: Set(EntryStatus::Pending.into()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            created.push(row.insert(rls.transaction()).await?);
        }

        rls.commit().await?;
        Ok(created)
    }

    /// Lists transactions with filters and pagination.
    ///
    /// Returns the page of rows plus the total row count for the filter.
    /// `today` anchors the effective-status filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        profile_id: Uuid,
        filter: &TransactionFilter,
        today: NaiveDate,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<transactions::Model>, u64), TransactionError> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;

        let query = Self::filtered_query(profile_id, filter, today)
            .order_by_desc(transactions::Column::DueDate)
            .order_by_desc(transactions::Column::CreatedAt);

        let (rows, total) = {
            let paginator = query.paginate(rls.transaction(), limit.max(1));
            let total = paginator.num_items().await?;
            let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
            (rows, total)
        };

        rls.commit().await?;
        Ok((rows, total))
    }

    /// Loads all rows in a date range on the chosen field, oldest first.
    ///
    /// Used by the dashboard endpoints, which aggregate in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_range(
        &self,
        profile_id: Uuid,
        date_field: DateField,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let filter = TransactionFilter {
            date_field,
            from,
            to,
            ..TransactionFilter::default()
        };

        let rls = RlsConnection::new(&self.db, profile_id).await?;
        let rows = Self::filtered_query(profile_id, &filter, NaiveDate::MIN)
            .order_by_asc(transactions::Column::DueDate)
            .all(rls.transaction())
            .await?;
        rls.commit().await?;
        Ok(rows)
    }

    /// Finds a transaction by ID, scoped to the owning profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        profile_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;
        let row = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::ProfileId.eq(profile_id))
            .one(rls.transaction())
            .await?;
        rls.commit().await?;
        Ok(row)
    }

    /// Updates a transaction's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the row does not exist or is
    /// not owned by the caller.
    pub async fn update(
        &self,
        profile_id: Uuid,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;

        let existing = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::ProfileId.eq(profile_id))
            .one(rls.transaction())
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut row: transactions::ActiveModel = existing.into();
        if let Some(description) = input.description {
            row.description = Set(description);
        }
        if let Some(category) = input.category {
            row.category = Set(category);
        }
        if let Some(due_date) = input.due_date {
            row.due_date = Set(due_date);
        }
        if let Some(amount) = input.amount {
            row.amount = Set(amount);
        }
        if let Some(status) = input.status {
            row.status = Set(status.into());
        }

        let updated = row.update(rls.transaction()).await?;
        rls.commit().await?;
        Ok(updated)
    }

    /// Deletes a transaction, scoped to the owning profile.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if no owned row was deleted.
    pub async fn delete(&self, profile_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::ProfileId.eq(profile_id))
            .exec(rls.transaction())
            .await?;
        rls.commit().await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        Ok(())
    }

    /// Builds the filtered select for a profile.
    fn filtered_query(
        profile_id: Uuid,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Select<transactions::Entity> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::ProfileId.eq(profile_id));

        let date_column = match filter.date_field {
            DateField::DueDate => transactions::Column::DueDate,
            DateField::CreatedAt => transactions::Column::CreatedAt,
        };
        if let Some(from) = filter.from {
            query = query.filter(date_column.gte(from));
        }
        if let Some(to) = filter.to {
            // created_at is a timestamp; push the bound past the whole day.
            query = match (filter.date_field, to.succ_opt()) {
                (DateField::CreatedAt, Some(next)) => query.filter(date_column.lt(next)),
                _ => query.filter(date_column.lte(to)),
            };
        }

        if let Some(entry_type) = filter.entry_type {
            query = query.filter(
                transactions::Column::EntryType
                    .eq(crate::entities::sea_orm_active_enums::EntryType::from(entry_type)),
            );
        }

        // Effective-status filter: overdue lives only in (pending, past due).
        match filter.status {
            Some(EntryStatus::Paid) => {
                query = query.filter(
                    transactions::Column::Status
                        .eq(crate::entities::sea_orm_active_enums::EntryStatus::Paid),
                );
            }
            Some(EntryStatus::Pending) => {
                query = query
                    .filter(
                        transactions::Column::Status
                            .eq(crate::entities::sea_orm_active_enums::EntryStatus::Pending),
                    )
                    .filter(transactions::Column::DueDate.gte(today));
            }
            Some(EntryStatus::Overdue) => {
                query = query
                    .filter(
                        transactions::Column::Status
                            .eq(crate::entities::sea_orm_active_enums::EntryStatus::Pending),
                    )
                    .filter(transactions::Column::DueDate.lt(today));
            }
            None => {}
        }

        if let Some(category) = &filter.category {
            query = query.filter(
                Expr::col((transactions::Entity, transactions::Column::Category))
                    .ilike(escape_like(category)),
            );
        }
        if let Some(needle) = &filter.description {
            query = query.filter(
                Expr::col((transactions::Entity, transactions::Column::Description))
                    .ilike(format!("%{}%", escape_like(needle))),
            );
        }

        query
    }
}

/// Escapes LIKE/ILIKE metacharacters in user input.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
