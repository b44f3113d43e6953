//! Pattern repository for database operations.
//!
//! Patterns are the saved description/category suggestions. Queries run
//! inside an RLS-scoped transaction (forced owner-only policies).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::patterns;
use crate::entities::sea_orm_active_enums::{EntryType, PatternField};
use crate::rls::RlsConnection;

/// Pattern repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PatternRepository {
    db: DatabaseConnection,
}

impl PatternRepository {
    /// Creates a new pattern repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a profile's patterns, optionally restricted to one entry type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        profile_id: Uuid,
        entry_type: Option<EntryType>,
    ) -> Result<Vec<patterns::Model>, DbErr> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;

        let mut query = patterns::Entity::find()
            .filter(patterns::Column::ProfileId.eq(profile_id))
            .order_by_asc(patterns::Column::Value);
        if let Some(entry_type) = entry_type {
            query = query.filter(patterns::Column::EntryType.eq(entry_type));
        }

        let rows = query.all(rls.transaction()).await?;
        rls.commit().await?;
        Ok(rows)
    }

    /// Saves a new pattern.
    ///
    /// No uniqueness is enforced beyond owner scoping; saving the same value
    /// twice simply stores it twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        profile_id: Uuid,
        entry_type: EntryType,
        field: PatternField,
        value: &str,
    ) -> Result<patterns::Model, DbErr> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;

        let row = patterns::ActiveModel {
            id: Set(Uuid::new_v4()),
            profile_id: Set(profile_id),
            entry_type: Set(entry_type),
            field: Set(field),
            value: Set(value.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(rls.transaction())
        .await?;

        rls.commit().await?;
        Ok(row)
    }

    /// Deletes a pattern, scoped to the owning profile.
    ///
    /// Returns whether a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, profile_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let rls = RlsConnection::new(&self.db, profile_id).await?;
        let result = patterns::Entity::delete_many()
            .filter(patterns::Column::Id.eq(id))
            .filter(patterns::Column::ProfileId.eq(profile_id))
            .exec(rls.transaction())
            .await?;
        rls.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
