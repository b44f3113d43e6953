//! Profile repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use caixa_shared::TaxId;

use crate::entities::profiles;

/// Error types for profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The tax-ID is already registered.
    #[error("tax-ID already registered")]
    TaxIdTaken,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Profile repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::TaxIdTaken` when the tax-ID is already
    /// registered (unique-constraint violation), or a database error.
    pub async fn create(
        &self,
        tax_id: &TaxId,
        company_name: &str,
        password_hash: &str,
    ) -> Result<profiles::Model, ProfileError> {
        let now = chrono::Utc::now().into();
        let profile = profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            tax_id: Set(tax_id.as_digits().to_string()),
            company_name: Set(company_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        profile.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                ProfileError::TaxIdTaken
            } else {
                ProfileError::Database(e)
            }
        })
    }

    /// Finds a profile by tax-ID.
    ///
    /// Lookup is by tax-ID only, matching login behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find()
            .filter(profiles::Column::TaxId.eq(tax_id.as_digits()))
            .one(&self.db)
            .await
    }

    /// Finds a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profiles::Model>, DbErr> {
        profiles::Entity::find_by_id(id).one(&self.db).await
    }

    /// Replaces the stored password hash.
    ///
    /// Used both for explicit password changes and for the transparent
    /// legacy-to-Argon2 upgrade on login. Plain lookup-then-update, no
    /// optimistic locking; concurrent changes last-write-win.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DbErr> {
        profiles::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    /// Updates the company name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_company_name(
        &self,
        id: Uuid,
        company_name: &str,
    ) -> Result<profiles::Model, DbErr> {
        profiles::ActiveModel {
            id: Set(id),
            company_name: Set(company_name.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
