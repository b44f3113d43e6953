//! `SeaORM` Entity for the sessions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A refresh-token session owned by a profile.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Session ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning profile.
    pub profile_id: Uuid,
    /// SHA-256 hex digest of the refresh token.
    pub refresh_token_hash: String,
    /// Client user agent, if provided.
    pub user_agent: Option<String>,
    /// Client IP address, if provided.
    pub ip_address: Option<String>,
    /// Expiration timestamp.
    pub expires_at: DateTimeWithTimeZone,
    /// Revocation timestamp, if revoked.
    pub revoked_at: Option<DateTimeWithTimeZone>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last-update timestamp (maintained by trigger).
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning profile.
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id"
    )]
    Profiles,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
