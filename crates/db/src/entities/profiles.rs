//! `SeaORM` Entity for the profiles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per tenant/company.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Profile ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Normalized tax-ID digits (CNPJ/CPF), globally unique.
    #[sea_orm(unique)]
    pub tax_id: String,
    /// Company name.
    pub company_name: String,
    /// Either a legacy MD5 hex digest or an Argon2id PHC string.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last-update timestamp (maintained by trigger).
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Transactions owned by this profile.
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    /// Patterns owned by this profile.
    #[sea_orm(has_many = "super::patterns::Entity")]
    Patterns,
    /// Sessions owned by this profile.
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::patterns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patterns.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
