//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryStatus, EntryType, PaymentMethod};

/// A financial entry owned by a profile.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Transaction ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning profile.
    pub profile_id: Uuid,
    /// Income or expense.
    pub entry_type: EntryType,
    /// Description text.
    pub description: String,
    /// Amount, always positive.
    pub amount: Decimal,
    /// Lump-sum or installment.
    pub payment_method: PaymentMethod,
    /// Total number of installments (1 for lump-sum).
    pub installment_count: i32,
    /// 1-based index of this row within its installment set.
    pub installment_number: i32,
    /// Due date.
    pub due_date: Date,
    /// Category label.
    pub category: String,
    /// Stored status; `overdue` is derived at read time, never written.
    pub status: EntryStatus,
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
