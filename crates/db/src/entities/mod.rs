//! `SeaORM` entity definitions.

pub mod patterns;
pub mod profiles;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod transactions;
