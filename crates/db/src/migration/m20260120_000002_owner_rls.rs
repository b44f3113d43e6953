//! Migration to replace the permissive RLS policies with owner-only ones.
//!
//! Rows become visible only when the owning column matches the
//! `app.current_profile_id` session variable set by the data layer.
//! Transactions and patterns additionally get FORCE ROW LEVEL SECURITY, so
//! the policies apply even to the table owner; every query against those
//! tables must therefore run inside an RLS-scoped transaction. Profiles and
//! sessions are looked up before any profile context exists (login, token
//! refresh), so they keep non-forced RLS: the policy binds secondary roles
//! while the application role performs the pre-auth lookups.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(OWNER_POLICIES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RESTORE_PERMISSIVE_SQL).await?;
        Ok(())
    }
}

const OWNER_POLICIES_SQL: &str = r"
-- ============================================================
-- OWNER-ONLY ROW LEVEL SECURITY
-- ============================================================

DROP POLICY profiles_authenticated ON profiles;
DROP POLICY transactions_authenticated ON transactions;
DROP POLICY patterns_authenticated ON patterns;

CREATE POLICY profiles_owner ON profiles
    FOR ALL
    USING (id = current_setting('app.current_profile_id', true)::uuid)
    WITH CHECK (id = current_setting('app.current_profile_id', true)::uuid);

CREATE POLICY transactions_owner ON transactions
    FOR ALL
    USING (profile_id = current_setting('app.current_profile_id', true)::uuid)
    WITH CHECK (profile_id = current_setting('app.current_profile_id', true)::uuid);

CREATE POLICY patterns_owner ON patterns
    FOR ALL
    USING (profile_id = current_setting('app.current_profile_id', true)::uuid)
    WITH CHECK (profile_id = current_setting('app.current_profile_id', true)::uuid);

ALTER TABLE transactions FORCE ROW LEVEL SECURITY;
ALTER TABLE patterns FORCE ROW LEVEL SECURITY;
";

const RESTORE_PERMISSIVE_SQL: &str = r"
-- ============================================================
-- RESTORE PERMISSIVE POLICIES (Rollback)
-- ============================================================

ALTER TABLE transactions NO FORCE ROW LEVEL SECURITY;
ALTER TABLE patterns NO FORCE ROW LEVEL SECURITY;

DROP POLICY profiles_owner ON profiles;
DROP POLICY transactions_owner ON transactions;
DROP POLICY patterns_owner ON patterns;

CREATE POLICY profiles_authenticated ON profiles
    FOR ALL USING (true) WITH CHECK (true);

CREATE POLICY transactions_authenticated ON transactions
    FOR ALL USING (true) WITH CHECK (true);

CREATE POLICY patterns_authenticated ON patterns
    FOR ALL USING (true) WITH CHECK (true);
";
