//! Initial database migration.
//!
//! Creates the enums, tables, indexes, triggers, and the first-generation
//! RLS policies. The policies created here are permissive ("any
//! authenticated caller"); `m20260120_000002_owner_rls` replaces them with
//! the strict owner-only form.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(PROFILES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(PATTERNS_SQL).await?;
        db.execute_unprepared(SESSIONS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 4: ROW-LEVEL SECURITY (first generation, permissive)
        // ============================================================
        db.execute_unprepared(RLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Entry direction
CREATE TYPE entry_type AS ENUM ('income', 'expense');

-- Payment method
CREATE TYPE payment_method AS ENUM ('lump_sum', 'installment');

-- Settlement status ('overdue' is kept for compatibility; the application
-- derives it at read time and never writes it)
CREATE TYPE entry_status AS ENUM ('pending', 'paid', 'overdue');

-- Which entry field a pattern suggests values for
CREATE TYPE pattern_field AS ENUM ('description', 'category');
";

const PROFILES_SQL: &str = r"
CREATE TABLE profiles (
    id UUID PRIMARY KEY,
    tax_id VARCHAR(14) NOT NULL UNIQUE,
    company_name TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    profile_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    entry_type entry_type NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    payment_method payment_method NOT NULL DEFAULT 'lump_sum',
    installment_count INTEGER NOT NULL DEFAULT 1 CHECK (installment_count >= 1),
    installment_number INTEGER NOT NULL DEFAULT 1,
    due_date DATE NOT NULL,
    category TEXT NOT NULL,
    status entry_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT installment_number_in_range
        CHECK (installment_number BETWEEN 1 AND installment_count)
);

CREATE INDEX idx_transactions_profile_due ON transactions(profile_id, due_date);
CREATE INDEX idx_transactions_profile_created ON transactions(profile_id, created_at);
";

const PATTERNS_SQL: &str = r"
CREATE TABLE patterns (
    id UUID PRIMARY KEY,
    profile_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    entry_type entry_type NOT NULL,
    field pattern_field NOT NULL,
    value TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_patterns_profile_type ON patterns(profile_id, entry_type);
";

const SESSIONS_SQL: &str = r"
CREATE TABLE sessions (
    id UUID PRIMARY KEY,
    profile_id UUID NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    refresh_token_hash TEXT NOT NULL,
    user_agent TEXT,
    ip_address TEXT,
    expires_at TIMESTAMPTZ NOT NULL,
    revoked_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sessions_token_hash ON sessions(refresh_token_hash);
CREATE INDEX idx_sessions_profile ON sessions(profile_id);
";

const TRIGGERS_SQL: &str = r"
-- Stamp updated_at on every update
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER set_profiles_updated_at
    BEFORE UPDATE ON profiles
    FOR EACH ROW EXECUTE FUNCTION update_updated_at_column();

CREATE TRIGGER set_transactions_updated_at
    BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION update_updated_at_column();

CREATE TRIGGER set_sessions_updated_at
    BEFORE UPDATE ON sessions
    FOR EACH ROW EXECUTE FUNCTION update_updated_at_column();
";

const RLS_SQL: &str = r"
-- First-generation policies: row-level security is enabled but any
-- authenticated connection may touch any row. Kept as history;
-- m20260120_000002_owner_rls installs the owner-only policies.
ALTER TABLE profiles ENABLE ROW LEVEL SECURITY;
ALTER TABLE transactions ENABLE ROW LEVEL SECURITY;
ALTER TABLE patterns ENABLE ROW LEVEL SECURITY;

CREATE POLICY profiles_authenticated ON profiles
    FOR ALL USING (true) WITH CHECK (true);

CREATE POLICY transactions_authenticated ON transactions
    FOR ALL USING (true) WITH CHECK (true);

CREATE POLICY patterns_authenticated ON patterns
    FOR ALL USING (true) WITH CHECK (true);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS sessions CASCADE;
DROP TABLE IF EXISTS patterns CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS profiles CASCADE;

DROP FUNCTION IF EXISTS update_updated_at_column() CASCADE;

DROP TYPE IF EXISTS pattern_field;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS entry_type;
";
