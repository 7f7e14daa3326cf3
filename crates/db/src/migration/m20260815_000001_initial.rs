//! Initial database migration.
//!
//! Creates the enums, case and ledger-source tables, and the period
//! statement tables with their integrity constraints.

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
        // PART 2: CASES & CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CASES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: LEDGER SOURCE (VOUCHERS)
        // ============================================================
        db.execute_unprepared(VOUCHERS_SQL).await?;
        db.execute_unprepared(VOUCHER_LINES_SQL).await?;

        // ============================================================
        // PART 4: PERIOD STATEMENTS
        // ============================================================
        db.execute_unprepared(PERIOD_STATEMENTS_SQL).await?;
        db.execute_unprepared(STATEMENT_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

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
-- Chart-of-accounts classification
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'income',
    'expense'
);

-- Voucher lifecycle
CREATE TYPE voucher_status AS ENUM ('draft', 'issued', 'voided');

-- Period statement lifecycle
CREATE TYPE statement_status AS ENUM ('draft', 'approved', 'submitted');

-- Movement direction
CREATE TYPE movement_direction AS ENUM ('inflow', 'outflow');
";

const CASES_SQL: &str = r"
CREATE TABLE cases (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    rol VARCHAR(50) NOT NULL UNIQUE,
    debtor_name VARCHAR(255) NOT NULL,
    caption TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cases_rol ON cases(rol);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    category VARCHAR(100),
    parent_id UUID REFERENCES accounts(id),
    allow_direct_posting BOOLEAN NOT NULL DEFAULT true,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_type ON accounts(account_type) WHERE is_active = true;
CREATE INDEX idx_accounts_parent ON accounts(parent_id) WHERE parent_id IS NOT NULL;
";

const VOUCHERS_SQL: &str = r"
CREATE TABLE vouchers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    case_id UUID NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
    document_type VARCHAR(50) NOT NULL,
    folio_number VARCHAR(50) NOT NULL,
    issue_date DATE NOT NULL,
    description TEXT NOT NULL,
    subtotal BIGINT NOT NULL DEFAULT 0,
    tax BIGINT NOT NULL DEFAULT 0,
    total BIGINT NOT NULL DEFAULT 0,
    status voucher_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_voucher_amounts CHECK (subtotal >= 0 AND tax >= 0 AND total >= 0)
);

CREATE INDEX idx_vouchers_case_date ON vouchers(case_id, issue_date);
CREATE INDEX idx_vouchers_status ON vouchers(case_id, status) WHERE status = 'issued';
";

const VOUCHER_LINES_SQL: &str = r"
CREATE TABLE voucher_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    voucher_id UUID NOT NULL REFERENCES vouchers(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    description TEXT NOT NULL,
    total_amount BIGINT NOT NULL,
    debit_amount BIGINT NOT NULL DEFAULT 0,
    credit_amount BIGINT NOT NULL DEFAULT 0,
    line_order INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_line_amounts CHECK (
        total_amount >= 0 AND debit_amount >= 0 AND credit_amount >= 0
    ),
    CONSTRAINT chk_line_order CHECK (line_order > 0),
    UNIQUE (voucher_id, line_order)
);

CREATE INDEX idx_voucher_lines_voucher ON voucher_lines(voucher_id);
CREATE INDEX idx_voucher_lines_account ON voucher_lines(account_id);
";

const PERIOD_STATEMENTS_SQL: &str = r"
CREATE TABLE period_statements (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    case_id UUID NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
    -- Snapshot of the case identity at creation time. Court statements keep
    -- the rol and debtor name they were filed under, even if the case row
    -- is corrected later.
    rol VARCHAR(50) NOT NULL,
    debtor_name VARCHAR(255) NOT NULL,
    period_year INTEGER NOT NULL,
    period_month INTEGER NOT NULL,
    opening_balance BIGINT NOT NULL DEFAULT 0,
    total_inflow BIGINT NOT NULL DEFAULT 0,
    total_outflow BIGINT NOT NULL DEFAULT 0,
    closing_balance BIGINT NOT NULL DEFAULT 0,
    status statement_status NOT NULL DEFAULT 'draft',
    observations TEXT,
    generated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_period_month CHECK (period_month BETWEEN 1 AND 12),
    CONSTRAINT chk_period_year CHECK (period_year BETWEEN 1900 AND 2200),
    UNIQUE (case_id, period_year, period_month)
);

CREATE INDEX idx_statements_case_period ON period_statements(case_id, period_year DESC, period_month DESC);
CREATE INDEX idx_statements_status ON period_statements(case_id, status);
";

const STATEMENT_MOVEMENTS_SQL: &str = r"
CREATE TABLE statement_movements (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    statement_id UUID NOT NULL REFERENCES period_statements(id) ON DELETE CASCADE,
    movement_date DATE NOT NULL,
    description TEXT NOT NULL,
    document_type VARCHAR(50),
    document_number VARCHAR(50),
    direction movement_direction NOT NULL,
    amount BIGINT NOT NULL,
    running_balance BIGINT NOT NULL,
    order_index INTEGER NOT NULL,
    is_carry_forward BOOLEAN NOT NULL DEFAULT false,
    account_id UUID REFERENCES accounts(id),
    voucher_id UUID REFERENCES vouchers(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_movement_amount CHECK (amount >= 0),
    CONSTRAINT chk_movement_order CHECK (order_index > 0),
    UNIQUE (statement_id, order_index)
);

CREATE INDEX idx_movements_statement ON statement_movements(statement_id, order_index);
CREATE INDEX idx_movements_voucher ON statement_movements(voucher_id) WHERE voucher_id IS NOT NULL;
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: touch_updated_at
-- Keeps updated_at current on row updates
-- ============================================================
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at := now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_cases_touch
BEFORE UPDATE ON cases
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_accounts_touch
BEFORE UPDATE ON accounts
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_vouchers_touch
BEFORE UPDATE ON vouchers
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

CREATE TRIGGER trg_statements_touch
BEFORE UPDATE ON period_statements
FOR EACH ROW
EXECUTE FUNCTION touch_updated_at();

-- ============================================================
-- FUNCTION: prevent_submitted_modification
-- A submitted statement is immutable
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_submitted_modification()
RETURNS TRIGGER AS $$
BEGIN
    IF OLD.status = 'submitted' THEN
        RAISE EXCEPTION 'Cannot modify a submitted statement.';
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_prevent_submitted_mod
BEFORE UPDATE ON period_statements
FOR EACH ROW
EXECUTE FUNCTION prevent_submitted_modification();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_prevent_submitted_mod ON period_statements;
DROP TRIGGER IF EXISTS trg_statements_touch ON period_statements;
DROP TRIGGER IF EXISTS trg_vouchers_touch ON vouchers;
DROP TRIGGER IF EXISTS trg_accounts_touch ON accounts;
DROP TRIGGER IF EXISTS trg_cases_touch ON cases;

-- Drop functions
DROP FUNCTION IF EXISTS prevent_submitted_modification();
DROP FUNCTION IF EXISTS touch_updated_at();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS statement_movements CASCADE;
DROP TABLE IF EXISTS period_statements CASCADE;
DROP TABLE IF EXISTS voucher_lines CASCADE;
DROP TABLE IF EXISTS vouchers CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS cases CASCADE;

-- Drop enums
DROP TYPE IF EXISTS movement_direction CASCADE;
DROP TYPE IF EXISTS statement_status CASCADE;
DROP TYPE IF EXISTS voucher_status CASCADE;
DROP TYPE IF EXISTS account_type CASCADE;
";
