//! Initial database migration.
//!
//! Creates the enums, the four ledger tables, their indexes and the
//! `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(FUNCTIONS_SQL).await?;

        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE transaction_type AS ENUM ('income', 'expense');
CREATE TYPE category_type AS ENUM ('income', 'expense', 'both');
CREATE TYPE transaction_status AS ENUM ('pending', 'completed', 'cancelled');
CREATE TYPE budget_period AS ENUM ('weekly', 'monthly', 'quarterly', 'yearly');
CREATE TYPE notification_type AS ENUM ('budget_alert');
CREATE TYPE notification_priority AS ENUM ('low', 'medium', 'high');
";

const FUNCTIONS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at() RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id              UUID PRIMARY KEY,
    user_id         UUID NOT NULL,
    name            VARCHAR(100) NOT NULL,
    icon            VARCHAR(50),
    color           VARCHAR(20),
    category_type   category_type NOT NULL DEFAULT 'expense',
    budget_limit    NUMERIC(15, 2),
    sort_order      INTEGER NOT NULL DEFAULT 0,
    is_active       BOOLEAN NOT NULL DEFAULT TRUE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_categories_user_name UNIQUE (user_id, name)
);

CREATE INDEX idx_categories_user ON categories(user_id);

CREATE TRIGGER trg_categories_updated_at
    BEFORE UPDATE ON categories
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id                  UUID PRIMARY KEY,
    user_id             UUID NOT NULL,
    category_id         UUID NOT NULL REFERENCES categories(id),
    transaction_type    transaction_type NOT NULL,
    amount              NUMERIC(15, 2) NOT NULL,
    description         VARCHAR(255) NOT NULL,
    transaction_date    DATE NOT NULL,
    payment_method      VARCHAR(50) NOT NULL DEFAULT 'cash',
    reference_number    VARCHAR(100),
    notes               TEXT,
    status              transaction_status NOT NULL DEFAULT 'completed',
    is_deleted          BOOLEAN NOT NULL DEFAULT FALSE,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_transactions_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_transactions_user_date ON transactions(user_id, transaction_date)
    WHERE is_deleted = FALSE;
CREATE INDEX idx_transactions_user_category ON transactions(user_id, category_id, transaction_type)
    WHERE is_deleted = FALSE;

CREATE TRIGGER trg_transactions_updated_at
    BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id                  UUID PRIMARY KEY,
    user_id             UUID NOT NULL,
    category_id         UUID NOT NULL REFERENCES categories(id),
    budget_amount       NUMERIC(15, 2) NOT NULL,
    period              budget_period NOT NULL DEFAULT 'monthly',
    start_date          DATE NOT NULL,
    end_date            DATE NOT NULL,
    alert_threshold     NUMERIC(5, 2) NOT NULL DEFAULT 80.00,
    is_active           BOOLEAN NOT NULL DEFAULT TRUE,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_budgets_amount_positive CHECK (budget_amount > 0),
    CONSTRAINT chk_budgets_dates CHECK (start_date < end_date),
    CONSTRAINT chk_budgets_threshold CHECK (alert_threshold BETWEEN 0 AND 100)
);

CREATE INDEX idx_budgets_active_lookup ON budgets(user_id, category_id, period, start_date, end_date)
    WHERE is_active = TRUE;

CREATE TRIGGER trg_budgets_updated_at
    BEFORE UPDATE ON budgets
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const NOTIFICATIONS_SQL: &str = r"
CREATE TABLE notifications (
    id                  UUID PRIMARY KEY,
    user_id             UUID NOT NULL,
    notification_type   notification_type NOT NULL,
    title               VARCHAR(255) NOT NULL,
    message             TEXT NOT NULL,
    related_id          UUID,
    related_type        VARCHAR(50),
    priority            notification_priority NOT NULL DEFAULT 'medium',
    is_read             BOOLEAN NOT NULL DEFAULT FALSE,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_notifications_user_unread ON notifications(user_id, is_read);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS notifications;
DROP TABLE IF EXISTS budgets;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS categories;
DROP FUNCTION IF EXISTS set_updated_at();
DROP TYPE IF EXISTS notification_priority;
DROP TYPE IF EXISTS notification_type;
DROP TYPE IF EXISTS budget_period;
DROP TYPE IF EXISTS transaction_status;
DROP TYPE IF EXISTS category_type;
DROP TYPE IF EXISTS transaction_type;
";
