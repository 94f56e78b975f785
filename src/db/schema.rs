//! PostgreSQL DDL for accounts, entries and transfers
//!
//! Every statement is idempotent (`IF NOT EXISTS`) so bootstrapping an
//! existing database is a no-op.

/// Advisory lock key serializing schema bootstrap across processes
pub const SCHEMA_LOCK_KEY: i64 = 0x5EED_BA4C;

pub const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id          BIGSERIAL PRIMARY KEY,
    owner       VARCHAR NOT NULL,
    balance     BIGINT NOT NULL,
    currency    VARCHAR NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// `amount` is signed: positive = credit, negative = debit
pub const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id          BIGSERIAL PRIMARY KEY,
    account_id  BIGINT NOT NULL REFERENCES accounts (id),
    amount      BIGINT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

pub const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers (
    id               BIGSERIAL PRIMARY KEY,
    from_account_id  BIGINT NOT NULL REFERENCES accounts (id),
    to_account_id    BIGINT NOT NULL REFERENCES accounts (id),
    amount           BIGINT NOT NULL CHECK (amount > 0),
    created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

pub const CREATE_INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_accounts_owner ON accounts (owner)",
    "CREATE INDEX IF NOT EXISTS idx_entries_account_id ON entries (account_id)",
    "CREATE INDEX IF NOT EXISTS idx_transfers_from ON transfers (from_account_id)",
    "CREATE INDEX IF NOT EXISTS idx_transfers_to ON transfers (to_account_id)",
    "CREATE INDEX IF NOT EXISTS idx_transfers_from_to ON transfers (from_account_id, to_account_id)",
];

/// Execution order: tables before the tables that reference them, then indexes
pub const STATEMENTS: [&str; 8] = [
    CREATE_ACCOUNTS_TABLE,
    CREATE_ENTRIES_TABLE,
    CREATE_TRANSFERS_TABLE,
    CREATE_INDEXES[0],
    CREATE_INDEXES[1],
    CREATE_INDEXES[2],
    CREATE_INDEXES[3],
    CREATE_INDEXES[4],
];
