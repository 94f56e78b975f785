//! Record store handle
//!
//! `Queries` wraps a `&mut PgConnection`. A pooled connection
//! (`pool.acquire()`) and an open transaction (`&mut *tx`) both deref to one,
//! so the same statements run standalone or inside `Store::exec_tx`.
//!
//! ```ignore
//! let mut conn = db.pool().acquire().await?;
//! let account = Queries::new(&mut conn).get_account(id).await?;
//!
//! let mut tx = db.pool().begin().await?;
//! Queries::new(&mut tx).add_account_balance(params).await?;
//! tx.commit().await?;
//! ```
//!
//! Every method is a single round-trip and never retries.

use sqlx::PgConnection;

/// Typed statements against `accounts`, `entries` and `transfers`
pub struct Queries<'c> {
    pub(super) conn: &'c mut PgConnection,
}

impl<'c> Queries<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}
