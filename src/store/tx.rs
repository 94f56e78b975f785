//! Transaction Coordinator
//!
//! `Store::exec_tx` begins a transaction, binds a [`Queries`] to it, runs the
//! caller's unit of work once, then commits or rolls back.
//!
//! Rollback guarantees:
//! - work error → rollback, original error returned
//! - work error + rollback error → `TxError::Rollback` carrying both
//! - timeout → work future dropped, explicit rollback, `TxError::TimedOut`
//! - caller drops the future → the sqlx `Transaction` guard rolls back on drop

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::PgPool;
use tracing::{debug, error, warn};

use super::error::{StoreError, TxError};
use super::queries::Queries;
use crate::db::Database;

/// Entry point for transactional work over the pool
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
    tx_timeout: Option<Duration>,
}

impl Store {
    /// Create a store sharing the database's pool. No default timeout.
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            tx_timeout: None,
        }
    }

    /// Apply `timeout` to every `exec_tx` unit of work
    pub fn with_tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = Some(timeout);
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `work` inside one transaction.
    ///
    /// ```ignore
    /// let entry = store
    ///     .exec_tx(|q| Box::pin(async move { q.create_entry(params).await }))
    ///     .await?;
    /// ```
    pub async fn exec_tx<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Queries<'_>) -> BoxFuture<'t, Result<T, StoreError>> + Send,
    {
        self.run_tx(self.tx_timeout, work).await
    }

    /// Same as [`Store::exec_tx`] with an explicit bound on the unit of work
    pub async fn exec_tx_with_timeout<T, F>(
        &self,
        timeout: Duration,
        work: F,
    ) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Queries<'_>) -> BoxFuture<'t, Result<T, StoreError>> + Send,
    {
        self.run_tx(Some(timeout), work).await
    }

    async fn run_tx<T, F>(&self, timeout: Option<Duration>, work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Queries<'_>) -> BoxFuture<'t, Result<T, StoreError>> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(TxError::Begin)?;

        let outcome = {
            let mut q = Queries::new(&mut tx);
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, work(&mut q)).await {
                    Ok(result) => result,
                    Err(_) => Err(TxError::TimedOut(limit).into()),
                },
                None => work(&mut q).await,
            }
        };

        match outcome {
            Ok(value) => {
                tx.commit().await.map_err(TxError::Commit)?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => match tx.rollback().await {
                Ok(()) => {
                    warn!(error = %err, "Transaction rolled back");
                    Err(err)
                }
                Err(rollback) => {
                    error!(error = %err, rollback_error = %rollback, "Rollback failed");
                    Err(TxError::Rollback {
                        work: Box::new(err),
                        rollback,
                    }
                    .into())
                }
            },
        }
    }
}
