//! simple_bank - PostgreSQL data-access layer for accounts, entries and transfers
//!
//! # Modules
//!
//! - [`store`] - Record store, transaction coordinator, transfer orchestrator
//! - [`db`] - Connection pool and schema bootstrap
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing subscriber setup
//! - [`random`] - Seeded fixture data for tests

pub mod config;
pub mod db;
pub mod logging;
pub mod random;
pub mod store;

// Convenient re-exports at crate root
pub use db::Database;
pub use store::{
    Account, Entry, Queries, Store, StoreError, Transfer, TransferTxParams, TransferTxResult,
    TxError,
};
