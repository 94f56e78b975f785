//! Record store, transaction coordinator and transfer orchestrator
//!
//! # Layers
//!
//! ```text
//! Store::transfer_tx   (orchestrator: validation, lock order)
//!        │
//! Store::exec_tx       (begin → work → commit / rollback)
//!        │
//! Queries              (typed statements over &mut PgConnection)
//!        │
//!   PostgreSQL
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Atomic transfer**: transfer row, both entries and both balance
//!    updates commit together or not at all
//! 2. **Lock order**: balance updates always go lower account id first
//! 3. **Single mutation path**: balances only change through
//!    `Queries::add_account_balance`
//! 4. **No retries**: every failure goes straight back to the caller

mod accounts;
mod entries;
pub mod error;
pub mod models;
pub mod queries;
pub mod transfer_tx;
mod transfers;
pub mod tx;

// Re-exports for convenience
pub use error::{StoreError, TxError};
pub use models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Entry, ListAccountsParams, ListEntriesParams, ListTransfersParams, Page,
    Transfer,
};
pub use queries::Queries;
pub use transfer_tx::{TransferTxParams, TransferTxResult};
pub use tx::Store;
