//! Transfer Orchestrator
//!
//! One money transfer = one transaction:
//!
//! ```text
//! create transfer → debit entry (from, -amount) → credit entry (to, +amount)
//!                 → balance updates, lower account id first
//! ```
//!
//! # Lock order
//!
//! Both balance updates are issued by ascending account id whatever the
//! direction. Two concurrent transfers A→B and B→A therefore queue on the
//! same row lock first and cannot form a cycle.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::StoreError;
use super::models::{
    Account, AddAccountBalanceParams, CreateEntryParams, CreateTransferParams, Entry, Transfer,
};
use super::queries::Queries;
use super::tx::Store;

/// Input of [`Store::transfer_tx`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Everything a successful transfer created or changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

impl TransferTxParams {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    /// Checked before any storage access
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.amount <= 0 {
            return Err(StoreError::InvalidArgument(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.from_account_id == self.to_account_id {
            return Err(StoreError::InvalidArgument(format!(
                "cannot transfer from account {} to itself",
                self.from_account_id
            )));
        }
        Ok(())
    }

    /// Balance updates in lock order: lower account id first.
    pub fn balance_updates(&self) -> [AddAccountBalanceParams; 2] {
        let debit = AddAccountBalanceParams {
            id: self.from_account_id,
            amount: -self.amount,
        };
        let credit = AddAccountBalanceParams {
            id: self.to_account_id,
            amount: self.amount,
        };

        if self.from_account_id < self.to_account_id {
            [debit, credit]
        } else {
            [credit, debit]
        }
    }
}

impl Store {
    /// Move `amount` from one account to another atomically.
    ///
    /// Fails fast with `InvalidArgument` for a non-positive amount or a
    /// self-transfer. Any later failure rolls back the whole transaction.
    pub async fn transfer_tx(&self, arg: TransferTxParams) -> Result<TransferTxResult, StoreError> {
        arg.validate()?;

        debug!(
            from = arg.from_account_id,
            to = arg.to_account_id,
            amount = arg.amount,
            "Transfer started"
        );

        let result = self
            .exec_tx(move |q| Box::pin(async move { transfer_in_tx(q, arg).await }))
            .await?;

        info!(
            transfer_id = result.transfer.id,
            from = arg.from_account_id,
            to = arg.to_account_id,
            amount = arg.amount,
            "Transfer committed"
        );

        Ok(result)
    }
}

async fn transfer_in_tx(
    q: &mut Queries<'_>,
    arg: TransferTxParams,
) -> Result<TransferTxResult, StoreError> {
    let transfer = q
        .create_transfer(CreateTransferParams {
            from_account_id: arg.from_account_id,
            to_account_id: arg.to_account_id,
            amount: arg.amount,
        })
        .await?;

    let from_entry = q
        .create_entry(CreateEntryParams {
            account_id: arg.from_account_id,
            amount: -arg.amount,
        })
        .await?;

    let to_entry = q
        .create_entry(CreateEntryParams {
            account_id: arg.to_account_id,
            amount: arg.amount,
        })
        .await?;

    let (from_account, to_account) = add_money(q, &arg).await?;

    Ok(TransferTxResult {
        transfer,
        from_account,
        to_account,
        from_entry,
        to_entry,
    })
}

/// Apply both balance updates in lock order, return `(from, to)` accounts.
async fn add_money(
    q: &mut Queries<'_>,
    arg: &TransferTxParams,
) -> Result<(Account, Account), StoreError> {
    let [first, second] = arg.balance_updates();

    let first_account = q.add_account_balance(first).await?;
    let second_account = q.add_account_balance(second).await?;

    if first.id == arg.from_account_id {
        Ok((first_account, second_account))
    } else {
        Ok((second_account, first_account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert!(
            TransferTxParams::new(1, 2, 0)
                .validate()
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            TransferTxParams::new(1, 2, -5)
                .validate()
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn test_validate_rejects_self_transfer() {
        let err = TransferTxParams::new(7, 7, 100).validate().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("itself"));
    }

    #[test]
    fn test_validate_accepts_regular_transfer() {
        assert!(TransferTxParams::new(1, 2, 1).validate().is_ok());
    }

    #[test]
    fn test_balance_updates_lower_id_first_forward() {
        let [first, second] = TransferTxParams::new(3, 9, 50).balance_updates();
        assert_eq!((first.id, first.amount), (3, -50));
        assert_eq!((second.id, second.amount), (9, 50));
    }

    #[test]
    fn test_balance_updates_lower_id_first_reverse() {
        let [first, second] = TransferTxParams::new(9, 3, 50).balance_updates();
        assert_eq!((first.id, first.amount), (3, 50));
        assert_eq!((second.id, second.amount), (9, -50));
    }

    #[test]
    fn test_opposite_directions_share_lock_order() {
        let forward = TransferTxParams::new(4, 11, 10).balance_updates();
        let backward = TransferTxParams::new(11, 4, 10).balance_updates();
        assert_eq!(forward[0].id, backward[0].id);
        assert_eq!(forward[1].id, backward[1].id);
    }

    #[test]
    fn test_balance_updates_conserve_money() {
        let updates = TransferTxParams::new(2, 1, 200).balance_updates();
        assert_eq!(updates.iter().map(|u| u.amount).sum::<i64>(), 0);
    }
}
