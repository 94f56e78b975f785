//! Row types and parameter structs for the record store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::error::StoreError;

/// Bank account. `balance` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Balance-affecting entry: positive = credit, negative = debit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Money movement between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AddAccountBalanceParams {
    pub id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateEntryParams {
    pub account_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateTransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Window over an id-ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// LIMIT/OFFSET must be non-negative, otherwise Postgres rejects the query
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.limit < 0 {
            return Err(StoreError::InvalidArgument(format!(
                "limit must be non-negative, got {}",
                self.limit
            )));
        }
        if self.offset < 0 {
            return Err(StoreError::InvalidArgument(format!(
                "offset must be non-negative, got {}",
                self.offset
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsParams {
    /// Restrict to one owner when set
    pub owner: Option<String>,
    pub page: Page,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListEntriesParams {
    pub account_id: i64,
    pub page: Page,
}

/// Listing transfers touching one account
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListTransfersParams {
    pub account_id: i64,
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_validate() {
        assert!(Page::new(5, 5).validate().is_ok());
        assert!(Page::new(0, 0).validate().is_ok());
        assert!(Page::new(-1, 0).validate().unwrap_err().is_invalid_argument());
        assert!(Page::new(5, -5).validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_transfer_serializes_snake_case() {
        let transfer = Transfer {
            id: 1,
            from_account_id: 2,
            to_account_id: 3,
            amount: 200,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&transfer).unwrap();
        assert_eq!(json["from_account_id"], 2);
        assert_eq!(json["to_account_id"], 3);
        assert_eq!(json["amount"], 200);
    }
}
