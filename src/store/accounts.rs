//! Account statements

use super::error::StoreError;
use super::models::{Account, AddAccountBalanceParams, CreateAccountParams, ListAccountsParams};
use super::queries::Queries;

const ACCOUNT_COLUMNS: &str = "id, owner, balance, currency, created_at";

impl Queries<'_> {
    /// Insert an account with its opening balance
    pub async fn create_account(
        &mut self,
        arg: &CreateAccountParams,
    ) -> Result<Account, StoreError> {
        let account: Account = sqlx::query_as(&format!(
            r#"INSERT INTO accounts (owner, balance, currency)
               VALUES ($1, $2, $3)
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(&arg.owner)
        .bind(arg.balance)
        .bind(&arg.currency)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(account)
    }

    /// Get account by ID
    pub async fn get_account(&mut self, id: i64) -> Result<Account, StoreError> {
        sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1 LIMIT 1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", id))
    }

    /// Get account by ID and hold its row lock until the transaction ends.
    ///
    /// `FOR NO KEY UPDATE` so that inserts referencing the account through a
    /// foreign key (which take `FOR KEY SHARE`) are not blocked.
    pub async fn get_account_for_update(&mut self, id: i64) -> Result<Account, StoreError> {
        sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1 LIMIT 1 FOR NO KEY UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", id))
    }

    /// List accounts in id order, optionally for a single owner
    pub async fn list_accounts(
        &mut self,
        arg: &ListAccountsParams,
    ) -> Result<Vec<Account>, StoreError> {
        arg.page.validate()?;

        let rows: Vec<Account> = sqlx::query_as(&format!(
            r#"SELECT {ACCOUNT_COLUMNS} FROM accounts
               WHERE ($1::VARCHAR IS NULL OR owner = $1)
               ORDER BY id
               LIMIT $2 OFFSET $3"#
        ))
        .bind(arg.owner.as_deref())
        .bind(arg.page.limit)
        .bind(arg.page.offset)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// Add `amount` (may be negative) to the stored balance in one statement
    /// and return the updated row. The only balance mutation path.
    pub async fn add_account_balance(
        &mut self,
        arg: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        sqlx::query_as(&format!(
            r#"UPDATE accounts
               SET balance = balance + $1
               WHERE id = $2
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(arg.amount)
        .bind(arg.id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("account", arg.id))
    }
}
