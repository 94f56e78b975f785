//! Entry statements

use super::error::StoreError;
use super::models::{CreateEntryParams, Entry, ListEntriesParams};
use super::queries::Queries;

impl Queries<'_> {
    pub async fn create_entry(&mut self, arg: CreateEntryParams) -> Result<Entry, StoreError> {
        let entry: Entry = sqlx::query_as(
            r#"INSERT INTO entries (account_id, amount)
               VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(arg.account_id)
        .bind(arg.amount)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(entry)
    }

    pub async fn get_entry(&mut self, id: i64) -> Result<Entry, StoreError> {
        sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE id = $1 LIMIT 1"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("entry", id))
    }

    /// Entries of one account in creation (id) order
    pub async fn list_entries_by_account(
        &mut self,
        arg: ListEntriesParams,
    ) -> Result<Vec<Entry>, StoreError> {
        arg.page.validate()?;

        let rows: Vec<Entry> = sqlx::query_as(
            r#"SELECT id, account_id, amount, created_at
               FROM entries
               WHERE account_id = $1
               ORDER BY id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(arg.account_id)
        .bind(arg.page.limit)
        .bind(arg.page.offset)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }
}
