//! Transfer statements and per-account aggregates

use super::error::StoreError;
use super::models::{CreateTransferParams, ListTransfersParams, Transfer};
use super::queries::Queries;

/// Which side of a transfer the listed account must be on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Either,
    From,
    To,
}

impl Side {
    fn predicate(self) -> &'static str {
        match self {
            Side::Either => "from_account_id = $1 OR to_account_id = $1",
            Side::From => "from_account_id = $1",
            Side::To => "to_account_id = $1",
        }
    }
}

impl Queries<'_> {
    pub async fn create_transfer(
        &mut self,
        arg: CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        let transfer: Transfer = sqlx::query_as(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(arg.from_account_id)
        .bind(arg.to_account_id)
        .bind(arg.amount)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(transfer)
    }

    pub async fn get_transfer(&mut self, id: i64) -> Result<Transfer, StoreError> {
        sqlx::query_as(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1 LIMIT 1"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| StoreError::not_found("transfer", id))
    }

    /// Transfers where the account is either sender or recipient
    pub async fn list_transfers(
        &mut self,
        arg: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        self.list_transfers_where(Side::Either, arg).await
    }

    pub async fn list_transfers_by_from_account(
        &mut self,
        arg: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        self.list_transfers_where(Side::From, arg).await
    }

    pub async fn list_transfers_by_to_account(
        &mut self,
        arg: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        self.list_transfers_where(Side::To, arg).await
    }

    /// Sum of all amounts sent by the account, 0 when it never sent anything
    pub async fn total_amount_sent_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<i64, StoreError> {
        self.total_amount_where(Side::From, account_id).await
    }

    /// Sum of all amounts received by the account, 0 when it never received anything
    pub async fn total_amount_received_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<i64, StoreError> {
        self.total_amount_where(Side::To, account_id).await
    }

    async fn list_transfers_where(
        &mut self,
        side: Side,
        arg: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        arg.page.validate()?;

        // The predicate comes from a fixed enum, never from caller input
        let sql = format!(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers
               WHERE {}
               ORDER BY id
               LIMIT $2 OFFSET $3"#,
            side.predicate()
        );

        let rows: Vec<Transfer> = sqlx::query_as(&sql)
            .bind(arg.account_id)
            .bind(arg.page.limit)
            .bind(arg.page.offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows)
    }

    /// A sum past `i64::MAX` fails the cast with SQLSTATE 22003. Nothing was
    /// written, so that is reported as `Database`, not `ConstraintViolation`.
    async fn total_amount_where(&mut self, side: Side, account_id: i64) -> Result<i64, StoreError> {
        // SUM(BIGINT) is NUMERIC in Postgres; cast back so it decodes as i64
        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM transfers WHERE {}",
            side.predicate()
        );

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(account_id)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(StoreError::Database)?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_predicates_bind_single_account_param() {
        for side in [Side::Either, Side::From, Side::To] {
            assert!(side.predicate().contains("$1"));
            assert!(!side.predicate().contains("$2"));
        }
        assert!(Side::Either.predicate().contains(" OR "));
    }
}
