use crate::error::{AppError, Result};
use crate::models::Account;
use sqlx::PgPool;

/// Repository for the chart of accounts.
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an account. Used for seeding; the posting path never creates accounts.
    pub async fn create(&self, account: &Account) -> Result<Account> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, code, name, type, home_position, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, name, type, home_position, created_at
            "#,
        )
        .bind(account.id)
        .bind(&account.code)
        .bind(&account.name)
        .bind(account.account_type)
        .bind(account.home_position)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    /// Returns every account carrying `name`. Callers decide what a non-unique match means.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, code, name, type, home_position, created_at
            FROM accounts
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    /// Lists all accounts in chart order.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, code, name, type, home_position, created_at
            FROM accounts
            ORDER BY code ASC NULLS LAST, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }
}
