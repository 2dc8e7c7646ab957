use crate::error::{AppError, Result};
use crate::models::{AccountTotalsRow, AccountType, Position};
use anyhow::anyhow;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Trial balance row with the sums still in Postgres' text form.
#[derive(Debug, FromRow)]
struct TotalsRecord {
    account_id: Uuid,
    code: Option<String>,
    account_name: String,
    account_type: AccountType,
    home_position: Position,
    debit_total: String,
    credit_total: String,
}

impl TryFrom<TotalsRecord> for AccountTotalsRow {
    type Error = AppError;

    fn try_from(record: TotalsRecord) -> Result<Self> {
        Ok(Self {
            debit_total: parse_total(&record.debit_total, record.account_id)?,
            credit_total: parse_total(&record.credit_total, record.account_id)?,
            account_id: record.account_id,
            code: record.code,
            account_name: record.account_name,
            account_type: record.account_type,
            home_position: record.home_position,
        })
    }
}

/// Sums outside `Decimal`'s range become an error instead of a rounded value.
fn parse_total(text: &str, account_id: Uuid) -> Result<Decimal> {
    Decimal::from_str_exact(text).map_err(|e| {
        AppError::Internal(anyhow!(
            "total {} for account {} does not fit a decimal: {}",
            text,
            account_id,
            e
        ))
    })
}

/// Read-only aggregation over journal lines.
pub struct BalanceRepository {
    pool: PgPool,
}

impl BalanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Debit and credit totals for every account, including accounts without lines.
    ///
    /// Sums are computed in NUMERIC and read back as text, so an out-of-range
    /// total is reported as an error.
    pub async fn trial_balance(&self) -> Result<Vec<AccountTotalsRow>> {
        let records = sqlx::query_as::<_, TotalsRecord>(
            r#"
            SELECT
                a.id AS account_id,
                a.code,
                a.name AS account_name,
                a.type AS account_type,
                a.home_position,
                COALESCE(SUM(CASE WHEN je.position = 'debit' THEN je.amount ELSE 0 END), 0)::TEXT AS debit_total,
                COALESCE(SUM(CASE WHEN je.position = 'credit' THEN je.amount ELSE 0 END), 0)::TEXT AS credit_total
            FROM accounts a
            LEFT JOIN journal_entries je ON je.account_id = a.id
            GROUP BY a.id, a.code, a.name, a.type, a.home_position
            ORDER BY a.code ASC NULLS LAST, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        records.into_iter().map(AccountTotalsRow::try_from).collect()
    }
}
