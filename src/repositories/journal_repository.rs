use crate::error::{AppError, Result};
use crate::models::{Journal, JournalEntry};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Repository for journals and their lines.
///
/// Inserts run on a caller-owned connection so that a header and its lines
/// share one transaction.
pub struct JournalRepository {
    pool: PgPool,
}

impl JournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a journal header.
    pub async fn insert_journal(conn: &mut PgConnection, journal: &Journal) -> Result<Journal> {
        let row = sqlx::query_as::<_, Journal>(
            r#"
            INSERT INTO journals (id, posted_at, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, posted_at, description, created_at, updated_at
            "#,
        )
        .bind(journal.id)
        .bind(journal.posted_at)
        .bind(&journal.description)
        .bind(journal.created_at)
        .bind(journal.updated_at)
        .fetch_one(conn)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    /// Inserts a single journal line.
    pub async fn insert_entry(conn: &mut PgConnection, entry: &JournalEntry) -> Result<JournalEntry> {
        let row = sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (id, journal_id, account_id, amount, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, journal_id, account_id, amount, position
            "#,
        )
        .bind(entry.id)
        .bind(entry.journal_id)
        .bind(entry.account_id)
        .bind(entry.amount)
        .bind(entry.position)
        .fetch_one(conn)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    /// Finds a journal header by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Journal>> {
        let row = sqlx::query_as::<_, Journal>(
            r#"
            SELECT id, posted_at, description, created_at, updated_at
            FROM journals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row)
    }

    /// Lines of one journal, debit first.
    pub async fn find_entries(&self, journal_id: Uuid) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT id, journal_id, account_id, amount, position
            FROM journal_entries
            WHERE journal_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(journal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    /// Counts lines posted against an account.
    pub async fn count_entries_for_account(&self, account_id: Uuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM journal_entries
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(row.0)
    }
}
