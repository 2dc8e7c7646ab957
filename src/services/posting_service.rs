use crate::error::{AppError, Result};
use crate::models::{check_amount, Account, Journal, JournalEntry, JournalEntryPair};
use crate::observability::{get_metrics, mask_amount, LatencyTimer};
use crate::repositories::{AccountRepository, JournalRepository};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

/// Validated input for a two-line journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostJournalCommand {
    pub posted_at: NaiveDate,
    pub debit_account_name: String,
    pub credit_account_name: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// A committed journal with its two lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedJournal {
    pub journal: Journal,
    pub debit_entry: JournalEntry,
    pub credit_entry: JournalEntry,
}

/// Records balanced debit/credit pairs.
pub struct PostingService {
    pool: PgPool,
    account_repo: AccountRepository,
}

impl PostingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            account_repo: AccountRepository::new(pool.clone()),
            pool,
        }
    }

    /// Posts one journal header and its debit and credit lines atomically.
    ///
    /// Nothing is written unless validation and account resolution succeed,
    /// and a failure after `BEGIN` rolls the whole journal back.
    pub async fn post_journal(&self, command: PostJournalCommand) -> Result<PostedJournal> {
        let timer = LatencyTimer::new();
        let metrics = get_metrics();

        let result = self.try_post(command).await;

        match &result {
            Ok(posted) => {
                metrics.record_journal_posted();
                metrics.record_posting_latency(timer.elapsed_ms());
                info!(
                    journal_id = %posted.journal.id,
                    posted_at = %posted.journal.posted_at,
                    amount = %mask_amount(&posted.debit_entry.amount),
                    "Journal posted"
                );
            }
            Err(e) => {
                metrics.record_posting_rejected(e.kind());
                if e.is_client_error() {
                    info!(reason = e.kind(), "Journal rejected: {}", e);
                } else {
                    tracing::error!(reason = e.kind(), "Journal posting failed: {}", e);
                }
            }
        }

        result
    }

    async fn try_post(&self, command: PostJournalCommand) -> Result<PostedJournal> {
        Self::validate_command(&command)?;

        let debit_account = self.resolve_account(command.debit_account_name.trim()).await?;
        let credit_account = self.resolve_account(command.credit_account_name.trim()).await?;
        debug!(
            debit_account = %debit_account.name,
            credit_account = %credit_account.name,
            "Accounts resolved"
        );

        let journal = Journal::new(command.posted_at, command.description);
        let pair = JournalEntryPair::for_journal(
            journal.id,
            debit_account.id,
            credit_account.id,
            command.amount,
        )
        .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        match Self::write_journal(&mut *tx, &journal, &pair).await {
            Ok(posted) => {
                tx.commit().await.map_err(AppError::Database)?;
                Ok(posted)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(journal_id = %journal.id, "Rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn write_journal(
        conn: &mut PgConnection,
        journal: &Journal,
        pair: &JournalEntryPair,
    ) -> Result<PostedJournal> {
        let journal = JournalRepository::insert_journal(conn, journal).await?;
        let debit_entry = JournalRepository::insert_entry(conn, &pair.debit).await?;
        let credit_entry = JournalRepository::insert_entry(conn, &pair.credit).await?;

        Ok(PostedJournal {
            journal,
            debit_entry,
            credit_entry,
        })
    }

    /// Resolves a name to exactly one account. Never creates accounts.
    async fn resolve_account(&self, name: &str) -> Result<Account> {
        let mut matches = self.account_repo.find_by_name(name).await?;
        if matches.len() != 1 {
            return Err(AppError::UnknownAccount(name.to_string()));
        }
        matches
            .pop()
            .ok_or_else(|| AppError::UnknownAccount(name.to_string()))
    }

    pub fn validate_command(command: &PostJournalCommand) -> Result<()> {
        if command.debit_account_name.trim().is_empty() {
            return Err(AppError::Validation("Debit account name cannot be empty".to_string()));
        }

        if command.credit_account_name.trim().is_empty() {
            return Err(AppError::Validation("Credit account name cannot be empty".to_string()));
        }

        check_amount(command.amount).map_err(|e| AppError::Validation(e.to_string()))
    }
}
