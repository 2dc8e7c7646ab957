use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Account, AccountBalance};
use crate::services::{AccountService, BalanceService, PostJournalCommand, PostedJournal, PostingService};

/// Operations the presentation layer consumes.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Records one balanced journal and returns it.
    async fn post_journal(&self, command: PostJournalCommand) -> Result<PostedJournal>;

    /// Whole-ledger trial balance.
    async fn list_balances(&self) -> Result<Vec<AccountBalance>>;

    async fn list_accounts(&self) -> Result<Vec<Account>>;
}

/// Postgres-backed ledger.
pub struct LedgerService {
    posting: PostingService,
    balances: BalanceService,
    accounts: AccountService,
}

impl LedgerService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posting: PostingService::new(pool.clone()),
            balances: BalanceService::new(pool.clone()),
            accounts: AccountService::new(pool),
        }
    }
}

#[async_trait]
impl LedgerApi for LedgerService {
    async fn post_journal(&self, command: PostJournalCommand) -> Result<PostedJournal> {
        self.posting.post_journal(command).await
    }

    async fn list_balances(&self) -> Result<Vec<AccountBalance>> {
        self.balances.list_balances().await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.accounts.list_accounts().await
    }
}
