use crate::error::Result;
use crate::models::Account;
use crate::repositories::AccountRepository;
use sqlx::PgPool;

/// Read access to the chart of accounts.
pub struct AccountService {
    account_repo: AccountRepository,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            account_repo: AccountRepository::new(pool),
        }
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.account_repo.list().await
    }
}
