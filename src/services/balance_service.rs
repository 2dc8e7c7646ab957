use crate::error::Result;
use crate::models::{AccountBalance, TrialBalanceTotals};
use crate::observability::{get_metrics, LatencyTimer};
use crate::repositories::BalanceRepository;
use sqlx::PgPool;
use tracing::{debug, warn};

/// Produces the trial balance. Read-only.
pub struct BalanceService {
    balance_repo: BalanceRepository,
}

impl BalanceService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            balance_repo: BalanceRepository::new(pool),
        }
    }

    /// Per-account totals and home-signed balances, ordered by account code then id.
    pub async fn list_balances(&self) -> Result<Vec<AccountBalance>> {
        let timer = LatencyTimer::new();

        let rows = self.balance_repo.trial_balance().await?;
        let balances: Vec<AccountBalance> = rows.into_iter().map(AccountBalance::from_totals).collect();

        let totals = TrialBalanceTotals::from_balances(&balances);
        if !totals.is_balanced() {
            warn!(
                debit_total = %totals.debit_total,
                credit_total = %totals.credit_total,
                "Trial balance does not balance"
            );
        }

        get_metrics().record_balance_query_latency(timer.elapsed_ms(), balances.len() as u64);
        debug!(
            rows = balances.len(),
            inactive = balances.iter().filter(|b| b.is_inactive()).count(),
            "Trial balance computed"
        );

        Ok(balances)
    }
}
