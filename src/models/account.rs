use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Position;

/// Account types following double-entry bookkeeping principles.
/// Each type has a home position that determines which side carries a positive balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned. Debits increase.
    Asset,
    /// Amounts owed. Credits increase.
    Liability,
    /// Owner's residual interest. Credits increase.
    Equity,
    /// Income earned. Credits increase.
    Revenue,
    /// Costs incurred. Debits increase.
    Expense,
}

impl AccountType {
    /// Returns the side on which a normal balance for this type is positive.
    pub fn home_position(&self) -> Position {
        match self {
            AccountType::Asset | AccountType::Expense => Position::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                Position::Credit
            }
        }
    }
}

/// A chart-of-accounts entry. Accounts are seeded externally; postings reference them by name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub home_position: Position,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account whose home position follows its type.
    pub fn new(code: Option<String>, name: String, account_type: AccountType) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            name,
            account_type,
            home_position: account_type.home_position(),
            created_at: Utc::now(),
        }
    }

    /// Returns true if the stored home position agrees with the account type.
    pub fn is_consistent(&self) -> bool {
        self.home_position == self.account_type.home_position()
    }
}
