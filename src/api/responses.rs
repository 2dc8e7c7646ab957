use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;
use crate::models::{Account, AccountBalance, AccountType, Position};
use crate::observability::HealthStatus;

/// Error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Returned after a journal is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalPostedResponse {
    #[serde(rename = "journalId")]
    pub journal_id: Uuid,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            database: "connected".to_string(),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            database: "disconnected".to_string(),
        }
    }
}

/// Account response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: String,
    pub account_type: AccountType,
    pub home_position: Position,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            home_position: account.home_position,
        }
    }
}

/// Trial balance line as sent to clients. Amounts become JSON numbers here and nowhere earlier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub account_id: Uuid,
    pub code: Option<String>,
    pub account_name: String,
    pub account_type: AccountType,
    pub home_position: Position,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_balance: Decimal,
    pub balance_position: Position,
    #[serde(with = "rust_decimal::serde::float")]
    pub home_signed_balance: Decimal,
}

impl From<AccountBalance> for BalanceResponse {
    fn from(balance: AccountBalance) -> Self {
        Self {
            account_id: balance.account_id,
            code: balance.code,
            account_name: balance.account_name,
            account_type: balance.account_type,
            home_position: balance.home_position,
            debit_total: balance.debit_total,
            credit_total: balance.credit_total,
            raw_balance: balance.raw_balance,
            balance_position: balance.balance_position,
            home_signed_balance: balance.home_signed_balance,
        }
    }
}
