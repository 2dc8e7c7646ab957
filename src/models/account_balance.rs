use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountType, Position};

/// Per-account debit/credit totals from the trial balance query.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountTotalsRow {
    pub account_id: Uuid,
    pub code: Option<String>,
    pub account_name: String,
    pub account_type: AccountType,
    pub home_position: Position,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

/// One line of the trial balance.
///
/// `home_signed_balance` is positive when the account carries more activity on
/// its home side, whatever that side is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: Uuid,
    pub code: Option<String>,
    pub account_name: String,
    pub account_type: AccountType,
    pub home_position: Position,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
    /// `debit_total - credit_total`.
    pub raw_balance: Decimal,
    pub balance_position: Position,
    pub home_signed_balance: Decimal,
}

impl AccountBalance {
    pub fn from_totals(row: AccountTotalsRow) -> Self {
        let raw_balance = row.debit_total - row.credit_total;
        // Ties go to debit.
        let balance_position = if row.debit_total >= row.credit_total {
            Position::Debit
        } else {
            Position::Credit
        };
        let home_signed_balance = match row.home_position {
            Position::Debit => raw_balance,
            Position::Credit => row.credit_total - row.debit_total,
        };

        Self {
            account_id: row.account_id,
            code: row.code,
            account_name: row.account_name,
            account_type: row.account_type,
            home_position: row.home_position,
            debit_total: row.debit_total,
            credit_total: row.credit_total,
            raw_balance,
            balance_position,
            home_signed_balance,
        }
    }

    /// Returns true if the account has no postings at all.
    pub fn is_inactive(&self) -> bool {
        self.debit_total.is_zero() && self.credit_total.is_zero()
    }
}

/// Sum of all debit and credit totals; equal sides mean the ledger is in balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

impl TrialBalanceTotals {
    pub fn from_balances(balances: &[AccountBalance]) -> Self {
        balances.iter().fold(
            Self {
                debit_total: Decimal::ZERO,
                credit_total: Decimal::ZERO,
            },
            |acc, b| Self {
                debit_total: acc.debit_total + b.debit_total,
                credit_total: acc.credit_total + b.credit_total,
            },
        )
    }

    pub fn is_balanced(&self) -> bool {
        self.debit_total == self.credit_total
    }
}
