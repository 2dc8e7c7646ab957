use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entry_position", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Debit,
    Credit,
}

impl Position {
    pub fn opposite(&self) -> Self {
        match self {
            Position::Debit => Position::Credit,
            Position::Credit => Position::Debit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Debit => "debit",
            Position::Credit => "credit",
        }
    }
}

/// Journal header: one balanced accounting transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Journal {
    pub id: Uuid,
    pub posted_at: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Journal {
    pub fn new(posted_at: NaiveDate, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            posted_at,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One debit or credit line of a journal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub journal_id: Uuid,
    pub account_id: Uuid,
    /// Always positive; the side is carried by `position`.
    pub amount: Decimal,
    pub position: Position,
}

impl JournalEntry {
    pub fn debit(journal_id: Uuid, account_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            journal_id,
            account_id,
            amount,
            position: Position::Debit,
        }
    }

    pub fn credit(journal_id: Uuid, account_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            journal_id,
            account_id,
            amount,
            position: Position::Credit,
        }
    }
}

/// Fractional digits a journal line can carry.
pub const AMOUNT_SCALE: u32 = 4;

/// Integer digits a journal line can carry. Matches `NUMERIC(19, 4)` and keeps
/// per-account sums well inside the 28 digits `Decimal` can hold.
pub const AMOUNT_INTEGER_DIGITS: u32 = 15;

/// Checks that `amount` is positive and fits the stored precision.
pub fn check_amount(amount: Decimal) -> Result<(), JournalEntryError> {
    if amount <= Decimal::ZERO {
        return Err(JournalEntryError::NonPositiveAmount(amount));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(JournalEntryError::TooManyFractionalDigits(amount));
    }
    if amount >= Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS)) {
        return Err(JournalEntryError::AmountTooLarge(amount));
    }
    Ok(())
}

/// The two lines of a simple journal. Construction enforces debit == credit.
#[derive(Debug, Clone)]
pub struct JournalEntryPair {
    pub debit: JournalEntry,
    pub credit: JournalEntry,
}

impl JournalEntryPair {
    pub fn new(debit: JournalEntry, credit: JournalEntry) -> Result<Self, JournalEntryError> {
        if debit.position != Position::Debit {
            return Err(JournalEntryError::WrongPosition {
                expected: Position::Debit,
            });
        }
        if credit.position != Position::Credit {
            return Err(JournalEntryError::WrongPosition {
                expected: Position::Credit,
            });
        }
        if debit.journal_id != credit.journal_id {
            return Err(JournalEntryError::JournalMismatch);
        }
        check_amount(debit.amount)?;
        if debit.amount != credit.amount {
            return Err(JournalEntryError::Unbalanced {
                debit_amount: debit.amount,
                credit_amount: credit.amount,
            });
        }
        Ok(Self { debit, credit })
    }

    /// Builds a balanced pair for `journal_id`.
    pub fn for_journal(
        journal_id: Uuid,
        debit_account_id: Uuid,
        credit_account_id: Uuid,
        amount: Decimal,
    ) -> Result<Self, JournalEntryError> {
        Self::new(
            JournalEntry::debit(journal_id, debit_account_id, amount),
            JournalEntry::credit(journal_id, credit_account_id, amount),
        )
    }

    pub fn amount(&self) -> Decimal {
        self.debit.amount
    }

    pub fn journal_id(&self) -> Uuid {
        self.debit.journal_id
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JournalEntryError {
    #[error("expected a {} line", .expected.as_str())]
    WrongPosition { expected: Position },
    #[error("journal lines belong to different journals")]
    JournalMismatch,
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} has more than {max} fractional digits", max = AMOUNT_SCALE)]
    TooManyFractionalDigits(Decimal),
    #[error("amount {0} exceeds {max} integer digits", max = AMOUNT_INTEGER_DIGITS)]
    AmountTooLarge(Decimal),
    #[error("unbalanced journal: debit {debit_amount} != credit {credit_amount}")]
    Unbalanced {
        debit_amount: Decimal,
        credit_amount: Decimal,
    },
}
