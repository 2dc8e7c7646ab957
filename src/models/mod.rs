pub mod account;
pub mod account_balance;
pub mod journal;

pub use account::{Account, AccountType};
pub use account_balance::{AccountBalance, AccountTotalsRow, TrialBalanceTotals};
pub use journal::{
    check_amount, Journal, JournalEntry, JournalEntryError, JournalEntryPair, Position,
    AMOUNT_INTEGER_DIGITS, AMOUNT_SCALE,
};
