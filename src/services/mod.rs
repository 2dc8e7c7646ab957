pub mod account_service;
pub mod balance_service;
pub mod ledger_service;
pub mod posting_service;

pub use account_service::AccountService;
pub use balance_service::BalanceService;
pub use ledger_service::{LedgerApi, LedgerService};
pub use posting_service::{PostJournalCommand, PostedJournal, PostingService};
