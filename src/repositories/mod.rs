pub mod account_repository;
pub mod balance_repository;
pub mod journal_repository;

pub use account_repository::AccountRepository;
pub use balance_repository::BalanceRepository;
pub use journal_repository::JournalRepository;
