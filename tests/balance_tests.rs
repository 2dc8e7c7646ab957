mod common;

use chrono::NaiveDate;
use ledger_service::models::{AccountBalance, AccountType, Position};
use ledger_service::services::{LedgerApi, LedgerService, PostJournalCommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn command(debit: &str, credit: &str, amount: Decimal) -> PostJournalCommand {
    PostJournalCommand {
        posted_at: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        debit_account_name: debit.to_string(),
        credit_account_name: credit.to_string(),
        amount,
        description: None,
    }
}

fn only(balances: &[AccountBalance], ids: &[Uuid]) -> Vec<AccountBalance> {
    balances
        .iter()
        .filter(|b| ids.contains(&b.account_id))
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_cash_sales_scenario() {
    let pool = common::setup_test_db().await;
    let cash = common::create_account(&pool, "現金", AccountType::Asset).await;
    let sales = common::create_account(&pool, "売上", AccountType::Revenue).await;

    let ledger = LedgerService::new(pool.clone());
    let posted = ledger
        .post_journal(command(&cash.name, &sales.name, dec!(1000)))
        .await
        .expect("Failed to post journal");
    assert!(!posted.journal.id.is_nil());

    let balances = ledger.list_balances().await.expect("Failed to list balances");
    let rows = only(&balances, &[cash.id, sales.id]);
    assert_eq!(rows.len(), 2);

    let cash_row = rows.iter().find(|b| b.account_id == cash.id).unwrap();
    assert_eq!(cash_row.debit_total, dec!(1000));
    assert_eq!(cash_row.credit_total, Decimal::ZERO);
    assert_eq!(cash_row.home_signed_balance, dec!(1000));
    assert_eq!(cash_row.balance_position, Position::Debit);

    let sales_row = rows.iter().find(|b| b.account_id == sales.id).unwrap();
    assert_eq!(sales_row.debit_total, Decimal::ZERO);
    assert_eq!(sales_row.credit_total, dec!(1000));
    assert_eq!(sales_row.home_signed_balance, dec!(1000));
    assert_eq!(sales_row.raw_balance, dec!(-1000));
    assert_eq!(sales_row.balance_position, Position::Credit);
}

#[tokio::test]
async fn test_account_without_entries_reports_zero() {
    let pool = common::setup_test_db().await;
    let idle = common::create_account(&pool, "消耗品費", AccountType::Expense).await;

    let ledger = LedgerService::new(pool.clone());
    let balances = ledger.list_balances().await.expect("Failed to list balances");
    let row = balances
        .iter()
        .find(|b| b.account_id == idle.id)
        .expect("zero-activity account must be listed");

    assert_eq!(row.debit_total, Decimal::ZERO);
    assert_eq!(row.credit_total, Decimal::ZERO);
    assert_eq!(row.home_signed_balance, Decimal::ZERO);
    assert_eq!(row.balance_position, Position::Debit);
}

#[tokio::test]
async fn test_sign_law_for_both_home_positions() {
    let pool = common::setup_test_db().await;
    let cash = common::create_account(&pool, "現金", AccountType::Asset).await;
    let payable = common::create_account(&pool, "買掛金", AccountType::Liability).await;

    let ledger = LedgerService::new(pool.clone());
    // Borrow 500, repay 200.
    ledger
        .post_journal(command(&cash.name, &payable.name, dec!(500)))
        .await
        .unwrap();
    ledger
        .post_journal(command(&payable.name, &cash.name, dec!(200)))
        .await
        .unwrap();

    let balances = ledger.list_balances().await.unwrap();
    for row in only(&balances, &[cash.id, payable.id]) {
        match row.home_position {
            Position::Debit => {
                assert_eq!(row.home_signed_balance, row.debit_total - row.credit_total)
            }
            Position::Credit => {
                assert_eq!(row.home_signed_balance, row.credit_total - row.debit_total)
            }
        }
        assert_eq!(row.home_signed_balance, dec!(300));
    }
}

#[tokio::test]
async fn test_listing_is_idempotent() {
    let pool = common::setup_test_db().await;
    let cash = common::create_account(&pool, "現金", AccountType::Asset).await;
    let salaries = common::create_account(&pool, "給料手当", AccountType::Expense).await;

    let ledger = LedgerService::new(pool.clone());
    ledger
        .post_journal(command(&salaries.name, &cash.name, dec!(123.45)))
        .await
        .unwrap();

    let ids = [cash.id, salaries.id];
    let first = only(&ledger.list_balances().await.unwrap(), &ids);
    let second = only(&ledger.list_balances().await.unwrap(), &ids);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rows_ordered_by_code_with_nulls_last() {
    let pool = common::setup_test_db().await;
    let first = common::create_account_with_code(&pool, "a", Some("990"), AccountType::Asset).await;
    let second = common::create_account_with_code(&pool, "b", Some("991"), AccountType::Asset).await;
    let uncoded = common::create_account_with_code(&pool, "c", None, AccountType::Asset).await;

    let ledger = LedgerService::new(pool.clone());
    let balances = ledger.list_balances().await.unwrap();
    let position = |id| balances.iter().position(|b| b.account_id == id).unwrap();

    assert!(position(first.id) < position(second.id));
    assert!(position(second.id) < position(uncoded.id));

    let last_coded = balances.iter().rposition(|b| b.code.is_some()).unwrap();
    let first_uncoded = balances.iter().position(|b| b.code.is_none()).unwrap();
    assert!(last_coded < first_uncoded);
}

#[tokio::test]
async fn test_seeded_chart_of_accounts_present() {
    let pool = common::setup_test_db().await;
    let ledger = LedgerService::new(pool);

    let accounts = ledger.list_accounts().await.unwrap();
    for name in ["現金", "売掛金", "買掛金", "売上", "消耗品費", "給料手当"] {
        let account = accounts
            .iter()
            .find(|a| a.name == name)
            .unwrap_or_else(|| panic!("seed account {} missing", name));
        assert!(account.is_consistent());
    }
}

#[tokio::test]
async fn test_largest_amounts_still_summed() {
    let pool = common::setup_test_db().await;
    let cash = common::create_account(&pool, "現金", AccountType::Asset).await;
    let sales = common::create_account(&pool, "売上", AccountType::Revenue).await;

    let ledger = LedgerService::new(pool.clone());
    for _ in 0..2 {
        ledger
            .post_journal(command(&cash.name, &sales.name, dec!(999999999999999.9999)))
            .await
            .expect("Failed to post largest amount");
    }

    let balances = ledger.list_balances().await.expect("Failed to list balances");
    let rows = only(&balances, &[cash.id, sales.id]);
    let cash_row = rows.iter().find(|b| b.account_id == cash.id).unwrap();
    let sales_row = rows.iter().find(|b| b.account_id == sales.id).unwrap();

    assert_eq!(cash_row.debit_total, dec!(1999999999999999.9998));
    assert_eq!(sales_row.home_signed_balance, dec!(1999999999999999.9998));
}

#[tokio::test]
async fn test_large_and_small_amounts_summed_exactly() {
    let pool = common::setup_test_db().await;
    let cash = common::create_account(&pool, "現金", AccountType::Asset).await;
    let sales = common::create_account(&pool, "売上", AccountType::Revenue).await;

    let ledger = LedgerService::new(pool.clone());
    ledger
        .post_journal(command(&cash.name, &sales.name, dec!(100000000000000)))
        .await
        .unwrap();
    ledger
        .post_journal(command(&cash.name, &sales.name, dec!(0.0001)))
        .await
        .unwrap();

    let balances = ledger.list_balances().await.unwrap();
    let cash_row = balances.iter().find(|b| b.account_id == cash.id).unwrap();
    assert_eq!(cash_row.debit_total, dec!(100000000000000.0001));
    assert_eq!(cash_row.home_signed_balance, dec!(100000000000000.0001));
}
