use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use ledger_service::api::requests::{parse_amount, PostJournalRequest};
use ledger_service::models::{
    AccountBalance, AccountTotalsRow, AccountType, JournalEntryPair, TrialBalanceTotals,
};
use ledger_service::observability::LatencyTimer;

const ACCOUNT_TYPES: [AccountType; 5] = [
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
    AccountType::Revenue,
    AccountType::Expense,
];

fn totals_rows(count: usize) -> Vec<AccountTotalsRow> {
    (0..count)
        .map(|i| {
            let account_type = ACCOUNT_TYPES[i % ACCOUNT_TYPES.len()];
            AccountTotalsRow {
                account_id: Uuid::new_v4(),
                code: Some(format!("{:04}", i)),
                account_name: format!("account-{}", i),
                account_type,
                home_position: account_type.home_position(),
                debit_total: Decimal::from((i % 1000) as i64 * 13),
                credit_total: Decimal::from((i % 700) as i64 * 17),
            }
        })
        .collect()
}

fn benchmark_trial_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial_balance");
    group.measurement_time(Duration::from_secs(10));

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("from_totals", size), size, |b, &size| {
            let rows = totals_rows(size);
            b.iter(|| {
                let balances: Vec<AccountBalance> = rows
                    .iter()
                    .cloned()
                    .map(AccountBalance::from_totals)
                    .collect();
                black_box(balances)
            });
        });

        group.bench_with_input(BenchmarkId::new("totals", size), size, |b, &size| {
            let balances: Vec<AccountBalance> = totals_rows(size)
                .into_iter()
                .map(AccountBalance::from_totals)
                .collect();
            b.iter(|| {
                let totals = TrialBalanceTotals::from_balances(black_box(&balances));
                black_box(totals.is_balanced())
            });
        });
    }

    group.finish();
}

fn benchmark_request_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");

    for (label, value) in [
        ("integer", json!(1000)),
        ("fraction", json!("1234.56")),
        ("scientific", json!("1.5e3")),
    ] {
        group.bench_function(BenchmarkId::new("parse_amount", label), |b| {
            b.iter(|| black_box(parse_amount(black_box(Some(&value)))))
        });
    }

    group.bench_function("into_command", |b| {
        let request = PostJournalRequest {
            date: Some("2024-01-10".to_string()),
            debit_name: Some("現金".to_string()),
            credit_name: Some("売上".to_string()),
            amount: Some(json!(1000)),
            description: Some("売上計上".to_string()),
        };
        b.iter(|| black_box(request.clone().into_command()))
    });

    group.finish();
}

fn benchmark_entry_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("journal");

    group.bench_function("entry_pair", |b| {
        let journal_id = Uuid::new_v4();
        let debit_account = Uuid::new_v4();
        let credit_account = Uuid::new_v4();

        b.iter(|| {
            let pair = JournalEntryPair::for_journal(
                black_box(journal_id),
                black_box(debit_account),
                black_box(credit_account),
                black_box(Decimal::from(1000)),
            );
            black_box(pair)
        });
    });

    group.finish();
}

fn benchmark_latency_timer(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_timer");

    group.bench_function("create_and_elapsed", |b| {
        b.iter(|| {
            let timer = LatencyTimer::new();
            let elapsed = timer.elapsed_ms();
            black_box(elapsed)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_trial_balance,
    benchmark_request_parsing,
    benchmark_entry_pair,
    benchmark_latency_timer,
);

criterion_main!(benches);
