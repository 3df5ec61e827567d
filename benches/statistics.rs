use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use expense_core::{
    core::services::{StatisticsQuery, StatisticsService},
    ledger::{CalendarDate, Category, Expense, Frequency, Ledger, Money},
};

fn build_sample_expenses(count: usize) -> Vec<Expense> {
    let start = CalendarDate::new(1, 1, 2019).expect("valid start date");
    let mut date = start;
    (0..count)
        .map(|idx| {
            if idx % 7 == 0 {
                date = date.step(&Frequency::daily()).expect("date in range");
            }
            Expense::new(
                format!("item {idx}"),
                Money::from_cents(100 + (idx % 5_000) as i64),
                date,
                Category::ALL[idx % Category::ALL.len()],
            )
        })
        .collect()
}

fn bench_statistics(c: &mut Criterion) {
    let expenses = build_sample_expenses(10_000);
    let start = CalendarDate::new(1, 1, 2019).expect("valid start date");
    let end = CalendarDate::new(31, 12, 2022).expect("valid end date");

    c.bench_function("summary_10k", |b| {
        b.iter(|| StatisticsService::summary(black_box(&expenses), start, end).expect("summary"))
    });

    let weekly = StatisticsQuery::Trend {
        start,
        end,
        frequency: Frequency::weekly(),
    };
    c.bench_function("weekly_trend_10k", |b| {
        b.iter(|| StatisticsService::run(black_box(&expenses), &weekly).expect("trend"))
    });
}

fn bench_history(c: &mut Criterion) {
    let expenses = build_sample_expenses(1_000);
    c.bench_function("commit_1k_expenses", |b| {
        b.iter_batched(
            || expenses.clone(),
            |batch| {
                let mut ledger = Ledger::new();
                for expense in batch {
                    ledger.add_expense(expense).expect("unique expense");
                }
                ledger
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_statistics, bench_history);
criterion_main!(benches);
