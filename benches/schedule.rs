use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use sinkingfund::{instances_in_range, Bill, Frequency};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn naive_collect(bill: &Bill, start: NaiveDate, end: NaiveDate) -> usize {
    (0u64..)
        .map_while(|index| bill.occurrence_date(index))
        .take_while(|due| *due <= end)
        .filter(|due| *due >= start)
        .count()
}

fn bench_fast_forward(c: &mut Criterion) {
    let daily = Bill::recurring("coffee", Decimal::new(350, 2), ymd(1950, 1, 1), Frequency::Daily)
        .build()
        .expect("valid bill");
    let monthly = Bill::recurring("rent", Decimal::new(95000, 2), ymd(1950, 1, 31), Frequency::Monthly)
        .build()
        .expect("valid bill");
    let start = ymd(2025, 1, 1);
    let end = ymd(2025, 12, 31);

    c.bench_function("daily_fast_forward_75y", |b| {
        b.iter(|| instances_in_range(black_box(&daily), start, end).expect("range"))
    });
    c.bench_function("daily_naive_walk_75y", |b| {
        b.iter(|| naive_collect(black_box(&daily), start, end))
    });
    c.bench_function("monthly_fast_forward_75y", |b| {
        b.iter(|| instances_in_range(black_box(&monthly), start, end).expect("range"))
    });
    c.bench_function("monthly_naive_walk_75y", |b| {
        b.iter(|| naive_collect(black_box(&monthly), start, end))
    });
}

criterion_group!(benches, bench_fast_forward);
criterion_main!(benches);
