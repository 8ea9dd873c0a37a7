use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mio_finance::core::services::{PayRequest, PayTarget, PaymentService, ScheduleService};
use mio_finance::domain::{Account, AccountKind, BillingInterval, Book, IntervalUnit, Subscription};

fn bench_interval_stepping(c: &mut Criterion) {
    let monthly = BillingInterval::new(1, IntervalUnit::Month);
    let anchor = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

    c.bench_function("interval_next_date_10y_monthly", |b| {
        b.iter(|| {
            let mut date = black_box(anchor);
            for _ in 0..120 {
                date = monthly.next_date(date);
            }
            date
        })
    });
}

fn bench_payment_posting(c: &mut Criterion) {
    c.bench_function("materialize_and_pay_year", |b| {
        b.iter(|| {
            let mut book = Book::new("bench");
            let owner = book.owner;
            let account_id =
                book.add_account(Account::new(owner, "Conto", AccountKind::Bank, "EUR"));
            let sub_id = book.add_subscription(Subscription::new(
                owner,
                "Netflix",
                15.99,
                "EUR",
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                BillingInterval::monthly(),
            ));
            ScheduleService::materialize_through(
                &mut book,
                NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            )
            .unwrap();
            let due_dates: Vec<_> = book.occurrences.iter().map(|o| (o.id, o.due_date)).collect();
            for (occ_id, due) in due_dates {
                PaymentService::pay(
                    &mut book,
                    &PayRequest {
                        account_id,
                        target: PayTarget::Occurrence(occ_id),
                    },
                    due,
                )
                .unwrap();
            }
            black_box(book.transactions.len())
        })
    });
}

criterion_group!(benches, bench_interval_stepping, bench_payment_posting);
criterion_main!(benches);
