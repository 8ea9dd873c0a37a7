use chrono::NaiveDate;
use mio_finance::core::services::{
    PayRequest, PayTarget, PaymentOutcome, PaymentService, ScheduleService,
};
use mio_finance::domain::{
    Account, AccountKind, BillingInterval, Book, OccurrenceState, Subscription, TxType,
};
use mio_finance::errors::FinanceError;
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Netflix, 15.99 EUR, monthly from 2026-01-01, cursor at 2026-02-01.
fn netflix_book() -> (Book, Uuid, Uuid) {
    let mut book = Book::new("subs_user");
    let owner = book.owner;
    let account_id = book.add_account(Account::new(
        owner,
        "Conto Principale",
        AccountKind::Bank,
        "EUR",
    ));
    let mut sub = Subscription::new(
        owner,
        "Netflix",
        15.99,
        "EUR",
        d(2026, 1, 1),
        BillingInterval::monthly(),
    );
    sub.next_due_date = d(2026, 2, 1);
    let sub_id = book.add_subscription(sub);
    (book, account_id, sub_id)
}

#[test]
fn pay_from_subscription_posts_expense_and_advances_cursor() {
    let (mut book, account_id, sub_id) = netflix_book();

    let receipt = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Subscription {
                id: sub_id,
                due_date: Some("2026-02-01".into()),
            },
        },
        d(2026, 2, 1),
    )
    .unwrap();

    assert_eq!(receipt.outcome, PaymentOutcome::Posted);
    assert_eq!(book.occurrences.len(), 1);
    let occ = book.occurrence(receipt.occurrence_id).unwrap();
    assert_eq!(occ.due_date, d(2026, 2, 1));
    assert_eq!(occ.state, OccurrenceState::Paid);
    assert_eq!(occ.amount, 15.99);

    let tx = book.transaction(receipt.transaction_id).unwrap();
    assert_eq!(tx.tx_type, TxType::Expense);
    assert_eq!(tx.amount, 15.99);
    assert_eq!(tx.currency, "EUR");
    assert_eq!(tx.account_id, account_id);
    assert_eq!(tx.source_subscription, Some(sub_id));

    assert_eq!(book.subscription(sub_id).unwrap().next_due_date, d(2026, 3, 1));
}

#[test]
fn paying_twice_creates_exactly_one_transaction() {
    let (mut book, account_id, sub_id) = netflix_book();
    let occ_id = book.get_or_create_occurrence(sub_id, d(2026, 2, 1)).unwrap();
    let request = PayRequest {
        account_id,
        target: PayTarget::Occurrence(occ_id),
    };

    let first = PaymentService::pay(&mut book, &request, d(2026, 2, 1)).unwrap();
    let second = PaymentService::pay(&mut book, &request, d(2026, 2, 1)).unwrap();

    assert_eq!(first.outcome, PaymentOutcome::Posted);
    assert_eq!(second.outcome, PaymentOutcome::AlreadyPaid);
    assert_eq!(second.transaction_id, first.transaction_id);
    assert_eq!(book.transactions.len(), 1);
    assert_eq!(book.occurrence(occ_id).unwrap().state, OccurrenceState::Paid);
    // The replay also must not advance the cursor a second time.
    assert_eq!(book.subscription(sub_id).unwrap().next_due_date, d(2026, 3, 1));
}

#[test]
fn paying_an_overdue_occurrence_keeps_the_cursor() {
    let (mut book, account_id, sub_id) = netflix_book();
    // Materialize two charges, then settle the older one out of order.
    ScheduleService::materialize_through(&mut book, d(2026, 3, 1)).unwrap();
    let overdue_id = book.occurrence_for(sub_id, d(2026, 2, 1)).unwrap().id;
    if let Some(sub) = book.subscription_mut(sub_id) {
        sub.next_due_date = d(2026, 3, 1);
    }

    let receipt = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Occurrence(overdue_id),
        },
        d(2026, 3, 5),
    )
    .unwrap();

    assert_eq!(receipt.outcome, PaymentOutcome::Posted);
    assert_eq!(receipt.next_due_date, None);
    assert_eq!(book.subscription(sub_id).unwrap().next_due_date, d(2026, 3, 1));
}

#[test]
fn paying_at_the_cursor_advances_exactly_one_step() {
    let (mut book, account_id, sub_id) = netflix_book();
    ScheduleService::materialize_through(&mut book, d(2026, 2, 1)).unwrap();
    if let Some(sub) = book.subscription_mut(sub_id) {
        sub.next_due_date = d(2026, 2, 1);
    }
    let at_cursor = book.occurrence_for(sub_id, d(2026, 2, 1)).unwrap().id;

    let receipt = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Occurrence(at_cursor),
        },
        d(2026, 2, 1),
    )
    .unwrap();

    assert_eq!(receipt.next_due_date, Some(d(2026, 3, 1)));
}

#[test]
fn foreign_account_is_rejected_with_no_side_effects() {
    let (mut book, _, sub_id) = netflix_book();
    let mut other = Book::new("other_subs_user");
    let other_owner = other.owner;
    let foreign_account =
        other.add_account(Account::new(other_owner, "Conto Altro", AccountKind::Bank, "EUR"));
    let occ_id = book.get_or_create_occurrence(sub_id, d(2026, 2, 1)).unwrap();

    let err = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id: foreign_account,
            target: PayTarget::Occurrence(occ_id),
        },
        d(2026, 2, 1),
    )
    .unwrap_err();

    assert!(matches!(err, FinanceError::AccountNotFound(_)));
    assert!(book.transactions.is_empty());
    assert_eq!(book.occurrence(occ_id).unwrap().state, OccurrenceState::Planned);
}

#[test]
fn foreign_occurrence_reference_is_not_found() {
    let (mut book, account_id, _) = netflix_book();
    let mut other = Book::new("other_subs_user");
    let other_owner = other.owner;
    let other_sub = other.add_subscription(Subscription::new(
        other_owner,
        "Hulu",
        7.99,
        "EUR",
        d(2026, 1, 1),
        BillingInterval::monthly(),
    ));
    let foreign_occ = other.get_or_create_occurrence(other_sub, d(2026, 2, 1)).unwrap();

    let err = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Occurrence(foreign_occ),
        },
        d(2026, 2, 1),
    )
    .unwrap_err();

    assert!(matches!(err, FinanceError::OccurrenceNotFound(_)));
    assert!(book.transactions.is_empty());
}

#[test]
fn on_demand_creation_happens_at_most_once_per_pair() {
    let (mut book, account_id, sub_id) = netflix_book();
    let request = PayRequest {
        account_id,
        target: PayTarget::Subscription {
            id: sub_id,
            due_date: Some("2026-02-01".into()),
        },
    };

    PaymentService::pay(&mut book, &request, d(2026, 2, 1)).unwrap();
    PaymentService::pay(&mut book, &request, d(2026, 2, 2)).unwrap();

    let for_pair: Vec<_> = book
        .occurrences
        .iter()
        .filter(|occ| occ.subscription_id == sub_id && occ.due_date == d(2026, 2, 1))
        .collect();
    assert_eq!(for_pair.len(), 1);
    assert_eq!(book.transactions.len(), 1);
}

#[test]
fn occurrence_amount_survives_subscription_edits() {
    let (mut book, account_id, sub_id) = netflix_book();
    let occ_id = book.get_or_create_occurrence(sub_id, d(2026, 2, 1)).unwrap();
    // Price change lands after the occurrence was cut.
    if let Some(sub) = book.subscription_mut(sub_id) {
        sub.amount = 17.99;
    }

    let receipt = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Occurrence(occ_id),
        },
        d(2026, 2, 1),
    )
    .unwrap();

    assert_eq!(book.transaction(receipt.transaction_id).unwrap().amount, 15.99);
}

#[test]
fn month_end_subscription_pays_through_february() {
    let mut book = Book::new("subs_user");
    let owner = book.owner;
    let account_id = book.add_account(Account::new(owner, "Conto", AccountKind::Bank, "EUR"));
    let sub_id = book.add_subscription(Subscription::new(
        owner,
        "Palestra",
        30.0,
        "EUR",
        d(2026, 1, 31),
        BillingInterval::monthly(),
    ));

    let receipt = PaymentService::pay(
        &mut book,
        &PayRequest {
            account_id,
            target: PayTarget::Subscription {
                id: sub_id,
                due_date: None,
            },
        },
        d(2026, 1, 31),
    )
    .unwrap();

    assert_eq!(receipt.next_due_date, Some(d(2026, 2, 28)));
}
