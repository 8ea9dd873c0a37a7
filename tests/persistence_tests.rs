use chrono::NaiveDate;
use mio_finance::core::services::{NewSubscription, SubscriptionService};
use mio_finance::domain::{Account, AccountKind, BillingInterval, Book};
use mio_finance::errors::FinanceError;
use mio_finance::storage::{JsonStorage, StorageBackend};
use serde_json::Value;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_book() -> Book {
    let mut book = Book::new("Mario Rossi");
    let owner = book.owner;
    book.add_account(Account::new(owner, "Conto Principale", AccountKind::Bank, "EUR"));
    let sub_id = SubscriptionService::create(
        &mut book,
        NewSubscription::basic("Netflix", 15.99, "EUR", d(2026, 1, 1), BillingInterval::monthly()),
    )
    .unwrap();
    book.get_or_create_occurrence(sub_id, d(2026, 1, 1)).unwrap();
    book
}

#[test]
fn book_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path(), None).unwrap();
    let book = sample_book();
    storage.save(&book).unwrap();

    let loaded = storage.load("Mario Rossi").unwrap();
    let original: Value = serde_json::to_value(&book).unwrap();
    let reloaded: Value = serde_json::to_value(&loaded).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn save_to_explicit_path_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path(), None).unwrap();
    let book = sample_book();
    let path = dir.path().join("export.json");

    storage.save_to_path(&book, &path).unwrap();
    let loaded = storage.load_from_path(&path).unwrap();
    assert_eq!(loaded.id, book.id);
    assert_eq!(loaded.subscriptions.len(), 1);
    assert_eq!(loaded.occurrences.len(), 1);
}

#[test]
fn backups_restore_the_exact_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path(), Some(3)).unwrap();
    let book = sample_book();

    let info = storage.backup(&book, Some("before migration")).unwrap();
    let restored = storage.restore(&info).unwrap();
    assert_eq!(restored.id, book.id);
    assert_eq!(restored.subscriptions[0].name, "Netflix");
}

#[test]
fn unknown_books_and_deleted_books_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path(), None).unwrap();
    assert!(matches!(storage.load("ghost"), Err(FinanceError::BookNotFound(_))));

    let book = sample_book();
    storage.save(&book).unwrap();
    storage.delete("Mario Rossi").unwrap();
    assert!(matches!(
        storage.load("Mario Rossi"),
        Err(FinanceError::BookNotFound(_))
    ));
}
