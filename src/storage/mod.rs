pub mod json_backend;

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use crate::{domain::Book, errors::Result};

pub use json_backend::{BackupInfo, JsonStorage};

/// Abstraction over persistence backends capable of storing books and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &Book) -> Result<()>;
    fn load(&self, owner_name: &str) -> Result<Book>;
    fn list_books(&self) -> Result<Vec<String>>;
    fn delete(&self, owner_name: &str) -> Result<()>;
    fn backup(&self, book: &Book, note: Option<&str>) -> Result<BackupInfo>;
    fn list_backups(&self, owner_name: &str) -> Result<Vec<BackupInfo>>;
    fn restore(&self, backup: &BackupInfo) -> Result<Book>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec.
    fn save_to_path(&self, book: &Book, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Book> {
        json_backend::load_book_from_path(path)
    }
}

/// Detects dangling references and invariant violations within a book
/// snapshot, typically right after loading it from disk.
pub fn book_warnings(book: &Book) -> Vec<String> {
    let account_ids: HashSet<_> = book.accounts.iter().map(|a| a.id).collect();
    let subscription_ids: HashSet<_> = book.subscriptions.iter().map(|s| s.id).collect();
    let transaction_ids: HashSet<_> = book.transactions.iter().map(|t| t.id).collect();
    let mut warnings = Vec::new();

    for txn in &book.transactions {
        if !account_ids.contains(&txn.account_id) {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        if let Some(sub_id) = txn.source_subscription {
            if !subscription_ids.contains(&sub_id) {
                warnings.push(format!(
                    "transaction {} references removed subscription {}",
                    txn.id, sub_id
                ));
            }
        }
    }

    let mut seen_pairs = HashSet::new();
    let mut linked: HashMap<_, _> = HashMap::new();
    for occ in &book.occurrences {
        if !subscription_ids.contains(&occ.subscription_id) {
            warnings.push(format!(
                "occurrence {} references unknown subscription {}",
                occ.id, occ.subscription_id
            ));
        }
        if !seen_pairs.insert((occ.subscription_id, occ.due_date)) {
            warnings.push(format!(
                "duplicate occurrence for subscription {} on {}",
                occ.subscription_id, occ.due_date
            ));
        }
        if let Some(tx_id) = occ.transaction_id {
            if !transaction_ids.contains(&tx_id) {
                warnings.push(format!(
                    "occurrence {} links to unknown transaction {}",
                    occ.id, tx_id
                ));
            }
            if let Some(prior) = linked.insert(tx_id, occ.id) {
                warnings.push(format!(
                    "transaction {} is linked by occurrences {} and {}",
                    tx_id, prior, occ.id
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingInterval, Subscription, SubscriptionOccurrence};
    use chrono::NaiveDate;

    #[test]
    fn warnings_flag_duplicates_and_dangling_links() {
        let mut book = Book::new("warned");
        let owner = book.owner;
        let due = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let sub_id = book.add_subscription(Subscription::new(
            owner,
            "Netflix",
            15.99,
            "EUR",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            BillingInterval::monthly(),
        ));
        book.add_occurrence(SubscriptionOccurrence::planned(owner, sub_id, due, 15.99, "EUR"));
        book.add_occurrence(SubscriptionOccurrence::planned(owner, sub_id, due, 15.99, "EUR"));
        let mut dangling = SubscriptionOccurrence::planned(owner, sub_id, due.succ_opt().unwrap(), 15.99, "EUR");
        dangling.transaction_id = Some(uuid::Uuid::new_v4());
        book.add_occurrence(dangling);

        let warnings = book_warnings(&book);
        assert!(warnings.iter().any(|w| w.contains("duplicate occurrence")));
        assert!(warnings.iter().any(|w| w.contains("unknown transaction")));
    }

    #[test]
    fn clean_books_produce_no_warnings() {
        let book = Book::new("clean");
        assert!(book_warnings(&book).is_empty());
    }
}

