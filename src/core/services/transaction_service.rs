//! CRUD helpers for plain ledger entries.
//!
//! Rows generated by the payment poster are immutable here: they can be
//! listed but not edited or removed.

use uuid::Uuid;

use crate::domain::{Book, Transaction, TxType};
use crate::errors::{FinanceError, Result};

pub struct TransactionService;

impl TransactionService {
    /// Adds a manually entered ledger row and returns its identifier.
    pub fn add(book: &mut Book, transaction: Transaction) -> Result<Uuid> {
        if transaction.amount <= 0.0 {
            return Err(FinanceError::Validation("amount must be positive".into()));
        }
        book.account(transaction.account_id)
            .ok_or_else(|| FinanceError::AccountNotFound(transaction.account_id.to_string()))?;
        Ok(book.add_transaction(transaction))
    }

    /// Updates a manually entered row via the provided mutator.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut Transaction),
    {
        Self::reject_generated(book, id)?;
        let owner = book.owner;
        let txn = book
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.owner == owner)
            .ok_or(FinanceError::TransactionNotFound(id))?;
        mutator(txn);
        book.touch();
        Ok(())
    }

    /// Removes a manually entered row, returning the removed instance.
    pub fn remove(book: &mut Book, id: Uuid) -> Result<Transaction> {
        Self::reject_generated(book, id)?;
        book.remove_transaction(id)
            .ok_or(FinanceError::TransactionNotFound(id))
    }

    /// Returns ledger rows newest first, optionally filtered by type.
    pub fn list(book: &Book, tx_type: Option<TxType>) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = book
            .transactions
            .iter()
            .filter(|t| tx_type.map(|wanted| t.tx_type == wanted).unwrap_or(true))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    fn reject_generated(book: &Book, id: Uuid) -> Result<()> {
        let txn = book
            .transaction(id)
            .ok_or(FinanceError::TransactionNotFound(id))?;
        if txn.is_subscription_generated() {
            return Err(FinanceError::InvalidOperation(
                "subscription-generated entries cannot be edited".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountKind};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn book_with_account() -> (Book, Uuid) {
        let mut book = Book::new("txn");
        let owner = book.owner;
        let account_id = book.add_account(Account::new(owner, "Conto", AccountKind::Bank, "EUR"));
        (book, account_id)
    }

    #[test]
    fn add_requires_a_known_account() {
        let (mut book, _) = book_with_account();
        let orphan = Transaction::new(book.owner, TxType::Expense, d(2026, 5, 1), 10.0, "EUR", Uuid::new_v4());
        assert!(matches!(
            TransactionService::add(&mut book, orphan),
            Err(FinanceError::AccountNotFound(_))
        ));
    }

    #[test]
    fn generated_rows_are_shielded_from_edits() {
        let (mut book, account_id) = book_with_account();
        let mut generated =
            Transaction::new(book.owner, TxType::Expense, d(2026, 5, 1), 15.99, "EUR", account_id);
        generated.source_subscription = Some(Uuid::new_v4());
        let id = TransactionService::add(&mut book, generated).unwrap();

        assert!(matches!(
            TransactionService::remove(&mut book, id),
            Err(FinanceError::InvalidOperation(_))
        ));
        assert!(matches!(
            TransactionService::update(&mut book, id, |t| t.amount = 1.0),
            Err(FinanceError::InvalidOperation(_))
        ));
    }

    #[test]
    fn list_filters_by_type_and_sorts_newest_first() {
        let (mut book, account_id) = book_with_account();
        let owner = book.owner;
        TransactionService::add(
            &mut book,
            Transaction::new(owner, TxType::Income, d(2026, 1, 10), 1000.0, "EUR", account_id),
        )
        .unwrap();
        TransactionService::add(
            &mut book,
            Transaction::new(owner, TxType::Expense, d(2026, 2, 10), 50.0, "EUR", account_id),
        )
        .unwrap();

        let expenses = TransactionService::list(&book, Some(TxType::Expense));
        assert_eq!(expenses.len(), 1);
        let all = TransactionService::list(&book, None);
        assert_eq!(all[0].date, d(2026, 2, 10));
    }
}
