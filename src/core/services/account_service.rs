//! Validated CRUD helpers for accounts.

use uuid::Uuid;

use crate::domain::{Account, AccountKind, Book, NamedEntity};
use crate::errors::{FinanceError, Result};

pub struct AccountService;

impl AccountService {
    /// Creates an account; names are unique per owner.
    pub fn create(
        book: &mut Book,
        name: impl Into<String>,
        kind: AccountKind,
        currency: impl Into<String>,
    ) -> Result<Uuid> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("account name is required".into()));
        }
        if book.accounts.iter().any(|a| a.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        let account = Account::new(book.owner, name, kind, currency);
        tracing::info!(name = %account.name, "account created");
        Ok(book.add_account(account))
    }

    pub fn rename(book: &mut Book, id: Uuid, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into().trim().to_string();
        if new_name.is_empty() {
            return Err(FinanceError::Validation("account name is required".into()));
        }
        if book.accounts.iter().any(|a| a.name == new_name && a.id != id) {
            return Err(FinanceError::DuplicateName(new_name));
        }
        let account = book
            .account_mut(id)
            .ok_or_else(|| FinanceError::AccountNotFound(id.to_string()))?;
        account.name = new_name;
        book.touch();
        Ok(())
    }

    /// Deactivated accounts are kept for history but can no longer be paid
    /// against.
    pub fn set_active(book: &mut Book, id: Uuid, active: bool) -> Result<()> {
        let account = book
            .account_mut(id)
            .ok_or_else(|| FinanceError::AccountNotFound(id.to_string()))?;
        account.is_active = active;
        book.touch();
        Ok(())
    }

    /// Returns accounts ordered by name, optionally only active ones.
    pub fn list(book: &Book, only_active: bool) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = book
            .accounts
            .iter()
            .filter(|a| !only_active || a.is_active)
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }

    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Account> {
        book.accounts
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
    }
}
