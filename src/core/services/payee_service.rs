//! CRUD helpers for payees.

use uuid::Uuid;

use crate::domain::{Book, NamedEntity, Payee};
use crate::errors::{FinanceError, Result};

pub struct PayeeService;

impl PayeeService {
    pub fn create(book: &mut Book, name: impl Into<String>) -> Result<Uuid> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("payee name is required".into()));
        }
        if book.payees.iter().any(|p| p.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        Ok(book.add_payee(Payee::new(book.owner, name)))
    }

    pub fn rename(book: &mut Book, id: Uuid, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into().trim().to_string();
        if book.payees.iter().any(|p| p.name == new_name && p.id != id) {
            return Err(FinanceError::DuplicateName(new_name));
        }
        let owner = book.owner;
        let payee = book
            .payees
            .iter_mut()
            .find(|p| p.id == id && p.owner == owner)
            .ok_or_else(|| FinanceError::PayeeNotFound(id.to_string()))?;
        payee.name = new_name;
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book) -> Vec<&Payee> {
        let mut payees: Vec<&Payee> = book.payees.iter().collect();
        payees.sort_by(|a, b| a.name.cmp(&b.name));
        payees
    }

    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Payee> {
        book.payees
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_rename_enforce_uniqueness() {
        let mut book = Book::new("payees");
        let netflix = PayeeService::create(&mut book, "Netflix").unwrap();
        PayeeService::create(&mut book, "Enel").unwrap();
        assert!(matches!(
            PayeeService::create(&mut book, "Enel"),
            Err(FinanceError::DuplicateName(_))
        ));
        assert!(matches!(
            PayeeService::rename(&mut book, netflix, "Enel"),
            Err(FinanceError::DuplicateName(_))
        ));
    }
}
