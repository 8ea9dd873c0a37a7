//! CRUD helpers for spending categories.

use uuid::Uuid;

use crate::domain::{Book, Category, NamedEntity};
use crate::errors::{FinanceError, Result};

pub struct CategoryService;

impl CategoryService {
    pub fn create(book: &mut Book, name: impl Into<String>, parent_id: Option<Uuid>) -> Result<Uuid> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("category name is required".into()));
        }
        if book.categories.iter().any(|c| c.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        if let Some(parent) = parent_id {
            book.category(parent)
                .ok_or_else(|| FinanceError::CategoryNotFound(parent.to_string()))?;
        }
        let mut category = Category::new(book.owner, name);
        category.parent_id = parent_id;
        Ok(book.add_category(category))
    }

    pub fn list(book: &Book) -> Vec<&Category> {
        let mut categories: Vec<&Category> = book.categories.iter().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Category> {
        book.categories
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}
