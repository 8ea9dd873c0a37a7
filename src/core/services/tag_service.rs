//! CRUD helpers for tags.

use uuid::Uuid;

use crate::domain::{Book, NamedEntity, Tag};
use crate::errors::{FinanceError, Result};

pub struct TagService;

impl TagService {
    pub fn create(book: &mut Book, name: impl Into<String>) -> Result<Uuid> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("tag name is required".into()));
        }
        if book.tags.iter().any(|t| t.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        Ok(book.add_tag(Tag::new(book.owner, name)))
    }

    pub fn list(book: &Book) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = book.tags.iter().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Tag> {
        book.tags
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        let mut book = Book::new("tags");
        assert!(matches!(
            TagService::create(&mut book, "   "),
            Err(FinanceError::Validation(_))
        ));
        assert!(TagService::create(&mut book, "cloud").is_ok());
    }
}
