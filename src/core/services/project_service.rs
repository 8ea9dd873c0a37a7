//! CRUD helpers for projects.

use uuid::Uuid;

use crate::domain::{Book, NamedEntity, Project};
use crate::errors::{FinanceError, Result};

pub struct ProjectService;

impl ProjectService {
    pub fn create(book: &mut Book, name: impl Into<String>, description: Option<String>) -> Result<Uuid> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("project name is required".into()));
        }
        if book.projects.iter().any(|p| p.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        let mut project = Project::new(book.owner, name);
        project.description = description;
        Ok(book.add_project(project))
    }

    /// Archived projects stay referenced by past rows but are hidden from
    /// default listings.
    pub fn set_archived(book: &mut Book, id: Uuid, archived: bool) -> Result<()> {
        let project = book
            .project_mut(id)
            .ok_or_else(|| FinanceError::ProjectNotFound(id.to_string()))?;
        project.is_archived = archived;
        book.touch();
        Ok(())
    }

    pub fn list(book: &Book, include_archived: bool) -> Vec<&Project> {
        let mut projects: Vec<&Project> = book
            .projects
            .iter()
            .filter(|p| include_archived || !p.is_archived)
            .collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Project> {
        book.projects
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_projects_are_hidden_by_default() {
        let mut book = Book::new("projects");
        let id = ProjectService::create(&mut book, "Casa", None).unwrap();
        ProjectService::set_archived(&mut book, id, true).unwrap();
        assert!(ProjectService::list(&book, false).is_empty());
        assert_eq!(ProjectService::list(&book, true).len(), 1);
    }
}
