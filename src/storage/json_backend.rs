//! JSON persistence: one file per owner book, atomic replace, timestamped
//! backups with retention.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    config::write_atomic,
    domain::Book,
    errors::{FinanceError, Result},
    storage::StorageBackend,
    utils::{backups_dir_in, books_dir_in, ensure_dir, slug},
};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 5;

/// Describes a persisted backup artifact for a book.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub owner_name: String,
    pub created_at: String,
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct JsonStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(base: &Path, retention: Option<usize>) -> Result<Self> {
        ensure_dir(base)?;
        let books_dir = books_dir_in(base);
        let backups_dir = backups_dir_in(base);
        ensure_dir(&books_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn book_path(&self, owner_name: &str) -> PathBuf {
        self.books_dir.join(format!("{}.json", slug(owner_name)))
    }

    fn backup_dir(&self, owner_name: &str) -> PathBuf {
        self.backups_dir.join(slug(owner_name))
    }

    fn prune_backups(&self, owner_name: &str) -> Result<()> {
        let mut backups = self.list_backups(owner_name)?;
        // list_backups returns newest first
        while backups.len() > self.retention {
            if let Some(stale) = backups.pop() {
                fs::remove_file(&stale.path)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &Book) -> Result<()> {
        save_book_to_path(book, &self.book_path(&book.owner_name))
    }

    fn load(&self, owner_name: &str) -> Result<Book> {
        let path = self.book_path(owner_name);
        if !path.exists() {
            return Err(FinanceError::BookNotFound(owner_name.to_string()));
        }
        load_book_from_path(&path)
    }

    fn list_books(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, owner_name: &str) -> Result<()> {
        let path = self.book_path(owner_name);
        if !path.exists() {
            return Err(FinanceError::BookNotFound(owner_name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn backup(&self, book: &Book, note: Option<&str>) -> Result<BackupInfo> {
        let dir = self.backup_dir(&book.owner_name);
        ensure_dir(&dir)?;
        let created_at = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("book_{}", created_at);
        if let Some(label) = note.map(slug).filter(|label| !label.is_empty()) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(&format!(".{}", BACKUP_EXTENSION));
        let path = dir.join(name);
        save_book_to_path(book, &path)?;
        self.prune_backups(&book.owner_name)?;
        Ok(BackupInfo {
            owner_name: book.owner_name.clone(),
            created_at,
            path,
        })
    }

    fn list_backups(&self, owner_name: &str) -> Result<Vec<BackupInfo>> {
        let dir = self.backup_dir(owner_name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if let Some(created_at) = parse_backup_timestamp(file_name) {
                backups.push(BackupInfo {
                    owner_name: owner_name.to_string(),
                    created_at: created_at.format(BACKUP_TIMESTAMP_FORMAT).to_string(),
                    path: path.clone(),
                });
            }
        }
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    fn restore(&self, backup: &BackupInfo) -> Result<Book> {
        if !backup.path.exists() {
            return Err(FinanceError::Storage(format!(
                "backup `{}` not found",
                backup.path.display()
            )));
        }
        load_book_from_path(&backup.path)
    }
}

pub fn save_book_to_path(book: &Book, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    write_atomic(path, &json)
}

pub fn load_book_from_path(path: &Path) -> Result<Book> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn parse_backup_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    let trimmed = file_name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let rest = trimmed.strip_prefix("book_")?;
    let raw: String = rest.chars().take(15).collect();
    NaiveDateTime::parse_from_str(&raw, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_round_trips_a_book() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path(), None).unwrap();
        let book = Book::new("Mario Rossi");
        storage.save(&book).unwrap();

        let loaded = storage.load("Mario Rossi").unwrap();
        assert_eq!(loaded.id, book.id);
        assert_eq!(loaded.owner, book.owner);
        assert_eq!(storage.list_books().unwrap(), vec!["mario-rossi".to_string()]);
    }

    #[test]
    fn loading_a_missing_book_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path(), None).unwrap();
        assert!(matches!(
            storage.load("nessuno"),
            Err(FinanceError::BookNotFound(_))
        ));
    }

    #[test]
    fn backups_are_pruned_to_retention() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path(), Some(2)).unwrap();
        let book = Book::new("backup-user");
        for note in ["a", "b", "c"] {
            storage.backup(&book, Some(note)).unwrap();
        }
        let backups = storage.list_backups("backup-user").unwrap();
        assert!(backups.len() <= 2);
        let restored = storage.restore(&backups[0]).unwrap();
        assert_eq!(restored.id, book.id);
    }
}
