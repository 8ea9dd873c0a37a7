//! Application configuration: locale, the injected default currency, and
//! the last-opened book.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};
use crate::utils::{config_file_in, ensure_dir};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    /// Default currency applied when the user omits one. There is no global
    /// currency row anywhere; this value is passed down explicitly.
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_book: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "it-IT".into(),
            currency: "EUR".into(),
            last_opened_book: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(base: &Path) -> Result<Self> {
        ensure_dir(base)?;
        Ok(Self {
            path: config_file_in(base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| FinanceError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes through a sibling temp file and renames it into place, so readers
/// only ever observe a complete file.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| FinanceError::Storage(format!("no parent directory for {}", path.display())))?;
    ensure_dir(parent)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(dir.path()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.last_opened_book, None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::new(dir.path()).unwrap();
        let mut config = Config::default();
        config.currency = "USD".into();
        config.last_opened_book = Some("mario".into());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.last_opened_book.as_deref(), Some("mario"));
    }
}
