use std::{
    env,
    path::{Path, PathBuf},
    sync::Once,
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".mio_finance";
const BOOKS_DIR: &str = "books";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("mio_finance=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.mio_finance`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MIO_FINANCE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the managed books directory.
pub fn books_dir_in(base: &Path) -> PathBuf {
    base.join(BOOKS_DIR)
}

/// Base directory for backup snapshots.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// Path to the configuration file inside the app data directory.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates the directory (and parents) if missing.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Lowercases a user-supplied name into a filesystem-safe slug.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::slug;

    #[test]
    fn slug_collapses_non_alphanumerics() {
        assert_eq!(slug("Mario Rossi"), "mario-rossi");
        assert_eq!(slug("  a__b  "), "a-b");
        assert_eq!(slug("Già!"), "gi");
    }
}
