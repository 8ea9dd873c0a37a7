//! Shared runtime state for CLI interactions and command execution.

use std::sync::Arc;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    cli::core::{CliError, CliMode, CommandError, CommandResult},
    cli::output,
    config::{Config, ConfigManager},
    core::{Clock, SystemClock},
    domain::Book,
    errors::FinanceError,
    storage::{JsonStorage, StorageBackend},
    utils,
};

pub struct ShellContext {
    pub mode: CliMode,
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub book: Option<Book>,
    pub running: bool,
    pub last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = utils::app_data_dir();
        let config_manager = ConfigManager::new(&base)?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(&base, None)?;

        let mut context = Self {
            mode,
            storage,
            config_manager,
            config,
            clock: Arc::new(SystemClock),
            book: None,
            running: true,
            last_command: None,
        };

        if let Some(name) = context.config.last_opened_book.clone() {
            match context.storage.load(&name) {
                Ok(book) => context.book = Some(book),
                Err(err) => output::warning(format!("could not reopen book `{}`: {}", name, err)),
            }
        }
        Ok(context)
    }

    pub fn prompt(&self) -> String {
        match &self.book {
            Some(book) => format!("mio:{}> ", utils::slug(&book.owner_name)),
            None => "mio> ".to_string(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn book(&self) -> Result<&Book, CommandError> {
        self.book
            .as_ref()
            .ok_or(CommandError::Core(FinanceError::BookNotLoaded))
    }

    pub fn book_mut(&mut self) -> Result<&mut Book, CommandError> {
        self.book
            .as_mut()
            .ok_or(CommandError::Core(FinanceError::BookNotLoaded))
    }

    pub fn open_book(&mut self, name: &str) -> CommandResult {
        let book = self.storage.load(name).map_err(CommandError::Core)?;
        for warning in crate::storage::book_warnings(&book) {
            output::warning(warning);
        }
        self.remember_book(&book);
        self.book = Some(book);
        Ok(())
    }

    pub fn create_book(&mut self, name: &str) -> CommandResult {
        if self.storage.book_path(name).exists() {
            return Err(CommandError::Core(FinanceError::DuplicateName(name.into())));
        }
        let book = Book::new(name);
        self.storage.save(&book).map_err(CommandError::Core)?;
        self.remember_book(&book);
        self.book = Some(book);
        Ok(())
    }

    fn remember_book(&mut self, book: &Book) {
        self.config.last_opened_book = Some(book.owner_name.clone());
        if let Err(err) = self.config_manager.save(&self.config) {
            output::warning(format!("could not persist configuration: {}", err));
        }
    }

    /// Persists the loaded book. A failed save discards the dirty in-memory
    /// copy by reloading from disk, so the session never keeps state the
    /// storage did not accept.
    pub fn persist(&mut self) -> CommandResult {
        let Some(book) = self.book.as_ref() else {
            return Err(CommandError::Core(FinanceError::BookNotLoaded));
        };
        match self.storage.save(book) {
            Ok(()) => Ok(()),
            Err(save_err) => {
                let owner_name = book.owner_name.clone();
                match self.storage.load(&owner_name) {
                    Ok(previous) => self.book = Some(previous),
                    Err(_) => self.book = None,
                }
                Err(CommandError::Core(save_err))
            }
        }
    }

    /// Asks for confirmation in interactive mode; script mode always
    /// proceeds.
    pub fn confirm(&self, message: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|err| CommandError::Input(err.to_string()))
    }
}
