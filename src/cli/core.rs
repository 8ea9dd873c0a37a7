//! Shared CLI types: errors, loop control, and input parsing.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::FinanceError;

/// Fatal shell errors that abort the whole session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Per-command failures reported to the user without leaving the shell.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("input error: {0}")]
    Input(String),
    #[error("unknown command `{command}`{hint}")]
    UnknownCommand { command: String, hint: String },
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CommandError::InvalidArguments(format!("invalid date `{}` (expected YYYY-MM-DD)", raw)))
}

pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))?;
    if amount <= 0.0 {
        return Err(CommandError::InvalidArguments("amount must be positive".into()));
    }
    Ok(amount)
}

pub fn parse_id(raw: &str) -> Result<Uuid, CommandError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("invalid identifier `{}`", raw)))
}
