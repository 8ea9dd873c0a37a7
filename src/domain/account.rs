use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Represents a money container transactions debit against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Account {
    /// Creates a new active account with the provided kind and currency.
    pub fn new(owner: Uuid, name: impl Into<String>, kind: AccountKind, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            kind,
            currency: currency.into(),
            opening_balance: 0.0,
            is_active: true,
            notes: None,
        }
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Account {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.currency)
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Bank,
    Card,
    Cash,
    Investment,
    Other,
}

impl AccountKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "bank" => Some(AccountKind::Bank),
            "card" => Some(AccountKind::Card),
            "cash" => Some(AccountKind::Cash),
            "investment" | "invest" => Some(AccountKind::Investment),
            "other" => Some(AccountKind::Other),
            _ => None,
        }
    }
}
