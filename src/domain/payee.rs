use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Counterparty a payment goes to or comes from: Netflix, Enel, a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payee {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Payee {
    pub fn new(owner: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            website: None,
        }
    }
}

impl Identifiable for Payee {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Payee {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Payee {
    fn name(&self) -> &str {
        &self.name
    }
}
