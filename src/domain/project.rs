use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A client or personal project that transactions and subscriptions roll up to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Project {
    pub fn new(owner: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            description: None,
            category_id: None,
            is_archived: false,
        }
    }
}

impl Identifiable for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Project {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Project {
    fn name(&self) -> &str {
        &self.name
    }
}
