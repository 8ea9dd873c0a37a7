use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Free-form label attachable to subscriptions and transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(owner: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
        }
    }
}

impl Identifiable for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Tag {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}
