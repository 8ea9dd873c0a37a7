use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Reusable spending category ('Streaming', 'Casa', 'Cloud', ...), optionally nested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl Category {
    pub fn new(owner: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Category {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}
