//! One concrete scheduled charge derived from a subscription.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single due charge of a subscription's schedule. At most one exists per
/// (subscription, due_date) pair, and at most one ledger transaction is ever
/// linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionOccurrence {
    pub id: Uuid,
    pub owner: Uuid,
    pub subscription_id: Uuid,
    pub due_date: NaiveDate,
    /// Captured at creation time; later subscription edits do not rewrite it.
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub state: OccurrenceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Uuid>,
}

impl SubscriptionOccurrence {
    pub fn planned(
        owner: Uuid,
        subscription_id: Uuid,
        due_date: NaiveDate,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            subscription_id,
            due_date,
            amount,
            currency: currency.into(),
            state: OccurrenceState::Planned,
            transaction_id: None,
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self.state, OccurrenceState::Planned)
    }
}

impl Identifiable for SubscriptionOccurrence {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for SubscriptionOccurrence {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl Displayable for SubscriptionOccurrence {
    fn display_label(&self) -> String {
        format!("{} {:.2} {} [{}]", self.due_date, self.amount, self.currency, self.state)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Lifecycle state of an occurrence. `Paid` is terminal for posting;
/// `Skipped`/`Failed` are reached from `Planned` via the schedule service.
pub enum OccurrenceState {
    #[default]
    Planned,
    Paid,
    Skipped,
    Failed,
}

impl fmt::Display for OccurrenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OccurrenceState::Planned => "Planned",
            OccurrenceState::Paid => "Paid",
            OccurrenceState::Skipped => "Skipped",
            OccurrenceState::Failed => "Failed",
        };
        f.write_str(label)
    }
}
