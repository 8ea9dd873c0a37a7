//! Recurring-obligation definitions. Concrete charges live in
//! `SubscriptionOccurrence`; the subscription only carries the rule and a
//! cached pointer to the next expected due date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::recurrence::BillingInterval;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: String,
    pub start_date: NaiveDate,
    /// Cached cursor; the authoritative history lives in occurrence rows
    /// once they exist. Rewritten only by edits and by the payment poster.
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub interval: BillingInterval,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub autopay: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
}

impl Subscription {
    /// Creates an active subscription whose cursor starts at the start date.
    pub fn new(
        owner: Uuid,
        name: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        start_date: NaiveDate,
        interval: BillingInterval,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            amount,
            currency: currency.into(),
            start_date,
            next_due_date: start_date,
            end_date: None,
            interval,
            status: SubscriptionStatus::Active,
            autopay: false,
            note: None,
            account_id: None,
            payee_id: None,
            category_id: None,
            project_id: None,
            tags: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, SubscriptionStatus::Active)
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Subscription {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!(
            "{} {:.2} {} ({})",
            self.name,
            self.amount,
            self.currency,
            self.interval.label()
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Lifecycle state of a subscription. Canceled is a soft state; rows are
/// hard-deleted only by explicit owner action.
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Canceled,
}

impl SubscriptionStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "active" => Some(SubscriptionStatus::Active),
            "paused" => Some(SubscriptionStatus::Paused),
            "canceled" | "cancelled" => Some(SubscriptionStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Paused => "Paused",
            SubscriptionStatus::Canceled => "Canceled",
        };
        f.write_str(label)
    }
}
