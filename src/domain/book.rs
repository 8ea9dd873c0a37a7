//! The per-owner aggregate. Every query and mutation in the crate goes
//! through a `Book`, so rows from different owners can never meet.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    account::Account, category::Category, occurrence::SubscriptionOccurrence, payee::Payee,
    project::Project, subscription::Subscription, tag::Tag, transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    /// The user this book belongs to. Every row inside carries the same id.
    pub owner: Uuid,
    pub owner_name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub payees: Vec<Payee>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub occurrences: Vec<SubscriptionOccurrence>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(owner_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            owner_name: owner_name.into(),
            accounts: Vec::new(),
            payees: Vec::new(),
            categories: Vec::new(),
            projects: Vec::new(),
            tags: Vec::new(),
            subscriptions: Vec::new(),
            occurrences: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    // --- inserts -----------------------------------------------------------

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_payee(&mut self, payee: Payee) -> Uuid {
        let id = payee.id;
        self.payees.push(payee);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn add_tag(&mut self, tag: Tag) -> Uuid {
        let id = tag.id;
        self.tags.push(tag);
        self.touch();
        id
    }

    pub fn add_subscription(&mut self, subscription: Subscription) -> Uuid {
        let id = subscription.id;
        self.subscriptions.push(subscription);
        self.touch();
        id
    }

    pub fn add_occurrence(&mut self, occurrence: SubscriptionOccurrence) -> Uuid {
        let id = occurrence.id;
        self.occurrences.push(occurrence);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    // --- owner-scoped lookups ---------------------------------------------

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id && a.owner == self.owner)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        let owner = self.owner;
        self.accounts.iter_mut().find(|a| a.id == id && a.owner == owner)
    }

    pub fn payee(&self, id: Uuid) -> Option<&Payee> {
        self.payees.iter().find(|p| p.id == id && p.owner == self.owner)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id && c.owner == self.owner)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id && p.owner == self.owner)
    }

    pub fn project_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        let owner = self.owner;
        self.projects.iter_mut().find(|p| p.id == id && p.owner == owner)
    }

    pub fn tag(&self, id: Uuid) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id && t.owner == self.owner)
    }

    pub fn subscription(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id && s.owner == self.owner)
    }

    pub fn subscription_mut(&mut self, id: Uuid) -> Option<&mut Subscription> {
        let owner = self.owner;
        self.subscriptions.iter_mut().find(|s| s.id == id && s.owner == owner)
    }

    pub fn remove_subscription(&mut self, id: Uuid) -> Option<Subscription> {
        let owner = self.owner;
        let idx = self.subscriptions.iter().position(|s| s.id == id && s.owner == owner)?;
        let removed = self.subscriptions.remove(idx);
        self.touch();
        Some(removed)
    }

    pub fn occurrence(&self, id: Uuid) -> Option<&SubscriptionOccurrence> {
        self.occurrences.iter().find(|o| o.id == id && o.owner == self.owner)
    }

    pub fn occurrence_mut(&mut self, id: Uuid) -> Option<&mut SubscriptionOccurrence> {
        let owner = self.owner;
        self.occurrences.iter_mut().find(|o| o.id == id && o.owner == owner)
    }

    /// Looks up the unique occurrence for a (subscription, due date) pair.
    pub fn occurrence_for(&self, subscription_id: Uuid, due_date: NaiveDate) -> Option<&SubscriptionOccurrence> {
        self.occurrences.iter().find(|o| {
            o.subscription_id == subscription_id && o.due_date == due_date && o.owner == self.owner
        })
    }

    /// Idempotent resolution of the occurrence for a (subscription, due date)
    /// pair. Creates a `Planned` row copying the subscription's current
    /// amount and currency when none exists yet; the existing row wins
    /// otherwise, whatever its state.
    pub fn get_or_create_occurrence(&mut self, subscription_id: Uuid, due_date: NaiveDate) -> Option<Uuid> {
        if let Some(existing) = self.occurrence_for(subscription_id, due_date) {
            return Some(existing.id);
        }
        let (owner, amount, currency) = {
            let sub = self.subscription(subscription_id)?;
            (sub.owner, sub.amount, sub.currency.clone())
        };
        let occurrence =
            SubscriptionOccurrence::planned(owner, subscription_id, due_date, amount, currency);
        Some(self.add_occurrence(occurrence))
    }

    pub fn occurrences_of(&self, subscription_id: Uuid) -> impl Iterator<Item = &SubscriptionOccurrence> {
        self.occurrences
            .iter()
            .filter(move |o| o.subscription_id == subscription_id && o.owner == self.owner)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id && t.owner == self.owner)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let owner = self.owner;
        let idx = self.transactions.iter().position(|t| t.id == id && t.owner == owner)?;
        let removed = self.transactions.remove(idx);
        self.touch();
        Some(removed)
    }
}
