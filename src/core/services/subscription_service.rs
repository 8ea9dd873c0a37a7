//! Validated CRUD helpers for subscription definitions.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{BillingInterval, Book, NamedEntity, Subscription, SubscriptionStatus};
use crate::errors::{FinanceError, Result};

/// Parameters for creating a subscription. References are already resolved;
/// name/new-name disambiguation is the caller's job.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub amount: f64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub interval: BillingInterval,
    pub autopay: bool,
    pub note: Option<String>,
    pub account_id: Option<Uuid>,
    pub payee_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub tags: Vec<Uuid>,
}

impl NewSubscription {
    pub fn basic(
        name: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        start_date: NaiveDate,
        interval: BillingInterval,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            currency: currency.into(),
            start_date,
            next_due_date: None,
            end_date: None,
            interval,
            autopay: false,
            note: None,
            account_id: None,
            payee_id: None,
            category_id: None,
            project_id: None,
            tags: Vec::new(),
        }
    }
}

pub struct SubscriptionService;

impl SubscriptionService {
    /// Creates a subscription; the cursor defaults to the start date.
    pub fn create(book: &mut Book, params: NewSubscription) -> Result<Uuid> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation("subscription name is required".into()));
        }
        if params.amount <= 0.0 {
            return Err(FinanceError::Validation("amount must be positive".into()));
        }
        if book.subscriptions.iter().any(|s| s.name == name) {
            return Err(FinanceError::DuplicateName(name));
        }
        if let Some(account_id) = params.account_id {
            book.account(account_id)
                .ok_or_else(|| FinanceError::AccountNotFound(account_id.to_string()))?;
        }

        let mut sub = Subscription::new(
            book.owner,
            name,
            params.amount,
            params.currency,
            params.start_date,
            params.interval,
        );
        sub.next_due_date = params.next_due_date.unwrap_or(params.start_date);
        sub.end_date = params.end_date;
        sub.autopay = params.autopay;
        sub.note = params.note;
        sub.account_id = params.account_id;
        sub.payee_id = params.payee_id;
        sub.category_id = params.category_id;
        sub.project_id = params.project_id;
        sub.tags = params.tags;

        tracing::info!(name = %sub.name, "subscription created");
        Ok(book.add_subscription(sub))
    }

    /// Applies an edit through the provided mutator.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut Subscription),
    {
        let sub = book
            .subscription_mut(id)
            .ok_or_else(|| FinanceError::SubscriptionNotFound(id.to_string()))?;
        mutator(sub);
        book.touch();
        Ok(())
    }

    /// Moves the subscription between active/paused/canceled. Canceling is
    /// the soft-termination path; occurrences and history stay behind.
    pub fn set_status(book: &mut Book, id: Uuid, status: SubscriptionStatus) -> Result<()> {
        let sub = book
            .subscription_mut(id)
            .ok_or_else(|| FinanceError::SubscriptionNotFound(id.to_string()))?;
        sub.status = status;
        book.touch();
        tracing::info!(%id, %status, "subscription status changed");
        Ok(())
    }

    /// Hard delete on explicit owner request, removing the definition and
    /// its occurrence schedule. Posted ledger entries survive.
    pub fn remove(book: &mut Book, id: Uuid) -> Result<Subscription> {
        let removed = book
            .remove_subscription(id)
            .ok_or_else(|| FinanceError::SubscriptionNotFound(id.to_string()))?;
        book.occurrences.retain(|occ| occ.subscription_id != id);
        tracing::info!(name = %removed.name, "subscription removed");
        Ok(removed)
    }

    /// Returns subscriptions ordered by name.
    pub fn list(book: &Book) -> Vec<&Subscription> {
        let mut subs: Vec<&Subscription> = book.subscriptions.iter().collect();
        subs.sort_by(|a, b| a.name.cmp(&b.name));
        subs
    }

    /// Case-insensitive lookup by name, for callers resolving user input.
    pub fn find_by_name<'a>(book: &'a Book, name: &str) -> Option<&'a Subscription> {
        book.subscriptions
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn create_defaults_cursor_to_start_date() {
        let mut book = Book::new("svc");
        let id = SubscriptionService::create(
            &mut book,
            NewSubscription::basic("Spotify", 9.99, "EUR", d(2026, 3, 5), BillingInterval::monthly()),
        )
        .unwrap();
        assert_eq!(book.subscription(id).unwrap().next_due_date, d(2026, 3, 5));
    }

    #[test]
    fn create_rejects_duplicate_names() {
        let mut book = Book::new("svc");
        let params = NewSubscription::basic("Spotify", 9.99, "EUR", d(2026, 3, 5), BillingInterval::monthly());
        SubscriptionService::create(&mut book, params.clone()).unwrap();
        let err = SubscriptionService::create(&mut book, params).unwrap_err();
        assert!(matches!(err, FinanceError::DuplicateName(_)));
    }

    #[test]
    fn remove_drops_schedule_but_not_history() {
        let mut book = Book::new("svc");
        let id = SubscriptionService::create(
            &mut book,
            NewSubscription::basic("Gym", 30.0, "EUR", d(2026, 1, 1), BillingInterval::monthly()),
        )
        .unwrap();
        book.get_or_create_occurrence(id, d(2026, 1, 1)).unwrap();

        SubscriptionService::remove(&mut book, id).unwrap();
        assert!(book.subscription(id).is_none());
        assert!(book.occurrences.is_empty());
    }

    #[test]
    fn update_edits_in_place() {
        let mut book = Book::new("svc");
        let id = SubscriptionService::create(
            &mut book,
            NewSubscription::basic("Netflix", 15.99, "EUR", d(2026, 1, 1), BillingInterval::monthly()),
        )
        .unwrap();

        SubscriptionService::update(&mut book, id, |sub| {
            sub.amount = 17.99;
            sub.autopay = true;
        })
        .unwrap();

        let sub = book.subscription(id).unwrap();
        assert_eq!(sub.amount, 17.99);
        assert!(sub.autopay);

        let missing = SubscriptionService::update(&mut book, Uuid::new_v4(), |_| {});
        assert!(matches!(missing, Err(FinanceError::SubscriptionNotFound(_))));
    }

    #[test]
    fn find_by_name_ignores_case() {
        let mut book = Book::new("svc");
        SubscriptionService::create(
            &mut book,
            NewSubscription::basic("Netflix", 15.99, "EUR", d(2026, 1, 1), BillingInterval::monthly()),
        )
        .unwrap();
        assert!(SubscriptionService::find_by_name(&book, "netflix").is_some());
        assert!(SubscriptionService::find_by_name(&book, "hulu").is_none());
    }
}
