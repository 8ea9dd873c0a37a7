//! Posts subscription payments into the ledger.
//!
//! The poster resolves its references and builds the ledger row before the
//! first mutation; the mutation block itself cannot fail, so a rejected
//! request leaves the book exactly as it found it.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Book, OccurrenceState, Transaction, TxType};
use crate::errors::{FinanceError, Result};

/// Which charge the caller wants to settle.
#[derive(Debug, Clone)]
pub enum PayTarget {
    /// An occurrence the caller already holds a reference to.
    Occurrence(Uuid),
    /// Pay "from the subscription": the due date string is parsed as
    /// `YYYY-MM-DD` and falls back to the subscription's cursor when missing
    /// or malformed. The occurrence is created on demand.
    Subscription {
        id: Uuid,
        due_date: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct PayRequest {
    pub account_id: Uuid,
    pub target: PayTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// A new ledger entry was created.
    Posted,
    /// The occurrence was already linked to a transaction; state was
    /// normalized and no second entry was written.
    AlreadyPaid,
}

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub outcome: PaymentOutcome,
    pub occurrence_id: Uuid,
    pub transaction_id: Uuid,
    /// New cursor value when the paid occurrence advanced it.
    pub next_due_date: Option<NaiveDate>,
}

pub struct PaymentService;

impl PaymentService {
    /// Settles one occurrence against an account, creating the expense
    /// ledger entry dated `payment_date`.
    ///
    /// Re-invoking on an already-paid occurrence succeeds without writing a
    /// second entry. The subscription's cursor advances by exactly one
    /// interval step only when the paid occurrence sits at or before it;
    /// settling an overdue charge out of order leaves the cursor alone.
    pub fn pay(book: &mut Book, request: &PayRequest, payment_date: NaiveDate) -> Result<PaymentReceipt> {
        let account_id = book
            .account(request.account_id)
            .filter(|account| account.is_active)
            .map(|account| account.id)
            .ok_or_else(|| FinanceError::AccountNotFound(request.account_id.to_string()))?;

        let occurrence_id = Self::resolve_occurrence(book, &request.target)?;

        let (existing_tx, state, subscription_id, due_date, amount, currency) = {
            let occ = book
                .occurrence(occurrence_id)
                .ok_or(FinanceError::OccurrenceNotFound(occurrence_id))?;
            (
                occ.transaction_id,
                occ.state,
                occ.subscription_id,
                occ.due_date,
                occ.amount,
                occ.currency.clone(),
            )
        };

        if let Some(existing_tx) = existing_tx {
            if state != OccurrenceState::Paid {
                if let Some(occ) = book.occurrence_mut(occurrence_id) {
                    occ.state = OccurrenceState::Paid;
                }
                book.touch();
            }
            tracing::debug!(%occurrence_id, "payment replayed; occurrence already settled");
            return Ok(PaymentReceipt {
                outcome: PaymentOutcome::AlreadyPaid,
                occurrence_id,
                transaction_id: existing_tx,
                next_due_date: None,
            });
        }

        let subscription = book
            .subscription(subscription_id)
            .ok_or_else(|| FinanceError::SubscriptionNotFound(subscription_id.to_string()))?;
        let cursor = subscription.next_due_date;
        let interval = subscription.interval.clone();
        let note = format!(
            "Subscription payment {} - due {}",
            subscription.name, due_date
        );

        let mut entry = Transaction::new(
            book.owner,
            TxType::Expense,
            payment_date,
            amount,
            currency,
            account_id,
        );
        entry.project_id = subscription.project_id;
        entry.category_id = subscription.category_id;
        entry.payee_id = subscription.payee_id;
        entry.note = Some(note);
        entry.source_subscription = Some(subscription_id);
        let transaction_id = entry.id;

        // Effects are applied together; nothing below can fail.
        book.transactions.push(entry);
        if let Some(occ) = book.occurrence_mut(occurrence_id) {
            occ.transaction_id = Some(transaction_id);
            occ.state = OccurrenceState::Paid;
        }
        let mut advanced = None;
        if cursor <= due_date {
            let next = interval.next_date(due_date);
            if let Some(sub) = book.subscription_mut(subscription_id) {
                sub.next_due_date = next;
            }
            advanced = Some(next);
        }
        book.touch();

        tracing::info!(
            %occurrence_id,
            %transaction_id,
            due = %due_date,
            cursor_advanced = advanced.is_some(),
            "subscription payment posted"
        );

        Ok(PaymentReceipt {
            outcome: PaymentOutcome::Posted,
            occurrence_id,
            transaction_id,
            next_due_date: advanced,
        })
    }

    fn resolve_occurrence(book: &mut Book, target: &PayTarget) -> Result<Uuid> {
        match target {
            PayTarget::Occurrence(id) => book
                .occurrence(*id)
                .map(|occ| occ.id)
                .ok_or(FinanceError::OccurrenceNotFound(*id)),
            PayTarget::Subscription { id, due_date } => {
                let (sub_id, fallback) = {
                    let sub = book
                        .subscription(*id)
                        .ok_or_else(|| FinanceError::SubscriptionNotFound(id.to_string()))?;
                    (sub.id, sub.next_due_date)
                };
                let due = Self::parse_due_date(due_date.as_deref(), fallback);
                book.get_or_create_occurrence(sub_id, due)
                    .ok_or_else(|| FinanceError::SubscriptionNotFound(sub_id.to_string()))
            }
        }
    }

    /// Malformed or absent input recovers to the subscription's cursor
    /// rather than failing the request.
    fn parse_due_date(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(fallback),
            None => fallback,
        }
    }
}
