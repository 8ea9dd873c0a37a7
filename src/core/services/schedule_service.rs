//! Maintains the occurrence schedule: batch materialization, skip/fail
//! transitions, and the upcoming/overdue dashboard.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Book, OccurrenceState, SubscriptionStatus};
use crate::errors::{FinanceError, Result};

/// Upper bound on rows created by a single materialization run.
const MAX_MATERIALIZED_PER_RUN: usize = 512;

/// One row of the upcoming/overdue dashboard.
#[derive(Debug, Clone)]
pub struct UpcomingCharge {
    pub subscription_id: Uuid,
    pub subscription_name: String,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    /// Set when the row is backed by a materialized occurrence; `None` means
    /// the subscription has no occurrence rows yet and the cached cursor was
    /// used instead.
    pub occurrence_id: Option<Uuid>,
}

/// Aggregated dashboard view for one owner's book.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    pub upcoming: Vec<UpcomingCharge>,
    pub overdue: Vec<UpcomingCharge>,
    pub active: usize,
    pub paused: usize,
    pub canceled: usize,
    pub total_due: f64,
}

pub struct ScheduleService;

impl ScheduleService {
    /// Pre-generates `Planned` occurrences for every active subscription,
    /// walking each cursor forward through `horizon` (inclusive). Pairs that
    /// already exist in any state are left alone, and subscriptions past
    /// their end date stop generating.
    ///
    /// Returns the number of rows created.
    pub fn materialize_through(book: &mut Book, horizon: NaiveDate) -> Result<usize> {
        let subscription_ids: Vec<Uuid> = book
            .subscriptions
            .iter()
            .filter(|sub| sub.is_active() && sub.owner == book.owner)
            .map(|sub| sub.id)
            .collect();

        let mut created = 0usize;
        for sub_id in subscription_ids {
            let (interval, mut due, end_date) = {
                let sub = book
                    .subscription(sub_id)
                    .ok_or_else(|| FinanceError::SubscriptionNotFound(sub_id.to_string()))?;
                (sub.interval.clone(), sub.next_due_date, sub.end_date)
            };

            while due <= horizon && created < MAX_MATERIALIZED_PER_RUN {
                if end_date.map(|end| due > end).unwrap_or(false) {
                    break;
                }
                if book.occurrence_for(sub_id, due).is_none() {
                    book.get_or_create_occurrence(sub_id, due)
                        .ok_or_else(|| FinanceError::SubscriptionNotFound(sub_id.to_string()))?;
                    created += 1;
                }
                due = interval.next_date(due);
            }
            if created >= MAX_MATERIALIZED_PER_RUN {
                tracing::warn!(limit = MAX_MATERIALIZED_PER_RUN, "materialization cap reached");
                break;
            }
        }

        if created > 0 {
            tracing::info!(created, horizon = %horizon, "occurrences materialized");
        }
        Ok(created)
    }

    /// Transitions a planned occurrence to `Skipped`.
    pub fn skip(book: &mut Book, occurrence_id: Uuid) -> Result<()> {
        Self::close_planned(book, occurrence_id, OccurrenceState::Skipped)
    }

    /// Transitions a planned occurrence to `Failed` (e.g. a bounced autopay).
    pub fn mark_failed(book: &mut Book, occurrence_id: Uuid) -> Result<()> {
        Self::close_planned(book, occurrence_id, OccurrenceState::Failed)
    }

    fn close_planned(book: &mut Book, occurrence_id: Uuid, target: OccurrenceState) -> Result<()> {
        let occ = book
            .occurrence_mut(occurrence_id)
            .ok_or(FinanceError::OccurrenceNotFound(occurrence_id))?;
        if !occ.is_planned() {
            return Err(FinanceError::InvalidOperation(format!(
                "occurrence is {}, only planned ones can move to {}",
                occ.state, target
            )));
        }
        occ.state = target;
        book.touch();
        Ok(())
    }

    /// Builds the dashboard for `reference` (usually today): planned charges
    /// of active subscriptions split into upcoming and overdue, status
    /// counts, and the total of the next `limit` upcoming charges.
    ///
    /// Occurrence rows are authoritative; a subscription that has never been
    /// materialized contributes a synthetic row from its cached cursor so it
    /// does not vanish from the schedule.
    pub fn snapshot(book: &Book, reference: NaiveDate, limit: usize) -> ScheduleSnapshot {
        let mut upcoming = Vec::new();
        let mut overdue = Vec::new();
        let mut active = 0usize;
        let mut paused = 0usize;
        let mut canceled = 0usize;

        for sub in book.subscriptions.iter().filter(|s| s.owner == book.owner) {
            match sub.status {
                SubscriptionStatus::Active => active += 1,
                SubscriptionStatus::Paused => paused += 1,
                SubscriptionStatus::Canceled => canceled += 1,
            }
            if !sub.is_active() {
                continue;
            }

            let mut has_rows = false;
            for occ in book.occurrences_of(sub.id) {
                has_rows = true;
                if !occ.is_planned() {
                    continue;
                }
                let row = UpcomingCharge {
                    subscription_id: sub.id,
                    subscription_name: sub.name.clone(),
                    due_date: occ.due_date,
                    amount: occ.amount,
                    currency: occ.currency.clone(),
                    occurrence_id: Some(occ.id),
                };
                if occ.due_date < reference {
                    overdue.push(row);
                } else {
                    upcoming.push(row);
                }
            }

            if !has_rows {
                let row = UpcomingCharge {
                    subscription_id: sub.id,
                    subscription_name: sub.name.clone(),
                    due_date: sub.next_due_date,
                    amount: sub.amount,
                    currency: sub.currency.clone(),
                    occurrence_id: None,
                };
                if sub.next_due_date < reference {
                    overdue.push(row);
                } else {
                    upcoming.push(row);
                }
            }
        }

        upcoming.sort_by_key(|row| row.due_date);
        upcoming.truncate(limit);
        overdue.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        overdue.truncate(limit);
        let total_due = upcoming.iter().map(|row| row.amount).sum();

        ScheduleSnapshot {
            upcoming,
            overdue,
            active,
            paused,
            canceled,
            total_due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingInterval, Subscription};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn seeded_book() -> (Book, Uuid) {
        let mut book = Book::new("schedule-user");
        let owner = book.owner;
        let sub_id = book.add_subscription(Subscription::new(
            owner,
            "Rent",
            800.0,
            "EUR",
            d(2026, 1, 1),
            BillingInterval::monthly(),
        ));
        (book, sub_id)
    }

    #[test]
    fn materialize_walks_the_cursor_without_duplicates() {
        let (mut book, sub_id) = seeded_book();

        let created = ScheduleService::materialize_through(&mut book, d(2026, 4, 1)).unwrap();
        assert_eq!(created, 4); // Jan through Apr

        // Second run over the same horizon creates nothing.
        let again = ScheduleService::materialize_through(&mut book, d(2026, 4, 1)).unwrap();
        assert_eq!(again, 0);

        let dates: Vec<NaiveDate> = book.occurrences_of(sub_id).map(|o| o.due_date).collect();
        assert_eq!(dates.len(), 4);
        assert!(dates.contains(&d(2026, 4, 1)));
    }

    #[test]
    fn materialize_skips_paused_and_ended_subscriptions() {
        let (mut book, sub_id) = seeded_book();
        if let Some(sub) = book.subscription_mut(sub_id) {
            sub.end_date = Some(d(2026, 2, 15));
        }
        let created = ScheduleService::materialize_through(&mut book, d(2026, 6, 1)).unwrap();
        assert_eq!(created, 2); // Jan and Feb only

        if let Some(sub) = book.subscription_mut(sub_id) {
            sub.status = SubscriptionStatus::Paused;
        }
        assert_eq!(ScheduleService::materialize_through(&mut book, d(2027, 1, 1)).unwrap(), 0);
    }

    #[test]
    fn skip_requires_planned_state() {
        let (mut book, sub_id) = seeded_book();
        let occ_id = book.get_or_create_occurrence(sub_id, d(2026, 1, 1)).unwrap();
        ScheduleService::skip(&mut book, occ_id).unwrap();
        assert_eq!(book.occurrence(occ_id).unwrap().state, OccurrenceState::Skipped);

        let err = ScheduleService::mark_failed(&mut book, occ_id).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidOperation(_)));
    }

    #[test]
    fn snapshot_falls_back_to_cursor_for_never_materialized_subscriptions() {
        let (book, sub_id) = seeded_book();
        let snapshot = ScheduleService::snapshot(&book, d(2026, 1, 15), 5);
        assert_eq!(snapshot.active, 1);
        assert_eq!(snapshot.overdue.len(), 1);
        let row = &snapshot.overdue[0];
        assert_eq!(row.subscription_id, sub_id);
        assert_eq!(row.occurrence_id, None);
        assert_eq!(row.due_date, d(2026, 1, 1));
    }

    #[test]
    fn snapshot_prefers_occurrence_rows_once_they_exist() {
        let (mut book, sub_id) = seeded_book();
        ScheduleService::materialize_through(&mut book, d(2026, 2, 1)).unwrap();
        let snapshot = ScheduleService::snapshot(&book, d(2026, 1, 15), 5);
        assert!(snapshot.upcoming.iter().all(|row| row.occurrence_id.is_some()));
        assert_eq!(snapshot.overdue.len(), 1);
        assert_eq!(snapshot.total_due, 800.0);
        assert_eq!(snapshot.upcoming[0].subscription_id, sub_id);
    }
}
