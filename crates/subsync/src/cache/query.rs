//! Query cache over the membership repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use subsync_core::cache::{CacheEvent, Clock, Freshness, QueryKey, SystemClock};
use subsync_core::membership::{
    resolve_member_names, Member, MemberUpdate, NewMember, NewPayment, NewReminder, Payment,
    PaymentRow, Reminder, ReminderRow,
};
use subsync_core::storage::{MemberRepository, PaymentRepository, ReminderRepository, Result};

use super::QuerySlot;

/// Cached read path and write-through decorator for the membership
/// repositories.
///
/// - **Reads**: served from the collection's slot while fresh, otherwise
///   fetched once and shared with every concurrent reader.
/// - **Writes**: persisted to the repository first; only a confirmed write
///   invalidates the slot of the collection it touched.
///
/// The `members()`, `payments()` and `reminders()` reads never fail: a read
/// failure is logged and served as an empty result, and is not cached. The
/// repository trait implementations propagate errors instead.
pub struct QueryCache {
    member_repo: Arc<dyn MemberRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    reminder_repo: Arc<dyn ReminderRepository>,
    members: QuerySlot<Member>,
    payments: QuerySlot<Payment>,
    reminders: QuerySlot<Reminder>,
    clock: Arc<dyn Clock>,
    freshness: Freshness,
    events: broadcast::Sender<CacheEvent>,
}

impl QueryCache {
    /// Creates a cache over the given repositories, using the system clock.
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        reminder_repo: Arc<dyn ReminderRepository>,
        freshness: Freshness,
        event_capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            member_repo,
            payment_repo,
            reminder_repo,
            members: QuerySlot::new(QueryKey::Members, events.clone()),
            payments: QuerySlot::new(QueryKey::Payments, events.clone()),
            reminders: QuerySlot::new(QueryKey::Reminders, events.clone()),
            clock: Arc::new(SystemClock),
            freshness,
            events,
        }
    }

    /// Creates a cache over a single repository implementing all three traits.
    pub fn from_repository<R>(repo: Arc<R>, freshness: Freshness, event_capacity: usize) -> Self
    where
        R: MemberRepository + PaymentRepository + ReminderRepository + 'static,
    {
        Self::new(
            repo.clone(),
            repo.clone(),
            repo,
            freshness,
            event_capacity,
        )
    }

    /// Replaces the clock used for freshness checks.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Subscribes to cache events.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Marks a query stale.
    pub fn invalidate(&self, key: QueryKey) {
        match key {
            QueryKey::Members => self.members.invalidate(),
            QueryKey::Payments => self.payments.invalidate(),
            QueryKey::Reminders => self.reminders.invalidate(),
        }
    }

    /// Number of store reads started for a query.
    #[cfg(test)]
    pub fn fetch_count(&self, key: QueryKey) -> u64 {
        match key {
            QueryKey::Members => self.members.fetch_count(),
            QueryKey::Payments => self.payments.fetch_count(),
            QueryKey::Reminders => self.reminders.fetch_count(),
        }
    }

    // ------------------------------------------------------------------------
    // Cached reads
    // ------------------------------------------------------------------------

    async fn cached_members(&self) -> Result<Arc<Vec<Member>>> {
        let repo = self.member_repo.clone();
        self.members
            .get_or_fetch(self.clock.as_ref(), self.freshness, || async move {
                repo.list_members().await
            })
            .await
    }

    async fn cached_payments(&self) -> Result<Arc<Vec<Payment>>> {
        let repo = self.payment_repo.clone();
        self.payments
            .get_or_fetch(self.clock.as_ref(), self.freshness, || async move {
                repo.list_payments().await
            })
            .await
    }

    async fn cached_reminders(&self) -> Result<Arc<Vec<Reminder>>> {
        let repo = self.reminder_repo.clone();
        self.reminders
            .get_or_fetch(self.clock.as_ref(), self.freshness, || async move {
                repo.list_reminders().await
            })
            .await
    }

    /// All members sorted by name. Empty when the store cannot be read.
    pub async fn members(&self) -> Arc<Vec<Member>> {
        degrade(QueryKey::Members, self.cached_members().await)
    }

    /// All payments, most recent first. Empty when the store cannot be read.
    pub async fn payments(&self) -> Arc<Vec<Payment>> {
        degrade(QueryKey::Payments, self.cached_payments().await)
    }

    /// All reminders, most recently created first. Empty when the store
    /// cannot be read.
    pub async fn reminders(&self) -> Arc<Vec<Reminder>> {
        degrade(QueryKey::Reminders, self.cached_reminders().await)
    }

    /// Payments joined with their member's display name.
    pub async fn payment_rows(&self) -> Vec<PaymentRow> {
        let (payments, members) = tokio::join!(self.payments(), self.members());
        resolve_member_names(&payments, &members)
    }

    /// Reminders joined with their member's display name.
    pub async fn reminder_rows(&self) -> Vec<ReminderRow> {
        let (reminders, members) = tokio::join!(self.reminders(), self.members());
        resolve_member_names(&reminders, &members)
    }

    /// A single member, or `None` if missing or unreadable.
    pub async fn member(&self, id: &str) -> Option<Member> {
        lookup(QueryKey::Members, id, self.member_repo.get_member(id).await)
    }

    /// A single payment, or `None` if missing or unreadable.
    pub async fn payment(&self, id: &str) -> Option<Payment> {
        lookup(QueryKey::Payments, id, self.payment_repo.get_payment(id).await)
    }

    /// A single reminder, or `None` if missing or unreadable.
    pub async fn reminder(&self, id: &str) -> Option<Reminder> {
        lookup(
            QueryKey::Reminders,
            id,
            self.reminder_repo.get_reminder(id).await,
        )
    }
}

fn degrade<T>(key: QueryKey, result: Result<Arc<Vec<T>>>) -> Arc<Vec<T>> {
    result.unwrap_or_else(|err| {
        tracing::warn!(%key, error = %err, "Read failed, serving empty result");
        Arc::new(Vec::new())
    })
}

fn lookup<T>(key: QueryKey, id: &str, result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(%key, %id, error = %err, "Read failed, serving not found");
        None
    })
}

// ============================================================================
// Repository implementations (write-through)
// ============================================================================

#[async_trait]
impl MemberRepository for QueryCache {
    async fn list_members(&self) -> Result<Vec<Member>> {
        Ok(self.cached_members().await?.as_ref().clone())
    }

    async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        self.member_repo.get_member(id).await
    }

    async fn create_member(&self, member: &NewMember) -> Result<String> {
        let id = self.member_repo.create_member(member).await?;
        self.invalidate(QueryKey::Members);
        tracing::debug!(member_id = %id, "Member created");
        Ok(id)
    }

    async fn update_member(&self, id: &str, update: &MemberUpdate) -> Result<()> {
        self.member_repo.update_member(id, update).await?;
        self.invalidate(QueryKey::Members);
        tracing::debug!(member_id = %id, "Member updated");
        Ok(())
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        self.member_repo.delete_member(id).await?;
        self.invalidate(QueryKey::Members);
        tracing::debug!(member_id = %id, "Member deleted");
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for QueryCache {
    async fn list_payments(&self) -> Result<Vec<Payment>> {
        Ok(self.cached_payments().await?.as_ref().clone())
    }

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>> {
        self.payment_repo.get_payment(id).await
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<String> {
        let id = self.payment_repo.create_payment(payment).await?;
        self.invalidate(QueryKey::Payments);
        tracing::debug!(payment_id = %id, member_id = %payment.member_id, "Payment created");
        Ok(id)
    }
}

#[async_trait]
impl ReminderRepository for QueryCache {
    async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        Ok(self.cached_reminders().await?.as_ref().clone())
    }

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>> {
        self.reminder_repo.get_reminder(id).await
    }

    async fn create_reminder(&self, reminder: &NewReminder) -> Result<String> {
        let id = self.reminder_repo.create_reminder(reminder).await?;
        self.invalidate(QueryKey::Reminders);
        tracing::debug!(reminder_id = %id, member_id = %reminder.member_id, "Reminder created");
        Ok(id)
    }
}
