//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use subsync_core::cache::QueryKey;
use subsync_core::membership::{
    Member, MemberUpdate, NewMember, NewPayment, NewReminder, Payment, Reminder,
};
use subsync_core::storage::{
    MemberRepository, PaymentRepository, ReminderRepository, RepositoryError, Result,
};

use crate::storage::{DocumentRepository, InMemoryDocumentStore};

/// Document-backed repository that counts list calls and can be made slow or
/// unreachable.
pub struct TestRepository {
    inner: DocumentRepository<InMemoryDocumentStore>,
    member_lists: AtomicUsize,
    payment_lists: AtomicUsize,
    reminder_lists: AtomicUsize,
    list_delay: Duration,
    failing: AtomicBool,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Every list call sleeps for `delay` before reading.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            inner: DocumentRepository::new(Arc::new(InMemoryDocumentStore::new())),
            member_lists: AtomicUsize::new(0),
            payment_lists: AtomicUsize::new(0),
            reminder_lists: AtomicUsize::new(0),
            list_delay: delay,
            failing: AtomicBool::new(false),
        }
    }

    /// While set, every call fails with a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of list calls that reached this repository.
    pub fn list_calls(&self, key: QueryKey) -> usize {
        match key {
            QueryKey::Members => self.member_lists.load(Ordering::SeqCst),
            QueryKey::Payments => self.payment_lists.load(Ordering::SeqCst),
            QueryKey::Reminders => self.reminder_lists.load(Ordering::SeqCst),
        }
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "store unreachable".to_string(),
            ));
        }
        Ok(())
    }

    async fn before_list(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        self.check()
    }
}

#[async_trait]
impl MemberRepository for TestRepository {
    async fn list_members(&self) -> Result<Vec<Member>> {
        self.before_list(&self.member_lists).await?;
        self.inner.list_members().await
    }

    async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        self.check()?;
        self.inner.get_member(id).await
    }

    async fn create_member(&self, member: &NewMember) -> Result<String> {
        self.check()?;
        self.inner.create_member(member).await
    }

    async fn update_member(&self, id: &str, update: &MemberUpdate) -> Result<()> {
        self.check()?;
        self.inner.update_member(id, update).await
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        self.check()?;
        self.inner.delete_member(id).await
    }
}

#[async_trait]
impl PaymentRepository for TestRepository {
    async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.before_list(&self.payment_lists).await?;
        self.inner.list_payments().await
    }

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>> {
        self.check()?;
        self.inner.get_payment(id).await
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<String> {
        self.check()?;
        self.inner.create_payment(payment).await
    }
}

#[async_trait]
impl ReminderRepository for TestRepository {
    async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        self.before_list(&self.reminder_lists).await?;
        self.inner.list_reminders().await
    }

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>> {
        self.check()?;
        self.inner.get_reminder(id).await
    }

    async fn create_reminder(&self, reminder: &NewReminder) -> Result<String> {
        self.check()?;
        self.inner.create_reminder(reminder).await
    }
}
