//! Document-backed repository implementation.
//!
//! Implements the repository traits from `subsync_core::storage` on top of any
//! [`DocumentStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use subsync_core::document::{Collection, DocumentStore, OrderBy, StoredDocument};
use subsync_core::membership::{
    sort_members_by_name, sort_payments_by_date, sort_reminders_by_created,
    validate_member_update, validate_new_member, validate_new_payment, validate_new_reminder,
    Member, MemberUpdate, NewMember, NewPayment, NewReminder, Payment, Reminder,
};
use subsync_core::storage::{MemberRepository, PaymentRepository, ReminderRepository, Result};

use super::conversions::{
    document_to_member, document_to_payment, document_to_reminder, member_update_to_document,
    new_member_to_document, new_payment_to_document, new_reminder_to_document,
};

/// Repository implementation backed by a document store.
///
/// Lists request the store's ordering and sort again after parsing, so the
/// documented order holds even when the store ignores the request. Documents
/// that cannot be parsed are skipped with a warning.
pub struct DocumentRepository<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> DocumentRepository<S> {
    /// Creates a new repository over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn list_parsed<T: Send>(
        &self,
        collection: Collection,
        order: OrderBy,
        parse: fn(&StoredDocument, DateTime<Utc>) -> Result<T>,
    ) -> Result<Vec<T>> {
        let documents = self.store.list(collection, Some(order)).await?;
        let now = Utc::now();

        let parsed = documents
            .iter()
            .filter_map(|doc| match parse(doc, now) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        %collection,
                        id = %doc.id,
                        error = %err,
                        "Skipping malformed document"
                    );
                    None
                }
            })
            .collect();

        Ok(parsed)
    }

    async fn get_parsed<T: Send>(
        &self,
        collection: Collection,
        id: &str,
        parse: fn(&StoredDocument, DateTime<Utc>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.store.get(collection, id).await? {
            Some(doc) => parse(&doc, Utc::now()).map(Some),
            None => Ok(None),
        }
    }
}

// ============================================================================
// MemberRepository implementation
// ============================================================================

#[async_trait]
impl<S: DocumentStore + 'static> MemberRepository for DocumentRepository<S> {
    async fn list_members(&self) -> Result<Vec<Member>> {
        let mut members = self
            .list_parsed(Collection::Members, OrderBy::asc("name"), document_to_member)
            .await?;
        sort_members_by_name(&mut members);
        Ok(members)
    }

    async fn get_member(&self, id: &str) -> Result<Option<Member>> {
        self.get_parsed(Collection::Members, id, document_to_member)
            .await
    }

    async fn create_member(&self, member: &NewMember) -> Result<String> {
        validate_new_member(member)?;
        let doc = new_member_to_document(member)?;
        let id = self.store.add(Collection::Members, doc).await?;
        tracing::debug!(member_id = %id, name = %member.name, "Member stored");
        Ok(id)
    }

    async fn update_member(&self, id: &str, update: &MemberUpdate) -> Result<()> {
        validate_member_update(update)?;
        let fields = member_update_to_document(update)?;
        self.store.update(Collection::Members, id, fields).await?;
        tracing::debug!(member_id = %id, "Member updated");
        Ok(())
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        self.store.delete(Collection::Members, id).await?;
        tracing::debug!(member_id = %id, "Member deleted");
        Ok(())
    }
}

// ============================================================================
// PaymentRepository implementation
// ============================================================================

#[async_trait]
impl<S: DocumentStore + 'static> PaymentRepository for DocumentRepository<S> {
    async fn list_payments(&self) -> Result<Vec<Payment>> {
        let mut payments = self
            .list_parsed(
                Collection::Payments,
                OrderBy::desc("date"),
                document_to_payment,
            )
            .await?;
        sort_payments_by_date(&mut payments);
        Ok(payments)
    }

    async fn get_payment(&self, id: &str) -> Result<Option<Payment>> {
        self.get_parsed(Collection::Payments, id, document_to_payment)
            .await
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<String> {
        validate_new_payment(payment)?;
        let doc = new_payment_to_document(payment)?;
        let id = self.store.add(Collection::Payments, doc).await?;
        tracing::debug!(
            payment_id = %id,
            member_id = %payment.member_id,
            amount = payment.amount,
            "Payment stored"
        );
        Ok(id)
    }
}

// ============================================================================
// ReminderRepository implementation
// ============================================================================

#[async_trait]
impl<S: DocumentStore + 'static> ReminderRepository for DocumentRepository<S> {
    async fn list_reminders(&self) -> Result<Vec<Reminder>> {
        let mut reminders = self
            .list_parsed(
                Collection::Reminders,
                OrderBy::desc("createdAt"),
                document_to_reminder,
            )
            .await?;
        sort_reminders_by_created(&mut reminders);
        Ok(reminders)
    }

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>> {
        self.get_parsed(Collection::Reminders, id, document_to_reminder)
            .await
    }

    async fn create_reminder(&self, reminder: &NewReminder) -> Result<String> {
        validate_new_reminder(reminder)?;
        let doc = new_reminder_to_document(reminder)?;
        let id = self.store.add(Collection::Reminders, doc).await?;
        tracing::debug!(reminder_id = %id, member_id = %reminder.member_id, "Reminder stored");
        Ok(id)
    }
}
