use async_trait::async_trait;

use crate::membership::{
    Member, MemberUpdate, NewMember, NewPayment, NewReminder, Payment, Reminder,
};

use super::Result;

/// Repository for member operations.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Lists all members, sorted by name ascending.
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Gets a member by its ID.
    async fn get_member(&self, id: &str) -> Result<Option<Member>>;

    /// Creates a new member and returns its assigned ID.
    async fn create_member(&self, member: &NewMember) -> Result<String>;

    /// Applies a partial update to an existing member.
    async fn update_member(&self, id: &str, update: &MemberUpdate) -> Result<()>;

    /// Deletes a member by its ID.
    async fn delete_member(&self, id: &str) -> Result<()>;
}

/// Repository for payment operations. Payments are immutable once recorded.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Lists all payments, most recent date first.
    async fn list_payments(&self) -> Result<Vec<Payment>>;

    /// Gets a payment by its ID.
    async fn get_payment(&self, id: &str) -> Result<Option<Payment>>;

    /// Records a new payment and returns its assigned ID.
    async fn create_payment(&self, payment: &NewPayment) -> Result<String>;
}

/// Repository for reminder operations.
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Lists all reminders, most recently created first.
    async fn list_reminders(&self) -> Result<Vec<Reminder>>;

    /// Gets a reminder by its ID.
    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>>;

    /// Creates a new reminder and returns its assigned ID.
    async fn create_reminder(&self, reminder: &NewReminder) -> Result<String>;
}
