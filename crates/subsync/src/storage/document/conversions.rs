//! Document conversion functions.
//!
//! Pure functions converting between store documents and domain types. Reads
//! fail only when a required field is missing; every other field falls back
//! to a fixed default so that documents written by older clients still load.

use chrono::{DateTime, Utc};
use serde_json::Value;

use subsync_core::document::{
    parse_timestamp, server_timestamp, to_domain_at, to_store, Document, StoredDocument,
};
use subsync_core::membership::{
    Member, MemberStatus, MemberUpdate, NewMember, NewPayment, NewReminder, Payment,
    PaymentMethod, Reminder, ReminderStatus, DEFAULT_SUBSCRIPTION_AMOUNT,
};
use subsync_core::storage::{RepositoryError, Result};

// ============================================================================
// Members
// ============================================================================

/// Convert a new member into a store document.
pub fn new_member_to_document(member: &NewMember) -> Result<Document> {
    let mut doc = Document::new();
    doc.insert("name".into(), member.name.as_str().into());
    doc.insert("phone".into(), member.phone.as_str().into());
    if let Some(email) = &member.email {
        doc.insert("email".into(), email.as_str().into());
    }
    doc.insert("address".into(), member.address.as_str().into());
    doc.insert("joinDate".into(), to_store(member.join_date.as_ref())?);
    doc.insert(
        "subscriptionAmount".into(),
        number(member.subscription_amount)?,
    );
    doc.insert("status".into(), member.status.as_str().into());
    doc.insert("createdAt".into(), server_timestamp());
    Ok(doc)
}

/// Convert a partial member update into the fields to merge.
///
/// Always stamps `updatedAt` with the store's time.
pub fn member_update_to_document(update: &MemberUpdate) -> Result<Document> {
    let mut doc = Document::new();
    if let Some(name) = &update.name {
        doc.insert("name".into(), name.as_str().into());
    }
    if let Some(phone) = &update.phone {
        doc.insert("phone".into(), phone.as_str().into());
    }
    if let Some(email) = &update.email {
        // A blank email clears the stored one.
        let value = if email.trim().is_empty() {
            Value::Null
        } else {
            email.as_str().into()
        };
        doc.insert("email".into(), value);
    }
    if let Some(address) = &update.address {
        doc.insert("address".into(), address.as_str().into());
    }
    if let Some(amount) = update.subscription_amount {
        doc.insert("subscriptionAmount".into(), number(amount)?);
    }
    if let Some(status) = update.status {
        doc.insert("status".into(), status.as_str().into());
    }
    doc.insert("updatedAt".into(), server_timestamp());
    Ok(doc)
}

/// Convert a stored document into a member.
///
/// Only `name` is required. A missing amount falls back to the default
/// subscription, an unknown status to active and missing dates to `now`.
pub fn document_to_member(doc: &StoredDocument, now: DateTime<Utc>) -> Result<Member> {
    Ok(Member {
        id: doc.id.clone(),
        name: get_string(doc, "name")?,
        phone: get_optional_string(doc, "phone").unwrap_or_default(),
        email: get_optional_string(doc, "email").filter(|e| !e.is_empty()),
        address: get_optional_string(doc, "address").unwrap_or_default(),
        join_date: to_domain_at(doc.field("joinDate"), now),
        subscription_amount: get_optional_number(doc, "subscriptionAmount")
            .unwrap_or(DEFAULT_SUBSCRIPTION_AMOUNT),
        status: get_optional_string(doc, "status")
            .and_then(|s| MemberStatus::parse(&s))
            .unwrap_or_default(),
        created_at: to_domain_at(doc.field("createdAt"), now),
    })
}

// ============================================================================
// Payments
// ============================================================================

/// Convert a new payment into a store document.
pub fn new_payment_to_document(payment: &NewPayment) -> Result<Document> {
    let mut doc = Document::new();
    doc.insert("memberId".into(), payment.member_id.as_str().into());
    doc.insert("amount".into(), number(payment.amount)?);
    doc.insert("date".into(), to_store(payment.date.as_ref())?);
    doc.insert("collectedBy".into(), payment.collected_by.as_str().into());
    doc.insert(
        "paymentMethod".into(),
        payment.payment_method.as_str().into(),
    );
    if let Some(remarks) = &payment.remarks {
        doc.insert("remarks".into(), remarks.clone().into());
    }
    doc.insert("createdAt".into(), server_timestamp());
    Ok(doc)
}

/// Convert a stored document into a payment.
///
/// `memberId` and `amount` are required. A missing method reads as cash and
/// an unrecognised one as other.
pub fn document_to_payment(doc: &StoredDocument, now: DateTime<Utc>) -> Result<Payment> {
    Ok(Payment {
        id: doc.id.clone(),
        member_id: get_string(doc, "memberId")?,
        amount: get_number(doc, "amount")?,
        date: to_domain_at(doc.field("date"), now),
        collected_by: get_optional_string(doc, "collectedBy").unwrap_or_default(),
        payment_method: get_optional_string(doc, "paymentMethod")
            .map(|m| PaymentMethod::parse(&m).unwrap_or(PaymentMethod::Other))
            .unwrap_or_default(),
        remarks: get_optional_string(doc, "remarks").filter(|r| !r.is_empty()),
        created_at: to_domain_at(doc.field("createdAt"), now),
    })
}

// ============================================================================
// Reminders
// ============================================================================

/// Convert a new reminder into a store document. Reminders are stored as sent.
pub fn new_reminder_to_document(reminder: &NewReminder) -> Result<Document> {
    let mut doc = Document::new();
    doc.insert("memberId".into(), reminder.member_id.as_str().into());
    doc.insert("dueDate".into(), to_store(reminder.due_date.as_ref())?);
    doc.insert("message".into(), reminder.message.clone().into());
    doc.insert("status".into(), ReminderStatus::Sent.as_str().into());
    doc.insert("sentDate".into(), to_store(reminder.sent_date.as_ref())?);
    doc.insert("createdAt".into(), server_timestamp());
    Ok(doc)
}

/// Convert a stored document into a reminder.
///
/// `memberId` and `message` are required. An unknown status reads as sent.
pub fn document_to_reminder(doc: &StoredDocument, now: DateTime<Utc>) -> Result<Reminder> {
    Ok(Reminder {
        id: doc.id.clone(),
        member_id: get_string(doc, "memberId")?,
        due_date: to_domain_at(doc.field("dueDate"), now),
        message: get_string(doc, "message")?,
        status: get_optional_string(doc, "status")
            .and_then(|s| ReminderStatus::parse(&s))
            .unwrap_or(ReminderStatus::Sent),
        sent_date: parse_timestamp(doc.field("sentDate")),
        created_at: to_domain_at(doc.field("createdAt"), now),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn number(value: f64) -> Result<Value> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| RepositoryError::Serialization(format!("Non-finite number: {value}")))
}

/// Get a required string field.
fn get_string(doc: &StoredDocument, key: &str) -> Result<String> {
    get_optional_string(doc, key).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Missing or invalid field {key} in {}", doc.id))
    })
}

/// Get an optional string field.
fn get_optional_string(doc: &StoredDocument, key: &str) -> Option<String> {
    doc.field(key).and_then(Value::as_str).map(str::to_string)
}

/// Get a required numeric field.
fn get_number(doc: &StoredDocument, key: &str) -> Result<f64> {
    get_optional_number(doc, key).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Missing or invalid field {key} in {}", doc.id))
    })
}

/// Get an optional numeric field. Numeric strings are accepted.
fn get_optional_number(doc: &StoredDocument, key: &str) -> Option<f64> {
    match doc.field(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
