//! Write payloads for membership operations.
//!
//! These types are what callers hand to repository `create`/`update`
//! operations. Ids and creation timestamps are never part of them; the store
//! assigns both.

use serde::{Deserialize, Serialize};

use crate::document::DateInput;
use crate::serde::{deserialize_optional_date_input, deserialize_optional_string};

use super::types::{MemberStatus, PaymentMethod};

/// Subscription amount used when a new member does not specify one.
pub const DEFAULT_SUBSCRIPTION_AMOUNT: f64 = 500.0;

fn default_subscription_amount() -> f64 {
    DEFAULT_SUBSCRIPTION_AMOUNT
}

/// Request payload for creating a new member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    pub address: String,
    /// Defaults to the store's time when absent.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub join_date: Option<DateInput>,
    #[serde(default = "default_subscription_amount")]
    pub subscription_amount: f64,
    #[serde(default)]
    pub status: MemberStatus,
}

impl NewMember {
    /// Create an active member request with the default subscription amount.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            address: address.into(),
            join_date: None,
            subscription_amount: DEFAULT_SUBSCRIPTION_AMOUNT,
            status: MemberStatus::Active,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_join_date(mut self, join_date: impl Into<DateInput>) -> Self {
        self.join_date = Some(join_date.into());
        self
    }

    pub fn with_subscription_amount(mut self, amount: f64) -> Self {
        self.subscription_amount = amount;
        self
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }
}

/// Request payload for a partial member update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// An empty string removes the member's email; absent leaves it as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
}

impl MemberUpdate {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_subscription_amount(mut self, amount: f64) -> Self {
        self.subscription_amount = Some(amount);
        self
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.subscription_amount.is_none()
            && self.status.is_none()
    }
}

/// Request payload for recording a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub member_id: String,
    pub amount: f64,
    /// Defaults to the store's time when absent.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateInput>,
    pub collected_by: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
}

impl NewPayment {
    /// Create a cash payment request dated at the store's time.
    pub fn new(member_id: impl Into<String>, amount: f64, collected_by: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
            date: None,
            collected_by: collected_by.into(),
            payment_method: PaymentMethod::Cash,
            remarks: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<DateInput>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// Request payload for sending a reminder.
///
/// Reminders are always stored with status `sent`; there is no way to create
/// a pending or failed reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub member_id: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateInput>,
    pub message: String,
    /// Defaults to the store's time when absent.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_input",
        skip_serializing_if = "Option::is_none"
    )]
    pub sent_date: Option<DateInput>,
}

impl NewReminder {
    pub fn new(member_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            due_date: None,
            message: message.into(),
            sent_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: impl Into<DateInput>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_sent_date(mut self, sent_date: impl Into<DateInput>) -> Self {
        self.sent_date = Some(sent_date.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_member_defaults() {
        let member = NewMember::new("Rahul Sharma", "9876543210", "123 Main St");

        assert_eq!(member.subscription_amount, 500.0);
        assert_eq!(member.status, MemberStatus::Active);
        assert!(member.email.is_none());
        assert!(member.join_date.is_none());
    }

    #[test]
    fn test_new_member_deserialize_applies_defaults() {
        let member: NewMember = serde_json::from_value(json!({
            "name": "Priya Patel",
            "phone": "8765432109",
            "email": "",
            "address": "456 Park Ave, Mumbai",
            "joinDate": "2023-02-20"
        }))
        .unwrap();

        assert_eq!(member.email, None);
        assert_eq!(member.join_date, Some(DateInput::from("2023-02-20")));
        assert_eq!(member.subscription_amount, DEFAULT_SUBSCRIPTION_AMOUNT);
        assert_eq!(member.status, MemberStatus::Active);
    }

    #[test]
    fn test_member_update_is_empty() {
        assert!(MemberUpdate::new().is_empty());
        assert!(!MemberUpdate::new()
            .with_status(MemberStatus::Inactive)
            .is_empty());
    }

    #[test]
    fn test_member_update_deserializes_partial_fields() {
        let update: MemberUpdate = serde_json::from_value(json!({
            "subscriptionAmount": 750,
            "status": "inactive"
        }))
        .unwrap();

        assert_eq!(update.subscription_amount, Some(750.0));
        assert_eq!(update.status, Some(MemberStatus::Inactive));
        assert!(update.name.is_none());
    }

    #[test]
    fn test_member_update_keeps_empty_email_as_removal() {
        let update: MemberUpdate = serde_json::from_value(json!({ "email": "" })).unwrap();
        assert_eq!(update.email.as_deref(), Some(""));
        assert!(!update.is_empty());

        let update: MemberUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.email.is_none());
    }

    #[test]
    fn test_new_payment_deserialize() {
        let payment: NewPayment = serde_json::from_value(json!({
            "memberId": "m1",
            "amount": 500,
            "date": 1678147200000_i64,
            "collectedBy": "Admin",
            "paymentMethod": "online",
            "remarks": "Monthly subscription"
        }))
        .unwrap();

        assert_eq!(payment.member_id, "m1");
        assert_eq!(payment.date, Some(DateInput::Millis(1_678_147_200_000)));
        assert_eq!(payment.payment_method, PaymentMethod::Online);
        assert_eq!(payment.remarks.as_deref(), Some("Monthly subscription"));
    }

    #[test]
    fn test_new_payment_builder() {
        let payment = NewPayment::new("m1", 750.0, "Admin")
            .with_method(PaymentMethod::Other)
            .with_date("2023-03-15")
            .with_remarks("Advance");

        assert_eq!(payment.payment_method, PaymentMethod::Other);
        assert_eq!(payment.date, Some(DateInput::from("2023-03-15")));
        assert_eq!(payment.remarks.as_deref(), Some("Advance"));
    }

    #[test]
    fn test_new_reminder_builder() {
        let reminder = NewReminder::new("m3", "Your payment is due")
            .with_due_date("2023-04-10")
            .with_sent_date("2023-04-01");

        assert_eq!(reminder.due_date, Some(DateInput::from("2023-04-10")));
        assert_eq!(reminder.sent_date, Some(DateInput::from("2023-04-01")));
    }
}
