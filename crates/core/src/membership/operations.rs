use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DateInput;

use super::error::MembershipError;
use super::join::PaymentRow;
use super::requests::{MemberUpdate, NewMember, NewPayment, NewReminder};
use super::types::{Member, MemberStatus, Payment, PaymentMethod, Reminder};

/// Which months of payments to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    #[default]
    All,
    Current,
    Previous,
}

impl MonthFilter {
    /// Parses a filter name. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(MonthFilter::All),
            "current" => Some(MonthFilter::Current),
            "previous" => Some(MonthFilter::Previous),
            _ => None,
        }
    }

    /// Returns true if `date` falls in the month this filter selects,
    /// relative to `today`.
    pub fn matches(&self, date: DateTime<Utc>, today: NaiveDate) -> bool {
        let (year, month) = match self {
            MonthFilter::All => return true,
            MonthFilter::Current => (today.year(), today.month()),
            MonthFilter::Previous if today.month() == 1 => (today.year() - 1, 12),
            MonthFilter::Previous => (today.year(), today.month() - 1),
        };
        date.year() == year && date.month() == month
    }
}

/// Filters members by a search query and status.
///
/// The query matches case-insensitively against name and address, and as a
/// plain substring against the phone number.
pub fn filter_members<'a>(
    members: &'a [Member],
    search: Option<&str>,
    status: Option<MemberStatus>,
) -> Vec<&'a Member> {
    let needle = search.map(|s| s.trim().to_lowercase());
    members
        .iter()
        .filter(|member| {
            status.is_none_or(|s| member.status == s)
                && needle.as_deref().is_none_or(|n| {
                    member.name.to_lowercase().contains(n)
                        || member.phone.contains(n)
                        || member.address.to_lowercase().contains(n)
                })
        })
        .collect()
}

/// Filters joined payment rows by a search query, method and month.
///
/// The query matches case-insensitively against the member's display name and
/// the collector's name.
pub fn filter_payments<'a>(
    rows: &'a [PaymentRow],
    search: Option<&str>,
    method: Option<PaymentMethod>,
    month: MonthFilter,
    today: NaiveDate,
) -> Vec<&'a PaymentRow> {
    let needle = search.map(|s| s.trim().to_lowercase());
    rows.iter()
        .filter(|row| {
            method.is_none_or(|m| row.record.payment_method == m)
                && month.matches(row.record.date, today)
                && needle.as_deref().is_none_or(|n| {
                    row.member_name.to_lowercase().contains(n)
                        || row.record.collected_by.to_lowercase().contains(n)
                })
        })
        .collect()
}

/// Sorts members by name ascending.
pub fn sort_members_by_name(members: &mut [Member]) {
    members.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Sorts payments by date, most recent first.
pub fn sort_payments_by_date(payments: &mut [Payment]) {
    payments.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sorts reminders by creation time, most recent first.
pub fn sort_reminders_by_created(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Validates a member before creation.
pub fn validate_new_member(member: &NewMember) -> Result<(), MembershipError> {
    require_text(&member.name, MembershipError::EmptyName)?;
    require_text(&member.phone, MembershipError::EmptyPhone)?;
    require_text(&member.address, MembershipError::EmptyAddress)?;
    require_positive(member.subscription_amount)?;
    check_date(member.join_date.as_ref())
}

/// Validates a partial member update. Only the fields present are checked.
pub fn validate_member_update(update: &MemberUpdate) -> Result<(), MembershipError> {
    if let Some(name) = &update.name {
        require_text(name, MembershipError::EmptyName)?;
    }
    if let Some(phone) = &update.phone {
        require_text(phone, MembershipError::EmptyPhone)?;
    }
    if let Some(address) = &update.address {
        require_text(address, MembershipError::EmptyAddress)?;
    }
    if let Some(amount) = update.subscription_amount {
        require_positive(amount)?;
    }
    Ok(())
}

/// Validates a payment before it is recorded.
pub fn validate_new_payment(payment: &NewPayment) -> Result<(), MembershipError> {
    require_text(&payment.member_id, MembershipError::MissingMemberId)?;
    require_positive(payment.amount)?;
    require_text(&payment.collected_by, MembershipError::EmptyCollector)?;
    check_date(payment.date.as_ref())
}

/// Validates a reminder before it is sent.
pub fn validate_new_reminder(reminder: &NewReminder) -> Result<(), MembershipError> {
    require_text(&reminder.member_id, MembershipError::MissingMemberId)?;
    require_text(&reminder.message, MembershipError::EmptyMessage)?;
    check_date(reminder.due_date.as_ref())?;
    check_date(reminder.sent_date.as_ref())
}

fn require_text(value: &str, error: MembershipError) -> Result<(), MembershipError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}

fn require_positive(amount: f64) -> Result<(), MembershipError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(MembershipError::InvalidAmount(amount));
    }
    Ok(())
}

fn check_date(input: Option<&DateInput>) -> Result<(), MembershipError> {
    match input {
        Some(input) => input
            .parse()
            .map(|_| ())
            .map_err(|e| MembershipError::InvalidDate(e.to_string())),
        None => Ok(()),
    }
}
