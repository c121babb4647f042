//! Attaches member display names to records that reference a member.

use std::collections::HashMap;

use serde::Serialize;

use super::types::{Member, Payment, Reminder};

/// Display name used when a record's member id does not resolve.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";

/// A record that belongs to a member.
pub trait MemberOwned {
    fn member_id(&self) -> &str;
}

impl MemberOwned for Payment {
    fn member_id(&self) -> &str {
        &self.member_id
    }
}

impl MemberOwned for Reminder {
    fn member_id(&self) -> &str {
        &self.member_id
    }
}

/// A record paired with its owning member's display name.
///
/// Serializes as the record's own fields plus `memberName`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved<T> {
    #[serde(flatten)]
    pub record: T,
    pub member_name: String,
}

pub type PaymentRow = Resolved<Payment>;
pub type ReminderRow = Resolved<Reminder>;

/// Id-to-member lookup table built once per join.
#[derive(Debug)]
pub struct MemberIndex<'a> {
    by_id: HashMap<&'a str, &'a Member>,
}

impl<'a> MemberIndex<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        Self {
            by_id: members.iter().map(|m| (m.id.as_str(), m)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Member> {
        self.by_id.get(id).copied()
    }

    /// Returns the member's name, or [`UNKNOWN_MEMBER`] if the id is unknown.
    pub fn display_name(&self, id: &str) -> &'a str {
        self.get(id).map_or(UNKNOWN_MEMBER, |m| m.name.as_str())
    }
}

/// Pairs each record with its member's display name, preserving order.
///
/// # Examples
///
/// ```
/// use subsync_core::membership::{resolve_member_names, Payment, PaymentMethod, UNKNOWN_MEMBER};
/// use chrono::Utc;
///
/// let orphan = Payment {
///     id: "p1".to_string(),
///     member_id: "gone".to_string(),
///     amount: 500.0,
///     date: Utc::now(),
///     collected_by: "Admin".to_string(),
///     payment_method: PaymentMethod::Cash,
///     remarks: None,
///     created_at: Utc::now(),
/// };
///
/// let rows = resolve_member_names(&[orphan], &[]);
/// assert_eq!(rows[0].member_name, UNKNOWN_MEMBER);
/// ```
pub fn resolve_member_names<T>(records: &[T], members: &[Member]) -> Vec<Resolved<T>>
where
    T: MemberOwned + Clone,
{
    let index = MemberIndex::new(members);
    records
        .iter()
        .map(|record| Resolved {
            member_name: index.display_name(record.member_id()).to_string(),
            record: record.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{MemberStatus, PaymentMethod, ReminderStatus};
    use chrono::{TimeZone, Utc};

    fn member(id: &str, name: &str) -> Member {
        let date = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
        Member {
            id: id.to_string(),
            name: name.to_string(),
            phone: "9876543210".to_string(),
            email: None,
            address: "Bangalore".to_string(),
            join_date: date,
            subscription_amount: 500.0,
            status: MemberStatus::Active,
            created_at: date,
        }
    }

    fn payment(id: &str, member_id: &str) -> Payment {
        let date = Utc.with_ymd_and_hms(2023, 3, 7, 0, 0, 0).unwrap();
        Payment {
            id: id.to_string(),
            member_id: member_id.to_string(),
            amount: 500.0,
            date,
            collected_by: "Admin".to_string(),
            payment_method: PaymentMethod::Cash,
            remarks: None,
            created_at: date,
        }
    }

    #[test]
    fn test_resolves_known_members() {
        let members = vec![member("m1", "Rahul Sharma"), member("m2", "Priya Patel")];
        let payments = vec![payment("p1", "m2"), payment("p2", "m1")];

        let rows = resolve_member_names(&payments, &members);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.id, "p1");
        assert_eq!(rows[0].member_name, "Priya Patel");
        assert_eq!(rows[1].member_name, "Rahul Sharma");
    }

    #[test]
    fn test_unknown_member_gets_sentinel() {
        let members = vec![member("m1", "Rahul Sharma")];
        let payments = vec![payment("p1", "deleted"), payment("p2", "")];

        let rows = resolve_member_names(&payments, &members);

        assert_eq!(rows[0].member_name, UNKNOWN_MEMBER);
        assert_eq!(rows[1].member_name, UNKNOWN_MEMBER);
    }

    #[test]
    fn test_resolves_reminders() {
        let created = Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap();
        let reminder = Reminder {
            id: "r1".to_string(),
            member_id: "m3".to_string(),
            due_date: created,
            message: "Due".to_string(),
            status: ReminderStatus::Sent,
            sent_date: Some(created),
            created_at: created,
        };

        let rows = resolve_member_names(&[reminder], &[member("m3", "Amit Kumar")]);

        assert_eq!(rows[0].member_name, "Amit Kumar");
    }

    #[test]
    fn test_row_serializes_flattened() {
        let rows = resolve_member_names(&[payment("p1", "m1")], &[member("m1", "Rahul Sharma")]);
        let json = serde_json::to_value(&rows[0]).unwrap();

        assert_eq!(json["id"], "p1");
        assert_eq!(json["memberId"], "m1");
        assert_eq!(json["memberName"], "Rahul Sharma");
        assert_eq!(json["paymentMethod"], "cash");
    }

    #[test]
    fn test_member_index_lookup() {
        let members = vec![member("m1", "Rahul Sharma")];
        let index = MemberIndex::new(&members);

        assert_eq!(index.get("m1").map(|m| m.name.as_str()), Some("Rahul Sharma"));
        assert!(index.get("m2").is_none());
        assert_eq!(index.display_name("m2"), UNKNOWN_MEMBER);
    }
}
