//! Sample data for seeding an empty store.
//!
//! This module contains pure functions returning fixed sample records. Payments
//! and reminders reference members by the ids the store assigned when the
//! sample members were created, so they take those ids as input.

use super::requests::{NewMember, NewPayment, NewReminder};
use super::types::{MemberStatus, PaymentMethod};

const SAMPLE_COLLECTOR: &str = "Admin";
const SAMPLE_REMARKS: &str = "Monthly subscription";

/// Returns the sample members, in creation order.
pub fn sample_members() -> Vec<NewMember> {
    vec![
        NewMember::new("Rahul Sharma", "9876543210", "123 Main St, Bangalore")
            .with_join_date("2023-01-15"),
        NewMember::new("Priya Patel", "8765432109", "456 Park Ave, Mumbai")
            .with_subscription_amount(750.0)
            .with_join_date("2023-02-20"),
        NewMember::new("Amit Kumar", "7654321098", "789 Lake View, Delhi")
            .with_status(MemberStatus::Inactive)
            .with_join_date("2023-03-10"),
    ]
}

/// Returns the sample payments for the given member ids.
///
/// `member_ids` must follow the order of [`sample_members`]. Payments whose
/// member id is missing are left out.
pub fn sample_payments(member_ids: &[String]) -> Vec<NewPayment> {
    let specs = [
        (0, 500.0, "2023-02-05", PaymentMethod::Cash),
        (0, 500.0, "2023-03-07", PaymentMethod::Online),
        (1, 750.0, "2023-03-15", PaymentMethod::Cash),
    ];

    specs
        .into_iter()
        .filter_map(|(member, amount, date, method)| {
            let member_id = member_ids.get(member)?;
            Some(
                NewPayment::new(member_id.as_str(), amount, SAMPLE_COLLECTOR)
                    .with_date(date)
                    .with_method(method)
                    .with_remarks(SAMPLE_REMARKS),
            )
        })
        .collect()
}

/// Returns the sample reminders for the given member ids.
///
/// `member_ids` must follow the order of [`sample_members`].
pub fn sample_reminders(member_ids: &[String]) -> Vec<NewReminder> {
    member_ids
        .get(2)
        .map(|member_id| {
            NewReminder::new(
                member_id.as_str(),
                "Your subscription payment is due. Please pay at your earliest convenience.",
            )
            .with_due_date("2023-04-10")
            .with_sent_date("2023-04-01")
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::{validate_new_member, validate_new_payment, validate_new_reminder};

    fn ids() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_sample_members() {
        let members = sample_members();

        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name, "Rahul Sharma");
        assert_eq!(members[1].subscription_amount, 750.0);
        assert_eq!(members[2].status, MemberStatus::Inactive);
        for member in &members {
            assert_eq!(validate_new_member(member), Ok(()));
        }
    }

    #[test]
    fn test_sample_payments_reference_given_ids() {
        let payments = sample_payments(&ids());

        let member_ids: Vec<&str> = payments.iter().map(|p| p.member_id.as_str()).collect();
        assert_eq!(member_ids, vec!["a", "a", "b"]);
        for payment in &payments {
            assert_eq!(validate_new_payment(payment), Ok(()));
        }
    }

    #[test]
    fn test_sample_payments_skip_missing_members() {
        let payments = sample_payments(&ids()[..1]);
        assert_eq!(payments.len(), 2);
        assert!(sample_payments(&[]).is_empty());
    }

    #[test]
    fn test_sample_reminders() {
        let reminders = sample_reminders(&ids());

        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].member_id, "c");
        assert_eq!(validate_new_reminder(&reminders[0]), Ok(()));
        assert!(sample_reminders(&ids()[..2]).is_empty());
    }
}
