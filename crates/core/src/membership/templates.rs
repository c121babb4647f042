//! Reminder message templates.

use chrono::NaiveDate;
use serde::Serialize;

/// A predefined reminder message with `{organization}`, `{amount}` and
/// `{date}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub const REMINDER_TEMPLATES: [ReminderTemplate; 3] = [
    ReminderTemplate {
        id: "template1",
        title: "Monthly Subscription Reminder",
        content: "{organization}: Your monthly subscription of ₹{amount} is due. \
                  Please arrange for payment at your earliest convenience.",
    },
    ReminderTemplate {
        id: "template2",
        title: "Payment Collection Notice",
        content: "{organization}: Our representative will visit your address on {date} \
                  for monthly subscription collection of ₹{amount}. Thank you.",
    },
    ReminderTemplate {
        id: "template3",
        title: "Pending Payment Reminder",
        content: "{organization}: Your subscription payment of ₹{amount} is pending. \
                  Please make the payment to continue supporting our services.",
    },
];

impl ReminderTemplate {
    /// Looks up a template by id.
    pub fn find(id: &str) -> Option<&'static ReminderTemplate> {
        REMINDER_TEMPLATES.iter().find(|t| t.id == id)
    }
}

/// Fills a template's placeholders.
///
/// # Examples
///
/// ```
/// use subsync_core::membership::{render_template, ReminderTemplate};
/// use chrono::NaiveDate;
///
/// let template = ReminderTemplate::find("template2").unwrap();
/// let due = NaiveDate::from_ymd_opt(2023, 4, 10);
/// let message = render_template(template, "Sevaashram", 750.0, due);
///
/// assert!(message.starts_with("Sevaashram: "));
/// assert!(message.contains("on April 10, 2023"));
/// assert!(message.contains("₹750."));
/// ```
pub fn render_template(
    template: &ReminderTemplate,
    organization: &str,
    amount: f64,
    due_date: Option<NaiveDate>,
) -> String {
    let date = due_date.map_or_else(
        || "the scheduled date".to_string(),
        |d| d.format("%B %-d, %Y").to_string(),
    );
    template
        .content
        .replace("{organization}", organization)
        .replace("{amount}", &amount.to_string())
        .replace("{date}", &date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_template() {
        assert_eq!(
            ReminderTemplate::find("template1").map(|t| t.title),
            Some("Monthly Subscription Reminder")
        );
        assert!(ReminderTemplate::find("template9").is_none());
    }

    #[test]
    fn test_render_amount_without_trailing_zeroes() {
        let message = render_template(&REMINDER_TEMPLATES[0], "Org", 500.0, None);
        assert_eq!(
            message,
            "Org: Your monthly subscription of ₹500 is due. \
             Please arrange for payment at your earliest convenience."
        );
    }

    #[test]
    fn test_render_missing_date() {
        let message = render_template(&REMINDER_TEMPLATES[1], "Org", 500.0, None);
        assert!(message.contains("on the scheduled date"));
    }

    #[test]
    fn test_every_template_is_fully_rendered() {
        let due = NaiveDate::from_ymd_opt(2024, 2, 1);
        for template in &REMINDER_TEMPLATES {
            let message = render_template(template, "Org", 250.5, due);
            assert!(!message.contains('{'), "unrendered placeholder in {}", template.id);
        }
    }
}
