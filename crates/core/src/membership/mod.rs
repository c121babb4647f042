mod error;
mod join;
mod mock_data;
mod operations;
mod requests;
mod summary;
mod templates;
mod types;

pub use error::MembershipError;
pub use join::{
    resolve_member_names, MemberIndex, MemberOwned, PaymentRow, ReminderRow, Resolved,
    UNKNOWN_MEMBER,
};
pub use mock_data::{sample_members, sample_payments, sample_reminders};
pub use operations::{
    filter_members, filter_payments, sort_members_by_name, sort_payments_by_date,
    sort_reminders_by_created, validate_member_update, validate_new_member, validate_new_payment,
    validate_new_reminder, MonthFilter,
};
pub use requests::{MemberUpdate, NewMember, NewPayment, NewReminder, DEFAULT_SUBSCRIPTION_AMOUNT};
pub use summary::{
    collection_summary, monthly_stats, recent_members, recent_payments, CollectionSummary,
    MonthlyStats,
};
pub use templates::{render_template, ReminderTemplate, REMINDER_TEMPLATES};
pub use types::{Member, MemberStatus, Payment, PaymentMethod, Reminder, ReminderStatus};
