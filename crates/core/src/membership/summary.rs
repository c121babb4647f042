//! Dashboard summary computation.
//!
//! Pending amounts are derived per active member: what their monthly
//! subscription asks for minus what they paid in that month, never below zero.
//! Members only owe for months they had already joined by.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use super::join::PaymentRow;
use super::types::{Member, Payment};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub total_members: usize,
    pub active_members: usize,
    pub collected_this_month: f64,
    pub pending_this_month: f64,
    pub total_collected_yearly: f64,
}

/// Collected and pending totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    /// Short month name, e.g. `"Jan"`.
    pub month: String,
    pub collected: f64,
    pub pending: f64,
}

/// Computes the dashboard headline figures as of `today`.
pub fn collection_summary(
    members: &[Member],
    payments: &[Payment],
    today: NaiveDate,
) -> CollectionSummary {
    let (year, month) = (today.year(), today.month());
    CollectionSummary {
        total_members: members.len(),
        active_members: members.iter().filter(|m| m.status.is_active()).count(),
        collected_this_month: collected_in(payments, year, month),
        pending_this_month: pending_in(members, payments, year, month),
        total_collected_yearly: payments
            .iter()
            .filter(|p| p.date.year() == year)
            .map(|p| p.amount)
            .sum(),
    }
}

/// Computes per-month totals for the `months` months ending with the month
/// of `today`, oldest first.
pub fn monthly_stats(
    members: &[Member],
    payments: &[Payment],
    today: NaiveDate,
    months: u8,
) -> Vec<MonthlyStats> {
    (0..months)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(today.year(), today.month(), -i32::from(back));
            MonthlyStats {
                month: month_label(year, month),
                collected: collected_in(payments, year, month),
                pending: pending_in(members, payments, year, month),
            }
        })
        .collect()
}

/// Returns up to `limit` members, most recently joined first.
pub fn recent_members(members: &[Member], limit: usize) -> Vec<&Member> {
    let mut recent: Vec<&Member> = members.iter().collect();
    recent.sort_by(|a, b| b.join_date.cmp(&a.join_date));
    recent.truncate(limit);
    recent
}

/// Returns up to `limit` payment rows, most recent date first.
pub fn recent_payments(rows: &[PaymentRow], limit: usize) -> Vec<&PaymentRow> {
    let mut recent: Vec<&PaymentRow> = rows.iter().collect();
    recent.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    recent.truncate(limit);
    recent
}

fn in_month(date: DateTime<Utc>, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

fn collected_in(payments: &[Payment], year: i32, month: u32) -> f64 {
    payments
        .iter()
        .filter(|p| in_month(p.date, year, month))
        .map(|p| p.amount)
        .sum()
}

fn pending_in(members: &[Member], payments: &[Payment], year: i32, month: u32) -> f64 {
    let mut paid: HashMap<&str, f64> = HashMap::new();
    for payment in payments.iter().filter(|p| in_month(p.date, year, month)) {
        *paid.entry(payment.member_id.as_str()).or_default() += payment.amount;
    }

    let (next_year, next_month) = shift_month(year, month, 1);
    let Some(month_end) = NaiveDate::from_ymd_opt(next_year, next_month, 1) else {
        return 0.0;
    };

    members
        .iter()
        .filter(|m| m.status.is_active() && m.join_date.date_naive() < month_end)
        .map(|m| {
            let paid = paid.get(m.id.as_str()).copied().unwrap_or(0.0);
            (m.subscription_amount - paid).max(0.0)
        })
        .sum()
}

fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 + offset;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}
