//! Dashboard summary handler.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use subsync_core::membership::{
    collection_summary, monthly_stats, recent_members, recent_payments, resolve_member_names,
    CollectionSummary, Member, MonthlyStats, PaymentRow,
};

use crate::state::AppState;

const RECENT_LIMIT: usize = 5;
const MAX_MONTHS: u8 = 24;

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Number of months of stats, ending with the current month (default: 6)
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_months() -> u32 {
    6
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub summary: CollectionSummary,
    pub monthly_stats: Vec<MonthlyStats>,
    pub recent_members: Vec<Member>,
    pub recent_payments: Vec<PaymentRow>,
}

/// Dashboard figures (GET /api/dashboard).
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardResponse> {
    let today = Utc::now().date_naive();
    let months = u8::try_from(query.months)
        .unwrap_or(MAX_MONTHS)
        .clamp(1, MAX_MONTHS);

    let (members, payments) = tokio::join!(state.queries.members(), state.queries.payments());
    let rows = resolve_member_names(&payments, &members);

    Json(DashboardResponse {
        summary: collection_summary(&members, &payments, today),
        monthly_stats: monthly_stats(&members, &payments, today, months),
        recent_members: recent_members(&members, RECENT_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        recent_payments: recent_payments(&rows, RECENT_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    })
}
