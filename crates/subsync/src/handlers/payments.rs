//! Payment handlers.
//!
//! Payments are immutable once recorded. Listings are joined with member
//! names.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use subsync_core::membership::{
    filter_payments, resolve_member_names, MonthFilter, NewPayment, PaymentMethod, PaymentRow,
};
use subsync_core::serde::deserialize_optional_string;
use subsync_core::storage::PaymentRepository;

use crate::{
    handlers::{AppError, WriteResponse},
    state::AppState,
};

/// Query parameters for listing payments.
#[derive(Debug, Default, Deserialize)]
pub struct ListPaymentsQuery {
    /// Matches member name or collector
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// `cash`, `online`, `other` or `all` (default)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub method: Option<String>,
    /// `current`, `previous` or `all` (default)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub month: Option<String>,
}

/// List payments, most recent first (GET /api/payments).
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Json<Vec<PaymentRow>> {
    let method = query.method.as_deref().and_then(PaymentMethod::parse);
    let month = query
        .month
        .as_deref()
        .and_then(MonthFilter::parse)
        .unwrap_or_default();
    let today = Utc::now().date_naive();

    let rows = state.queries.payment_rows().await;
    let filtered = filter_payments(&rows, query.search.as_deref(), method, month, today)
        .into_iter()
        .cloned()
        .collect();

    Json(filtered)
}

/// Get a single payment (GET /api/payments/{id}).
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentRow>, AppError> {
    let payment = state
        .queries
        .payment(&id)
        .await
        .ok_or_else(|| AppError::not_found("Payment", id))?;

    let members = state.queries.members().await;
    resolve_member_names(std::slice::from_ref(&payment), &members)
        .pop()
        .map(Json)
        .ok_or_else(|| AppError(anyhow::anyhow!("Join produced no row")))
}

/// Record a payment (POST /api/payments).
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<NewPayment>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(payload = ?payload, "Received create payment request");

    let id = state.queries.create_payment(&payload).await?;

    tracing::info!(
        payment_id = %id,
        member_id = %payload.member_id,
        amount = payload.amount,
        "Recorded payment"
    );
    Ok((StatusCode::CREATED, Json(WriteResponse { id })))
}
