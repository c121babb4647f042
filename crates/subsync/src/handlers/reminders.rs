//! Reminder handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use subsync_core::document::DateInput;
use subsync_core::membership::{
    render_template, resolve_member_names, NewReminder, ReminderRow,
    DEFAULT_SUBSCRIPTION_AMOUNT, REMINDER_TEMPLATES,
};
use subsync_core::serde::deserialize_optional_string;
use subsync_core::storage::ReminderRepository;

use crate::{
    handlers::{AppError, WriteResponse},
    state::AppState,
};

/// List reminders, most recently created first (GET /api/reminders).
pub async fn list_reminders(State(state): State<AppState>) -> Json<Vec<ReminderRow>> {
    Json(state.queries.reminder_rows().await)
}

/// Get a single reminder (GET /api/reminders/{id}).
pub async fn get_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReminderRow>, AppError> {
    let reminder = state
        .queries
        .reminder(&id)
        .await
        .ok_or_else(|| AppError::not_found("Reminder", id))?;

    let members = state.queries.members().await;
    resolve_member_names(std::slice::from_ref(&reminder), &members)
        .pop()
        .map(Json)
        .ok_or_else(|| AppError(anyhow::anyhow!("Join produced no row")))
}

/// Send a reminder (POST /api/reminders).
pub async fn create_reminder(
    State(state): State<AppState>,
    Json(payload): Json<NewReminder>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(payload = ?payload, "Received create reminder request");

    let id = state.queries.create_reminder(&payload).await?;

    tracing::info!(reminder_id = %id, member_id = %payload.member_id, "Sent reminder");
    Ok((StatusCode::CREATED, Json(WriteResponse { id })))
}

/// Query parameters for rendering templates.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesQuery {
    /// Member whose subscription amount fills `{amount}`
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub member_id: Option<String>,
    /// Fills `{date}`
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub due_date: Option<String>,
}

/// A reminder template with its rendered message.
#[derive(Debug, Serialize)]
pub struct RenderedTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub message: String,
}

/// List reminder templates rendered for a member (GET /api/reminders/templates).
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> Json<Vec<RenderedTemplate>> {
    let amount = match query.member_id.as_deref() {
        Some(member_id) => state
            .queries
            .member(member_id)
            .await
            .map_or(DEFAULT_SUBSCRIPTION_AMOUNT, |m| m.subscription_amount),
        None => DEFAULT_SUBSCRIPTION_AMOUNT,
    };
    let due_date = query.due_date.and_then(parse_due_date);

    let templates = REMINDER_TEMPLATES
        .iter()
        .map(|template| RenderedTemplate {
            id: template.id,
            title: template.title,
            content: template.content,
            message: render_template(template, &state.organization_name, amount, due_date),
        })
        .collect();

    Json(templates)
}

fn parse_due_date(text: String) -> Option<NaiveDate> {
    DateInput::Text(text)
        .parse()
        .ok()
        .map(|date| date.date_naive())
}
