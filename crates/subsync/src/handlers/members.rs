//! Member CRUD handlers.
//!
//! Reads go through the query cache and never fail; writes go through its
//! write-through repository so the members query is invalidated on success.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use subsync_core::membership::{filter_members, Member, MemberStatus, MemberUpdate, NewMember};
use subsync_core::serde::deserialize_optional_string;
use subsync_core::storage::MemberRepository;

use crate::{
    handlers::{AppError, WriteResponse},
    state::AppState,
};

/// Query parameters for listing members.
#[derive(Debug, Default, Deserialize)]
pub struct ListMembersQuery {
    /// Matches name, phone or address
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// `active`, `inactive` or `all` (default)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
}

/// List members (GET /api/members).
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> Json<Vec<Member>> {
    let status = query.status.as_deref().and_then(MemberStatus::parse);
    let members = state.queries.members().await;

    let filtered = filter_members(&members, query.search.as_deref(), status)
        .into_iter()
        .cloned()
        .collect();

    Json(filtered)
}

/// Get a single member (GET /api/members/{id}).
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    state
        .queries
        .member(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Member", id))
}

/// Create a member (POST /api/members).
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<NewMember>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(payload = ?payload, "Received create member request");

    let id = state.queries.create_member(&payload).await?;

    tracing::info!(member_id = %id, name = %payload.name, "Created new member");
    Ok((StatusCode::CREATED, Json(WriteResponse { id })))
}

/// Update a member (PATCH /api/members/{id}).
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MemberUpdate>,
) -> Result<impl IntoResponse, AppError> {
    state.queries.update_member(&id, &payload).await?;

    tracing::info!(member_id = %id, "Updated member");
    Ok(Json(WriteResponse { id }))
}

/// Delete a member (DELETE /api/members/{id}).
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.queries.delete_member(&id).await?;

    tracing::info!(member_id = %id, "Deleted member");
    Ok(StatusCode::NO_CONTENT)
}
