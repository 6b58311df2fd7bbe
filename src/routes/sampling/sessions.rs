use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::common::{AppState, RequestContext};
use crate::entity::sampling_session;
use crate::error::AppResult;
use crate::identity::permissions::Permission;
use crate::sampling::session::is_overdue;
use crate::sampling::{self, CloseSession, NewSampleTiming, OpenSession, TimingStatus};

#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}/sessions",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Sampling sessions", body = Vec<sampling_session::Model>),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "sessions"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<Vec<sampling_session::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::list_sessions(&state.db, cast_id).await?))
}

/// Start drawing samples once the package is on deck
#[utoipa::path(
    post,
    path = "/api/casts/{cast_id}/sessions",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = OpenSession,
    responses(
        (status = 201, description = "Session opened", body = sampling_session::Model),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "No on-deck record yet"),
    ),
    security(("bearer" = [])),
    tag = "sessions"
)]
pub async fn open_session(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<OpenSession>,
) -> AppResult<(StatusCode, Json<sampling_session::Model>)> {
    ctx.require(Permission::ManageSamplingSessions)?;
    let session = sampling::open_session(&state.db, cast_id, input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

#[utoipa::path(
    put,
    path = "/api/sessions/{session_id}/close",
    params(("session_id" = i32, Path, description = "Session ID")),
    request_body = CloseSession,
    responses(
        (status = 200, description = "Session closed", body = sampling_session::Model),
        (status = 404, description = "Session not found"),
        (status = 422, description = "End before start"),
    ),
    security(("bearer" = [])),
    tag = "sessions"
)]
pub async fn close_session(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<i32>,
    Json(input): Json<CloseSession>,
) -> AppResult<Json<sampling_session::Model>> {
    ctx.require(Permission::ManageSamplingSessions)?;
    Ok(Json(sampling::close_session(&state.db, session_id, input).await?))
}

/// Processing deadlines, earliest first
#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}/timings",
    params(("session_id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Deadlines", body = Vec<TimingStatus>),
        (status = 404, description = "Session not found"),
    ),
    security(("bearer" = [])),
    tag = "sessions"
)]
pub async fn list_timings(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<i32>,
) -> AppResult<Json<Vec<TimingStatus>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::list_timings(&state.db, session_id).await?))
}

/// Set how long a sample type may wait before processing
#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/timings",
    params(("session_id" = i32, Path, description = "Session ID")),
    request_body = NewSampleTiming,
    responses(
        (status = 201, description = "Deadline set", body = TimingStatus),
        (status = 404, description = "Session or sample type not found"),
        (status = 422, description = "Invalid time limit"),
    ),
    security(("bearer" = [])),
    tag = "sessions"
)]
pub async fn set_timing(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(session_id): Path<i32>,
    Json(input): Json<NewSampleTiming>,
) -> AppResult<(StatusCode, Json<TimingStatus>)> {
    ctx.require(Permission::ManageSamplingSessions)?;
    let timing = sampling::set_sample_timing(&state.db, session_id, ctx.user_id(), input).await?;
    let overdue = is_overdue(&timing, Utc::now());
    Ok((StatusCode::CREATED, Json(TimingStatus { timing, overdue })))
}
