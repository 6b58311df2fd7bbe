use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::cast::{self, AttachSensor, AttachedSensor, CastDeletion, CastDetail, CastSummary};
use crate::common::{AppState, RequestContext};
use crate::error::AppResult;
use crate::identity::permissions::Permission;

use super::types::{CreateCastRequest, RecentQuery};

/// Most recent casts, newest first
#[utoipa::path(
    get,
    path = "/api/casts",
    params(RecentQuery),
    responses(
        (status = 200, description = "Casts", body = Vec<CastSummary>),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn list_casts(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<CastSummary>>> {
    ctx.require(Permission::ViewData)?;
    let limit = query.limit.unwrap_or(state.config.recent_casts_limit);
    Ok(Json(cast::list_recent_casts(&state.db, limit).await?))
}

/// Open a new cast log
#[utoipa::path(
    post,
    path = "/api/casts",
    request_body = CreateCastRequest,
    responses(
        (status = 201, description = "Cast created", body = CastSummary),
        (status = 404, description = "Ship, station, cruise or observer not found"),
        (status = 422, description = "Invalid input or station outside the cruise"),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn create_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateCastRequest>,
) -> AppResult<(StatusCode, Json<CastSummary>)> {
    ctx.require(Permission::CreateCast)?;
    let created = cast::create_cast(&state.db, request.into_new_cast(ctx.user_id())).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Full cast log: every phase recorded so far and the derived state
#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Cast", body = CastDetail),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn get_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<CastDetail>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(cast::get_cast(&state.db, cast_id).await?))
}

/// Delete a cast and everything recorded against it
#[utoipa::path(
    delete,
    path = "/api/casts/{cast_id}",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Cast deleted", body = CastDeletion),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn delete_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<CastDeletion>> {
    ctx.require(Permission::DeleteCast)?;
    let deleted = cast::delete_cast(&state.db, cast_id).await?;
    tracing::info!(cast_id, deleted_by = ctx.user_id(), ?deleted, "cast_deleted");
    Ok(Json(deleted))
}

/// Sensors mounted on the package for this cast
#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}/sensors",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Attached sensors", body = Vec<AttachedSensor>),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn list_cast_sensors(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<Vec<AttachedSensor>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(cast::list_cast_sensors(&state.db, cast_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/casts/{cast_id}/sensors",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = AttachSensor,
    responses(
        (status = 201, description = "Sensor attached", body = AttachedSensor),
        (status = 404, description = "Cast or sensor not found"),
        (status = 422, description = "Invalid position"),
    ),
    security(("bearer" = [])),
    tag = "casts"
)]
pub async fn attach_sensor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<AttachSensor>,
) -> AppResult<(StatusCode, Json<AttachedSensor>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let attached = cast::attach_sensor(&state.db, cast_id, input).await?;
    Ok((StatusCode::CREATED, Json(attached)))
}
