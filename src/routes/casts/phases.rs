//! One `PUT` per cast phase. Each replaces the whole phase record.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::cast::{
    self, AtDepthInput, BeginningPositionInput, BottomDepthInput, CaptureStartInput, EndingPositionInput,
    OnDeckInput, PhaseSaved, PostCastInput, PreCastInput,
};
use crate::common::{AppState, RequestContext};
use crate::entity::{
    at_depth_position, beginning_position, bottom_depth_position, capture_start, ending_position,
    on_deck_position, post_cast, pre_cast,
};
use crate::error::AppResult;
use crate::identity::permissions::Permission;

fn with_warnings<T>(mut ctx: RequestContext, saved: PhaseSaved<T>) -> (HeaderMap, Json<PhaseSaved<T>>) {
    ctx.extend_notices(saved.warnings.iter().cloned());
    (ctx.notice_headers(), Json(saved))
}

/// Pre-cast checks
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/pre-cast",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = PreCastInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<pre_cast::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_pre_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<PreCastInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<pre_cast::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_pre_cast(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Position when the package enters the water
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/beginning",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = BeginningPositionInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<beginning_position::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_beginning_position(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<BeginningPositionInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<beginning_position::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_beginning_position(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Position once the package reaches soak depth
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/at-depth",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = AtDepthInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<at_depth_position::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_at_depth(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<AtDepthInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<at_depth_position::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_at_depth(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Start of data capture
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/capture-start",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = CaptureStartInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<capture_start::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_capture_start(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<CaptureStartInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<capture_start::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_capture_start(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Deepest point of the cast
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/bottom-depth",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = BottomDepthInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<bottom_depth_position::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_bottom_depth(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<BottomDepthInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<bottom_depth_position::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_bottom_depth(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Position when the package leaves the water
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/ending",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = EndingPositionInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<ending_position::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_ending_position(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<EndingPositionInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<ending_position::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_ending_position(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Package back on deck
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/on-deck",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = OnDeckInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<on_deck_position::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_on_deck(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<OnDeckInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<on_deck_position::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_on_deck(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}

/// Post-cast checklist
#[utoipa::path(
    put,
    path = "/api/casts/{cast_id}/phases/post-cast",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = PostCastInput,
    responses(
        (status = 200, description = "Record saved; out-of-order warnings in body and x-notice headers", body = PhaseSaved<post_cast::Model>),
        (status = 404, description = "Cast not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "phases"
)]
pub async fn save_post_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<PostCastInput>,
) -> AppResult<(HeaderMap, Json<PhaseSaved<post_cast::Model>>)> {
    ctx.require(Permission::RecordCastPhases)?;
    let saved = cast::save_post_cast(&state.db, cast_id, input).await?;
    Ok(with_warnings(ctx, saved))
}
