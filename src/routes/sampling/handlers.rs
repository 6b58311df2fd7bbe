use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::common::{AppState, RequestContext};
use crate::entity::{bottle_replacements, bottles, sample_pressure};
use crate::error::{AppError, AppResult};
use crate::identity::permissions::Permission;
use crate::sampling::{self, BottleDetail, BottleReplacementInput, CaptureSummaryRow, NewBottle, SampleCaptureInput};

use super::types::{BottleStatusUpdate, SummaryQuery};

/// Query parameter first, then the Accept header.
fn wants_csv(format: Option<&str>, headers: &HeaderMap) -> bool {
    if let Some(format) = format {
        return format.eq_ignore_ascii_case("csv");
    }

    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("text/csv"))
}

/// Every Niskin firing recorded on the cast, oldest first
#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}/samples",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Sample pressures", body = Vec<sample_pressure::Model>),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "sampling"
)]
pub async fn list_samples(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<Vec<sample_pressure::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::list_sample_captures(&state.db, cast_id).await?))
}

/// Record the pressure at which a Niskin closed
#[utoipa::path(
    post,
    path = "/api/casts/{cast_id}/samples",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    request_body = SampleCaptureInput,
    responses(
        (status = 201, description = "Capture recorded", body = sample_pressure::Model),
        (status = 404, description = "Cast, Niskin or target depth not found"),
        (status = 422, description = "Invalid pressure or target depth of another station"),
    ),
    security(("bearer" = [])),
    tag = "sampling"
)]
pub async fn record_sample(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Json(input): Json<SampleCaptureInput>,
) -> AppResult<(StatusCode, Json<sample_pressure::Model>)> {
    ctx.require(Permission::RecordSamples)?;
    let capture = sampling::record_sample_capture(&state.db, cast_id, input).await?;
    Ok((StatusCode::CREATED, Json(capture)))
}

/// Target versus actual pressure per capture
///
/// JSON by default; CSV with `?format=csv` or `Accept: text/csv`.
#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}/capture-summary",
    params(
        ("cast_id" = i32, Path, description = "Cast ID"),
        SummaryQuery
    ),
    responses(
        (status = 200, description = "Capture summary", body = Vec<CaptureSummaryRow>),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "sampling"
)]
pub async fn capture_summary(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
    Query(query): Query<SummaryQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    ctx.require(Permission::ViewData)?;
    let rows = sampling::capture_summary(&state.db, cast_id).await?;

    if !wants_csv(query.format.as_deref(), &headers) {
        return Ok(Json(rows).into_response());
    }

    let body = sampling::capture_summary_csv(&rows)?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"cast-{cast_id}-captures.csv\""))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Bottles filled from Niskins fired on this cast
#[utoipa::path(
    get,
    path = "/api/casts/{cast_id}/bottles",
    params(("cast_id" = i32, Path, description = "Cast ID")),
    responses(
        (status = 200, description = "Bottles", body = Vec<BottleDetail>),
        (status = 404, description = "Cast not found"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn bottles_for_cast(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cast_id): Path<i32>,
) -> AppResult<Json<Vec<BottleDetail>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::bottles_for_cast(&state.db, cast_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/bottles/{bottle_id}",
    params(("bottle_id" = i32, Path, description = "Bottle ID")),
    responses(
        (status = 200, description = "Bottle", body = bottles::Model),
        (status = 404, description = "Bottle not found"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn get_bottle(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(bottle_id): Path<i32>,
) -> AppResult<Json<bottles::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::get_bottle(&state.db, bottle_id).await?))
}

/// Label a new, empty sample bottle
#[utoipa::path(
    post,
    path = "/api/bottles",
    request_body = NewBottle,
    responses(
        (status = 201, description = "Bottle created", body = bottles::Model),
        (status = 404, description = "Niskin or sample type not found"),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn create_bottle(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewBottle>,
) -> AppResult<(StatusCode, Json<bottles::Model>)> {
    ctx.require(Permission::ManageBottles)?;
    Ok((StatusCode::CREATED, Json(sampling::create_bottle(&state.db, new).await?)))
}

/// Move a bottle one step along empty, filled, processed, archived
#[utoipa::path(
    put,
    path = "/api/bottles/{bottle_id}/status",
    params(("bottle_id" = i32, Path, description = "Bottle ID")),
    request_body = BottleStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = bottles::Model),
        (status = 404, description = "Bottle not found"),
        (status = 422, description = "Skipped or reversed status"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn update_bottle_status(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(bottle_id): Path<i32>,
    Json(update): Json<BottleStatusUpdate>,
) -> AppResult<Json<bottles::Model>> {
    ctx.require(Permission::ManageBottles)?;
    Ok(Json(sampling::update_bottle_status(&state.db, bottle_id, update.status).await?))
}

/// Record that another bottle stands in for this one
#[utoipa::path(
    post,
    path = "/api/bottles/{bottle_id}/replacements",
    params(("bottle_id" = i32, Path, description = "Original bottle ID")),
    request_body = BottleReplacementInput,
    responses(
        (status = 201, description = "Replacement recorded", body = bottle_replacements::Model),
        (status = 404, description = "Bottle not found"),
        (status = 422, description = "Bottle replaced by itself"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn replace_bottle(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(bottle_id): Path<i32>,
    Json(input): Json<BottleReplacementInput>,
) -> AppResult<(StatusCode, Json<bottle_replacements::Model>)> {
    ctx.require(Permission::ManageBottles)?;
    let replacement = sampling::replace_bottle(&state.db, bottle_id, input).await?;
    Ok((StatusCode::CREATED, Json(replacement)))
}

#[utoipa::path(
    get,
    path = "/api/bottles/{bottle_id}/replacements",
    params(("bottle_id" = i32, Path, description = "Bottle ID")),
    responses(
        (status = 200, description = "Replacements involving the bottle", body = Vec<bottle_replacements::Model>),
        (status = 404, description = "Bottle not found"),
    ),
    security(("bearer" = [])),
    tag = "bottles"
)]
pub async fn list_replacements(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(bottle_id): Path<i32>,
) -> AppResult<Json<Vec<bottle_replacements::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(sampling::list_replacements(&state.db, bottle_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parameter_beats_accept_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/csv"));

        assert!(wants_csv(None, &headers));
        assert!(wants_csv(Some("CSV"), &HeaderMap::new()));
        assert!(!wants_csv(Some("json"), &headers));
        assert!(!wants_csv(None, &HeaderMap::new()));
    }
}
