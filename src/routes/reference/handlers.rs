use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::common::{AppState, RequestContext};
use crate::entity::{
    cruises, niskin_bottles, sample_types, sensor_inventory, ships, station_target_depths, stations,
};
use crate::error::AppResult;
use crate::identity::permissions::Permission;
use crate::reference::{
    self, DEFAULT_SEARCH_LIMIT, NewCruise, NewNiskin, NewSampleType, NewSensor, NewShip, NewStation,
    NewTargetDepth, ReferenceKind, SearchHit,
};

use super::types::{
    ActiveFlag, ListQuery, NiskinStatusUpdate, SearchQuery, SensorQuery, SensorStatusUpdate,
    StationQuery,
};

/// List ships
#[utoipa::path(
    get,
    path = "/api/ships",
    params(ListQuery),
    responses(
        (status = 200, description = "Ships", body = Vec<ships::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_ships(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ships::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::list_ships(&state.db, query.include_inactive).await?))
}

#[utoipa::path(
    get,
    path = "/api/ships/{ship_id}",
    params(("ship_id" = i32, Path, description = "Ship ID")),
    responses(
        (status = 200, description = "Ship", body = ships::Model),
        (status = 404, description = "Ship not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_ship(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(ship_id): Path<i32>,
) -> AppResult<Json<ships::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_ship(&state.db, ship_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/ships",
    request_body = NewShip,
    responses(
        (status = 201, description = "Ship created", body = ships::Model),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_ship(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewShip>,
) -> AppResult<(StatusCode, Json<ships::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_ship(&state.db, new).await?)))
}

/// List cruises
#[utoipa::path(
    get,
    path = "/api/cruises",
    params(ListQuery),
    responses(
        (status = 200, description = "Cruises", body = Vec<cruises::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_cruises(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<cruises::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::list_cruises(&state.db, query.include_inactive).await?))
}

#[utoipa::path(
    get,
    path = "/api/cruises/{cruise_id}",
    params(("cruise_id" = i32, Path, description = "Cruise ID")),
    responses(
        (status = 200, description = "Cruise", body = cruises::Model),
        (status = 404, description = "Cruise not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_cruise(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(cruise_id): Path<i32>,
) -> AppResult<Json<cruises::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_cruise(&state.db, cruise_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/cruises",
    request_body = NewCruise,
    responses(
        (status = 201, description = "Cruise created", body = cruises::Model),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_cruise(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewCruise>,
) -> AppResult<(StatusCode, Json<cruises::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_cruise(&state.db, new).await?)))
}

/// List niskin bottles
#[utoipa::path(
    get,
    path = "/api/niskins",
    params(ListQuery),
    responses(
        (status = 200, description = "Niskin bottles", body = Vec<niskin_bottles::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_niskins(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<niskin_bottles::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::list_niskins(&state.db, query.include_inactive).await?))
}

#[utoipa::path(
    get,
    path = "/api/niskins/{niskin_id}",
    params(("niskin_id" = i32, Path, description = "Niskin bottle ID")),
    responses(
        (status = 200, description = "Niskin bottle", body = niskin_bottles::Model),
        (status = 404, description = "Niskin bottle not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_niskin(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(niskin_id): Path<i32>,
) -> AppResult<Json<niskin_bottles::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_niskin(&state.db, niskin_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/niskins",
    request_body = NewNiskin,
    responses(
        (status = 201, description = "Niskin bottle created", body = niskin_bottles::Model),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_niskin(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewNiskin>,
) -> AppResult<(StatusCode, Json<niskin_bottles::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_niskin(&state.db, new).await?)))
}

/// List sample types
#[utoipa::path(
    get,
    path = "/api/sample-types",
    params(ListQuery),
    responses(
        (status = 200, description = "Sample types", body = Vec<sample_types::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_sample_types(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<sample_types::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::list_sample_types(&state.db, query.include_inactive).await?))
}

#[utoipa::path(
    get,
    path = "/api/sample-types/{sample_type_id}",
    params(("sample_type_id" = i32, Path, description = "Sample type ID")),
    responses(
        (status = 200, description = "Sample type", body = sample_types::Model),
        (status = 404, description = "Sample type not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_sample_type(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(sample_type_id): Path<i32>,
) -> AppResult<Json<sample_types::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_sample_type(&state.db, sample_type_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/sample-types",
    request_body = NewSampleType,
    responses(
        (status = 201, description = "Sample type created", body = sample_types::Model),
        (status = 422, description = "Invalid input"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_sample_type(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewSampleType>,
) -> AppResult<(StatusCode, Json<sample_types::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_sample_type(&state.db, new).await?)))
}

/// List stations, optionally of one cruise
#[utoipa::path(
    get,
    path = "/api/stations",
    params(StationQuery),
    responses(
        (status = 200, description = "Stations", body = Vec<stations::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_stations(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<StationQuery>,
) -> AppResult<Json<Vec<stations::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(
        reference::list_stations(&state.db, query.cruise_id, query.include_inactive).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/stations/{station_id}",
    params(("station_id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station", body = stations::Model),
        (status = 404, description = "Station not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_station(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(station_id): Path<i32>,
) -> AppResult<Json<stations::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_station(&state.db, station_id).await?))
}

/// Create a station within a cruise
#[utoipa::path(
    post,
    path = "/api/stations",
    request_body = NewStation,
    responses(
        (status = 201, description = "Station created", body = stations::Model),
        (status = 404, description = "Cruise not found"),
        (status = 422, description = "Invalid input or duplicate station number"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_station(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewStation>,
) -> AppResult<(StatusCode, Json<stations::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_station(&state.db, new).await?)))
}

/// Planned sampling depths of a station, in firing order
#[utoipa::path(
    get,
    path = "/api/stations/{station_id}/target-depths",
    params(("station_id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Target depths", body = Vec<station_target_depths::Model>),
        (status = 404, description = "Station not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_target_depths(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(station_id): Path<i32>,
) -> AppResult<Json<Vec<station_target_depths::Model>>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::list_target_depths(&state.db, station_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/stations/{station_id}/target-depths",
    params(("station_id" = i32, Path, description = "Station ID")),
    request_body = NewTargetDepth,
    responses(
        (status = 201, description = "Target depth added", body = station_target_depths::Model),
        (status = 404, description = "Station not found"),
        (status = 422, description = "Invalid input or duplicate sequence"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn add_target_depth(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(station_id): Path<i32>,
    Json(new): Json<NewTargetDepth>,
) -> AppResult<(StatusCode, Json<station_target_depths::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    let depth = reference::add_target_depth(&state.db, station_id, new).await?;
    Ok((StatusCode::CREATED, Json(depth)))
}

/// List CTD sensors
#[utoipa::path(
    get,
    path = "/api/sensors",
    params(SensorQuery),
    responses(
        (status = 200, description = "Sensors", body = Vec<sensor_inventory::Model>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn list_sensors(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<SensorQuery>,
) -> AppResult<Json<Vec<sensor_inventory::Model>>> {
    ctx.require(Permission::ViewData)?;
    let sensors = if query.available {
        reference::list_available_sensors(&state.db).await?
    } else {
        reference::list_sensors(&state.db, query.include_inactive).await?
    };
    Ok(Json(sensors))
}

#[utoipa::path(
    get,
    path = "/api/sensors/{sensor_id}",
    params(("sensor_id" = i32, Path, description = "Sensor ID")),
    responses(
        (status = 200, description = "Sensor", body = sensor_inventory::Model),
        (status = 404, description = "Sensor not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn get_sensor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(sensor_id): Path<i32>,
) -> AppResult<Json<sensor_inventory::Model>> {
    ctx.require(Permission::ViewData)?;
    Ok(Json(reference::get_sensor(&state.db, sensor_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/sensors",
    request_body = NewSensor,
    responses(
        (status = 201, description = "Sensor registered", body = sensor_inventory::Model),
        (status = 422, description = "Invalid input or duplicate VIN"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn create_sensor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewSensor>,
) -> AppResult<(StatusCode, Json<sensor_inventory::Model>)> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok((StatusCode::CREATED, Json(reference::create_sensor(&state.db, new).await?)))
}

#[utoipa::path(
    put,
    path = "/api/sensors/{sensor_id}/status",
    params(("sensor_id" = i32, Path, description = "Sensor ID")),
    request_body = SensorStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = sensor_inventory::Model),
        (status = 404, description = "Sensor not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn set_sensor_status(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(sensor_id): Path<i32>,
    Json(update): Json<SensorStatusUpdate>,
) -> AppResult<Json<sensor_inventory::Model>> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok(Json(reference::set_sensor_status(&state.db, sensor_id, update.status).await?))
}

#[utoipa::path(
    put,
    path = "/api/niskins/{niskin_id}/status",
    params(("niskin_id" = i32, Path, description = "Niskin bottle ID")),
    request_body = NiskinStatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = niskin_bottles::Model),
        (status = 404, description = "Niskin bottle not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn set_niskin_status(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(niskin_id): Path<i32>,
    Json(update): Json<NiskinStatusUpdate>,
) -> AppResult<Json<niskin_bottles::Model>> {
    ctx.require(Permission::ManageReferenceData)?;
    Ok(Json(reference::set_niskin_status(&state.db, niskin_id, update.status).await?))
}

/// Retire or reinstate a reference row
#[utoipa::path(
    put,
    path = "/api/reference/{kind}/{id}/active",
    params(
        ("kind" = ReferenceKind, Path, description = "ships, cruises, stations, sensors, niskins or sample-types"),
        ("id" = i32, Path, description = "Row ID"),
    ),
    request_body = ActiveFlag,
    responses(
        (status = 204, description = "Flag updated"),
        (status = 404, description = "Row not found"),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn set_active(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((kind, id)): Path<(ReferenceKind, i32)>,
    Json(flag): Json<ActiveFlag>,
) -> AppResult<StatusCode> {
    ctx.require(Permission::ManageReferenceData)?;
    reference::set_active(&state.db, kind, id, flag.active).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Substring search over users, ships, cruises, stations or cast notes
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matches", body = Vec<SearchHit>),
    ),
    security(("bearer" = [])),
    tag = "reference"
)]
pub async fn search(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<SearchHit>>> {
    ctx.require(Permission::ViewData)?;
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(reference::search(&state.db, query.target, &query.q, limit).await?))
}
