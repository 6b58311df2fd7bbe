//! The CTD cast aggregate.

pub mod phases;
pub mod state;

pub use phases::*;
pub use state::{CastState, Progress, Stage};

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    at_depth_position, beginning_position, bottom_depth_position, capture_start, cast_sensors, cruises,
    ctd_cast_log, ending_position, on_deck_position, post_cast, pre_cast, sample_pressure, sample_timing,
    sampling_session, sensor_inventory, ships, stations, users,
};
use crate::error::{AppError, AppResult};
use crate::reference;
use crate::validation::{optional_positive, optional_text, positive};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCast {
    pub ship_id: i32,
    pub station_id: i32,
    pub cruise_id: i32,
    pub observer_user_id: i32,
    pub cast_number: i32,
    /// Defaults to today (UTC)
    pub cast_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// A cast with the names of everything it references.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CastSummary {
    pub ctd_cast_log_id: i32,
    pub cast_number: i32,
    pub cast_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub ship_id: i32,
    pub ship_name: String,
    pub station_id: i32,
    pub station_name: String,
    pub station_number: String,
    pub cruise_id: i32,
    pub cruise_name: String,
    pub observer_user_id: i32,
    pub observer_name: String,
    pub notes: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct CastRow {
    ctd_cast_log_id: i32,
    cast_number: i32,
    cast_date: NaiveDate,
    created_at: DateTime<Utc>,
    ship_id: i32,
    station_id: i32,
    cruise_id: i32,
    observer_user_id: i32,
    notes: Option<String>,
    ship_name: String,
    station_name: String,
    station_number: String,
    cruise_name: String,
    observer_first_name: String,
    observer_last_name: String,
}

impl From<CastRow> for CastSummary {
    fn from(row: CastRow) -> Self {
        Self {
            ctd_cast_log_id: row.ctd_cast_log_id,
            cast_number: row.cast_number,
            cast_date: row.cast_date,
            created_at: row.created_at,
            ship_id: row.ship_id,
            ship_name: row.ship_name,
            station_id: row.station_id,
            station_name: row.station_name,
            station_number: row.station_number,
            cruise_id: row.cruise_id,
            cruise_name: row.cruise_name,
            observer_user_id: row.observer_user_id,
            observer_name: format!("{} {}", row.observer_first_name, row.observer_last_name),
            notes: row.notes,
        }
    }
}

/// Every phase record present for a cast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct CastPhases {
    pub pre_cast: Option<pre_cast::Model>,
    pub beginning_position: Option<beginning_position::Model>,
    pub at_depth_position: Option<at_depth_position::Model>,
    pub capture_start: Option<capture_start::Model>,
    pub bottom_depth_position: Option<bottom_depth_position::Model>,
    pub ending_position: Option<ending_position::Model>,
    pub on_deck_position: Option<on_deck_position::Model>,
    pub post_cast: Option<post_cast::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttachedSensor {
    pub cast_sensor_id: i32,
    pub sensor_id: i32,
    pub sensor_type: String,
    pub vin_number: Option<String>,
    pub position_order: i32,
    pub sequence_number: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CastDetail {
    #[serde(flatten)]
    pub summary: CastSummary,
    pub state: CastState,
    pub next_stage: Option<Stage>,
    pub phases: CastPhases,
    pub sensors: Vec<AttachedSensor>,
    pub sample_count: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttachSensor {
    pub sensor_id: i32,
    pub position_order: i32,
    pub sequence_number: Option<i32>,
    pub notes: Option<String>,
}

/// Rows removed by a cast deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CastDeletion {
    pub phase_records: u64,
    pub sample_pressures: u64,
    pub sampling_sessions: u64,
    pub sample_timings: u64,
    pub sensors: u64,
}

pub async fn find_cast<C: ConnectionTrait>(db: &C, cast_id: i32) -> AppResult<ctd_cast_log::Model> {
    ctd_cast_log::Entity::find_by_id(cast_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cast {cast_id} not found")))
}

fn summary_query() -> Select<ctd_cast_log::Entity> {
    ctd_cast_log::Entity::find()
        .select_only()
        .columns([
            ctd_cast_log::Column::CtdCastLogId,
            ctd_cast_log::Column::CastNumber,
            ctd_cast_log::Column::CastDate,
            ctd_cast_log::Column::CreatedAt,
            ctd_cast_log::Column::ShipId,
            ctd_cast_log::Column::StationId,
            ctd_cast_log::Column::CruiseId,
            ctd_cast_log::Column::ObserverUserId,
            ctd_cast_log::Column::Notes,
        ])
        .column(ships::Column::ShipName)
        .column(stations::Column::StationName)
        .column(stations::Column::StationNumber)
        .column(cruises::Column::CruiseName)
        .column_as(users::Column::FirstName, "observer_first_name")
        .column_as(users::Column::LastName, "observer_last_name")
        .join(JoinType::InnerJoin, ctd_cast_log::Relation::Ship.def())
        .join(JoinType::InnerJoin, ctd_cast_log::Relation::Station.def())
        .join(JoinType::InnerJoin, ctd_cast_log::Relation::Cruise.def())
        .join(JoinType::InnerJoin, ctd_cast_log::Relation::Observer.def())
}

pub async fn create_cast(db: &DatabaseConnection, new: NewCast) -> AppResult<CastSummary> {
    let cast_number = positive("cast_number", new.cast_number)?;

    reference::get_ship(db, new.ship_id).await?;
    let cruise = reference::get_cruise(db, new.cruise_id).await?;
    let station = reference::get_station(db, new.station_id).await?;
    users::Entity::find_by_id(new.observer_user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", new.observer_user_id)))?;

    if station.cruise_id != cruise.cruise_id {
        return Err(AppError::invalid(
            "station_id",
            format!(
                "station {} belongs to a different cruise than {}",
                station.station_number, cruise.cruise_name
            ),
        ));
    }

    let now = Utc::now();
    let cast = ctd_cast_log::ActiveModel {
        ship_id: Set(new.ship_id),
        station_id: Set(new.station_id),
        cruise_id: Set(new.cruise_id),
        observer_user_id: Set(new.observer_user_id),
        cast_number: Set(cast_number),
        cast_date: Set(new.cast_date.unwrap_or_else(|| now.date_naive())),
        notes: Set(optional_text(new.notes)),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        cast_id = cast.ctd_cast_log_id,
        cast_number,
        station_id = cast.station_id,
        observer_user_id = cast.observer_user_id,
        "cast_created"
    );
    get_cast_summary(db, cast.ctd_cast_log_id).await
}

pub async fn get_cast_summary(db: &DatabaseConnection, cast_id: i32) -> AppResult<CastSummary> {
    summary_query()
        .filter(ctd_cast_log::Column::CtdCastLogId.eq(cast_id))
        .into_model::<CastRow>()
        .one(db)
        .await?
        .map(CastSummary::from)
        .ok_or_else(|| AppError::not_found(format!("Cast {cast_id} not found")))
}

/// Newest casts first.
pub async fn list_recent_casts(db: &DatabaseConnection, limit: u64) -> AppResult<Vec<CastSummary>> {
    let rows = summary_query()
        .order_by_desc(ctd_cast_log::Column::CreatedAt)
        .order_by_desc(ctd_cast_log::Column::CtdCastLogId)
        .limit(limit)
        .into_model::<CastRow>()
        .all(db)
        .await?;

    Ok(rows.into_iter().map(CastSummary::from).collect())
}

async fn load_phases<C: ConnectionTrait>(db: &C, cast_id: i32) -> AppResult<CastPhases> {
    Ok(CastPhases {
        pre_cast: pre_cast::Entity::find()
            .filter(pre_cast::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        beginning_position: beginning_position::Entity::find()
            .filter(beginning_position::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        at_depth_position: at_depth_position::Entity::find()
            .filter(at_depth_position::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        capture_start: capture_start::Entity::find()
            .filter(capture_start::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        bottom_depth_position: bottom_depth_position::Entity::find()
            .filter(bottom_depth_position::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        ending_position: ending_position::Entity::find()
            .filter(ending_position::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        on_deck_position: on_deck_position::Entity::find()
            .filter(on_deck_position::Column::CastLogId.eq(cast_id))
            .one(db)
            .await?,
        post_cast: post_cast::Entity::find()
            .filter(post_cast::Column::CtdCastLogId.eq(cast_id))
            .one(db)
            .await?,
    })
}

async fn sample_count<C: ConnectionTrait>(db: &C, cast_id: i32) -> AppResult<u64> {
    Ok(sample_pressure::Entity::find()
        .filter(sample_pressure::Column::CastLogId.eq(cast_id))
        .count(db)
        .await?)
}

fn progress_of(phases: &CastPhases, samples: u64) -> Progress {
    let present = [
        (Stage::PreCast, phases.pre_cast.is_some()),
        (Stage::Beginning, phases.beginning_position.is_some()),
        (Stage::AtDepth, phases.at_depth_position.is_some()),
        (Stage::CaptureStart, phases.capture_start.is_some()),
        (Stage::BottomDepth, phases.bottom_depth_position.is_some()),
        (Stage::Samples, samples > 0),
        (Stage::Ending, phases.ending_position.is_some()),
        (Stage::OnDeck, phases.on_deck_position.is_some()),
        (Stage::PostCast, phases.post_cast.is_some()),
    ];

    Progress::from_stages(present.into_iter().filter(|(_, has)| *has).map(|(stage, _)| stage))
}

/// Stages recorded so far for `cast_id`.
pub async fn load_progress<C: ConnectionTrait>(db: &C, cast_id: i32) -> AppResult<Progress> {
    let phases = load_phases(db, cast_id).await?;
    let samples = sample_count(db, cast_id).await?;
    Ok(progress_of(&phases, samples))
}

pub async fn get_cast(db: &DatabaseConnection, cast_id: i32) -> AppResult<CastDetail> {
    let summary = get_cast_summary(db, cast_id).await?;
    let phases = load_phases(db, cast_id).await?;
    let sample_count = sample_count(db, cast_id).await?;
    let sensors = list_cast_sensors(db, cast_id).await?;
    let progress = progress_of(&phases, sample_count);

    Ok(CastDetail {
        summary,
        state: progress.state(),
        next_stage: progress.next_stage(),
        phases,
        sensors,
        sample_count,
    })
}

/// Remove a cast and everything it owns in one transaction. Reference data
/// (ships, stations, niskins, sample types, bottles) is untouched.
pub async fn delete_cast(db: &DatabaseConnection, cast_id: i32) -> AppResult<CastDeletion> {
    let txn = db.begin().await?;
    find_cast(&txn, cast_id).await?;

    let mut removed = CastDeletion::default();

    let session_ids: Vec<i32> = sampling_session::Entity::find()
        .select_only()
        .column(sampling_session::Column::SessionId)
        .filter(sampling_session::Column::CtdCastLogId.eq(cast_id))
        .into_tuple()
        .all(&txn)
        .await?;

    if !session_ids.is_empty() {
        removed.sample_timings = sample_timing::Entity::delete_many()
            .filter(sample_timing::Column::SessionId.is_in(session_ids))
            .exec(&txn)
            .await?
            .rows_affected;
    }
    removed.sampling_sessions = sampling_session::Entity::delete_many()
        .filter(sampling_session::Column::CtdCastLogId.eq(cast_id))
        .exec(&txn)
        .await?
        .rows_affected;
    removed.sample_pressures = sample_pressure::Entity::delete_many()
        .filter(sample_pressure::Column::CastLogId.eq(cast_id))
        .exec(&txn)
        .await?
        .rows_affected;
    removed.sensors = cast_sensors::Entity::delete_many()
        .filter(cast_sensors::Column::CastLogId.eq(cast_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let phase_deletes = [
        pre_cast::Entity::delete_many()
            .filter(pre_cast::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        beginning_position::Entity::delete_many()
            .filter(beginning_position::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        at_depth_position::Entity::delete_many()
            .filter(at_depth_position::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        capture_start::Entity::delete_many()
            .filter(capture_start::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        bottom_depth_position::Entity::delete_many()
            .filter(bottom_depth_position::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        ending_position::Entity::delete_many()
            .filter(ending_position::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        on_deck_position::Entity::delete_many()
            .filter(on_deck_position::Column::CastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
        post_cast::Entity::delete_many()
            .filter(post_cast::Column::CtdCastLogId.eq(cast_id))
            .exec(&txn)
            .await?,
    ];
    removed.phase_records = phase_deletes.iter().map(|r| r.rows_affected).sum();

    ctd_cast_log::Entity::delete_by_id(cast_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(cast_id, ?removed, "cast_deleted");
    Ok(removed)
}

pub async fn attach_sensor(
    db: &DatabaseConnection,
    cast_id: i32,
    input: AttachSensor,
) -> AppResult<AttachedSensor> {
    let position_order = positive("position_order", input.position_order)?;
    let sequence_number = optional_positive("sequence_number", input.sequence_number)?;
    find_cast(db, cast_id).await?;
    let sensor = reference::get_sensor(db, input.sensor_id).await?;

    let row = cast_sensors::ActiveModel {
        cast_log_id: Set(cast_id),
        sensor_id: Set(sensor.sensor_id),
        position_order: Set(position_order),
        sequence_number: Set(sequence_number),
        notes: Set(optional_text(input.notes)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(cast_id, sensor_id = sensor.sensor_id, position_order, "sensor_attached");
    Ok(AttachedSensor {
        cast_sensor_id: row.cast_sensor_id,
        sensor_id: sensor.sensor_id,
        sensor_type: sensor.sensor_type,
        vin_number: sensor.vin_number,
        position_order: row.position_order,
        sequence_number: row.sequence_number,
        notes: row.notes,
    })
}

/// Sensors on the package in mounting order.
pub async fn list_cast_sensors(db: &DatabaseConnection, cast_id: i32) -> AppResult<Vec<AttachedSensor>> {
    let rows = cast_sensors::Entity::find()
        .filter(cast_sensors::Column::CastLogId.eq(cast_id))
        .order_by_asc(cast_sensors::Column::PositionOrder)
        .order_by_asc(cast_sensors::Column::CastSensorId)
        .find_also_related(sensor_inventory::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(row, sensor)| {
            let sensor = sensor?;
            Some(AttachedSensor {
                cast_sensor_id: row.cast_sensor_id,
                sensor_id: row.sensor_id,
                sensor_type: sensor.sensor_type,
                vin_number: sensor.vin_number,
                position_order: row.position_order,
                sequence_number: row.sequence_number,
                notes: row.notes,
            })
        })
        .collect())
}
