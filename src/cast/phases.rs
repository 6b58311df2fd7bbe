//! Singleton phase records attached 1:1 to a cast.
//!
//! Every save is a whole-record replace keyed on the cast: fields left out of
//! the input are cleared, never merged with a previous save. The last write
//! wins.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IdenStatic, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::{CastState, Stage};
use crate::entity::{
    at_depth_position, beginning_position, bottom_depth_position, capture_start, ending_position,
    on_deck_position, post_cast, pre_cast,
};
use crate::error::{AppError, AppResult};
use crate::validation::{
    latitude, longitude, optional_latitude, optional_longitude, optional_non_negative, optional_text,
    required,
};

/// Result of a phase save: the stored record plus advisory ordering warnings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhaseSaved<T> {
    pub record: T,
    pub state: CastState,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PreCastInput {
    pub pre_cast_pressure_test: Option<f64>,
    pub pre_cast_datetime: Option<DateTime<Utc>>,
    pub pre_cast_latitude: Option<f64>,
    pub pre_cast_longitude: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BeginningPositionInput {
    pub begin_datetime: Option<DateTime<Utc>>,
    pub begin_latitude: Option<f64>,
    pub begin_longitude: Option<f64>,
    pub begin_depth: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AtDepthInput {
    pub at_depth_datetime: Option<DateTime<Utc>>,
    pub at_depth_latitude: Option<f64>,
    pub at_depth_longitude: Option<f64>,
    pub at_depth_depth: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CaptureStartInput {
    pub markscan_start: Option<i32>,
    pub markscan_start_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BottomDepthInput {
    pub bottom_datetime: Option<DateTime<Utc>>,
    pub bottom_latitude: Option<f64>,
    pub bottom_longitude: Option<f64>,
    pub height_above_bottom: Option<f64>,
    pub max_pressure: Option<f64>,
    pub winch_payout: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EndingPositionInput {
    pub end_datetime: Option<DateTime<Utc>>,
    pub end_latitude: Option<f64>,
    pub end_longitude: Option<f64>,
    pub end_depth: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OnDeckInput {
    pub on_deck_datetime: Option<DateTime<Utc>>,
    pub on_deck_latitude: Option<f64>,
    pub on_deck_longitude: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostCastInput {
    pub post_cast_pressure_check: Option<f64>,
    #[serde(default)]
    pub real_time_data_stop: bool,
    pub real_time_data_stop_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deck_unit_off: bool,
    pub deck_unit_off_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

fn required_latitude(field: &str, value: Option<f64>) -> AppResult<f64> {
    latitude(field, required(field, value)?)
}

fn required_longitude(field: &str, value: Option<f64>) -> AppResult<f64> {
    longitude(field, required(field, value)?)
}

/// A checked-off step keeps its time, stamping now when none was given.
fn checklist_time(done: bool, at: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    if done { Some(at.unwrap_or_else(Utc::now)) } else { at }
}

/// Every column except the primary key and the cast reference.
fn replaced_columns<E: EntityTrait>(cast_column: E::Column) -> Vec<E::Column> {
    let fixed: Vec<String> = E::PrimaryKey::iter()
        .map(|pk| pk.into_column().as_str().to_owned())
        .chain([cast_column.as_str().to_owned()])
        .collect();

    E::Column::iter()
        .filter(|column| !fixed.iter().any(|f| f == column.as_str()))
        .collect()
}

async fn upsert_phase<E, A>(
    db: &DatabaseConnection,
    cast_id: i32,
    stage: Stage,
    cast_column: E::Column,
    record: A,
) -> AppResult<PhaseSaved<E::Model>>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + Send,
{
    super::find_cast(db, cast_id).await?;
    let mut progress = super::load_progress(db, cast_id).await?;

    if progress.has(stage) {
        tracing::info!(cast_id, stage = stage.label(), "phase_record_replaced");
    }

    E::insert(record)
        .on_conflict(
            OnConflict::column(cast_column)
                .update_columns(replaced_columns::<E>(cast_column))
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let record = E::find()
        .filter(cast_column.eq(cast_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(format!("{} for cast {cast_id} vanished after save", stage.label())))?;

    let warnings = progress.warnings_for(stage);
    if !warnings.is_empty() {
        tracing::debug!(cast_id, stage = stage.label(), ?warnings, "phase_saved_out_of_order");
    }
    progress.record(stage);

    Ok(PhaseSaved {
        record,
        state: progress.state(),
        warnings,
    })
}

pub async fn save_pre_cast(
    db: &DatabaseConnection,
    cast_id: i32,
    input: PreCastInput,
) -> AppResult<PhaseSaved<pre_cast::Model>> {
    let record = pre_cast::ActiveModel {
        cast_log_id: Set(cast_id),
        pre_cast_pressure_test: Set(optional_non_negative(
            "pre_cast_pressure_test",
            input.pre_cast_pressure_test,
        )?),
        pre_cast_datetime: Set(Some(input.pre_cast_datetime.unwrap_or_else(Utc::now))),
        pre_cast_latitude: Set(optional_latitude("pre_cast_latitude", input.pre_cast_latitude)?),
        pre_cast_longitude: Set(optional_longitude("pre_cast_longitude", input.pre_cast_longitude)?),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::PreCast, pre_cast::Column::CastLogId, record).await
}

pub async fn save_beginning_position(
    db: &DatabaseConnection,
    cast_id: i32,
    input: BeginningPositionInput,
) -> AppResult<PhaseSaved<beginning_position::Model>> {
    let record = beginning_position::ActiveModel {
        cast_log_id: Set(cast_id),
        begin_datetime: Set(Some(input.begin_datetime.unwrap_or_else(Utc::now))),
        begin_latitude: Set(Some(required_latitude("begin_latitude", input.begin_latitude)?)),
        begin_longitude: Set(Some(required_longitude("begin_longitude", input.begin_longitude)?)),
        begin_depth: Set(optional_non_negative("begin_depth", input.begin_depth)?),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::Beginning, beginning_position::Column::CastLogId, record).await
}

pub async fn save_at_depth(
    db: &DatabaseConnection,
    cast_id: i32,
    input: AtDepthInput,
) -> AppResult<PhaseSaved<at_depth_position::Model>> {
    let record = at_depth_position::ActiveModel {
        cast_log_id: Set(cast_id),
        at_depth_datetime: Set(Some(input.at_depth_datetime.unwrap_or_else(Utc::now))),
        at_depth_latitude: Set(Some(required_latitude("at_depth_latitude", input.at_depth_latitude)?)),
        at_depth_longitude: Set(Some(required_longitude(
            "at_depth_longitude",
            input.at_depth_longitude,
        )?)),
        at_depth_depth: Set(optional_non_negative("at_depth_depth", input.at_depth_depth)?),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::AtDepth, at_depth_position::Column::CastLogId, record).await
}

pub async fn save_capture_start(
    db: &DatabaseConnection,
    cast_id: i32,
    input: CaptureStartInput,
) -> AppResult<PhaseSaved<capture_start::Model>> {
    if input.markscan_start.is_some_and(|scan| scan < 0) {
        return Err(AppError::invalid("markscan_start", "must be a non-negative scan number"));
    }

    let record = capture_start::ActiveModel {
        cast_log_id: Set(cast_id),
        markscan_start: Set(input.markscan_start),
        markscan_start_datetime: Set(Some(input.markscan_start_datetime.unwrap_or_else(Utc::now))),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::CaptureStart, capture_start::Column::CastLogId, record).await
}

pub async fn save_bottom_depth(
    db: &DatabaseConnection,
    cast_id: i32,
    input: BottomDepthInput,
) -> AppResult<PhaseSaved<bottom_depth_position::Model>> {
    let record = bottom_depth_position::ActiveModel {
        cast_log_id: Set(cast_id),
        bottom_datetime: Set(Some(input.bottom_datetime.unwrap_or_else(Utc::now))),
        bottom_latitude: Set(optional_latitude("bottom_latitude", input.bottom_latitude)?),
        bottom_longitude: Set(optional_longitude("bottom_longitude", input.bottom_longitude)?),
        height_above_bottom: Set(optional_non_negative(
            "height_above_bottom",
            input.height_above_bottom,
        )?),
        max_pressure: Set(optional_non_negative("max_pressure", input.max_pressure)?),
        winch_payout: Set(optional_non_negative("winch_payout", input.winch_payout)?),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::BottomDepth, bottom_depth_position::Column::CastLogId, record).await
}

pub async fn save_ending_position(
    db: &DatabaseConnection,
    cast_id: i32,
    input: EndingPositionInput,
) -> AppResult<PhaseSaved<ending_position::Model>> {
    let record = ending_position::ActiveModel {
        cast_log_id: Set(cast_id),
        end_datetime: Set(Some(input.end_datetime.unwrap_or_else(Utc::now))),
        end_latitude: Set(Some(required_latitude("end_latitude", input.end_latitude)?)),
        end_longitude: Set(Some(required_longitude("end_longitude", input.end_longitude)?)),
        end_depth: Set(optional_non_negative("end_depth", input.end_depth)?),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::Ending, ending_position::Column::CastLogId, record).await
}

pub async fn save_on_deck(
    db: &DatabaseConnection,
    cast_id: i32,
    input: OnDeckInput,
) -> AppResult<PhaseSaved<on_deck_position::Model>> {
    let record = on_deck_position::ActiveModel {
        cast_log_id: Set(cast_id),
        on_deck_datetime: Set(Some(input.on_deck_datetime.unwrap_or_else(Utc::now))),
        on_deck_latitude: Set(Some(required_latitude("on_deck_latitude", input.on_deck_latitude)?)),
        on_deck_longitude: Set(Some(required_longitude(
            "on_deck_longitude",
            input.on_deck_longitude,
        )?)),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::OnDeck, on_deck_position::Column::CastLogId, record).await
}

pub async fn save_post_cast(
    db: &DatabaseConnection,
    cast_id: i32,
    input: PostCastInput,
) -> AppResult<PhaseSaved<post_cast::Model>> {
    let record = post_cast::ActiveModel {
        ctd_cast_log_id: Set(cast_id),
        post_cast_pressure_check: Set(optional_non_negative(
            "post_cast_pressure_check",
            input.post_cast_pressure_check,
        )?),
        real_time_data_stop: Set(input.real_time_data_stop),
        real_time_data_stop_datetime: Set(checklist_time(
            input.real_time_data_stop,
            input.real_time_data_stop_datetime,
        )),
        deck_unit_off: Set(input.deck_unit_off),
        deck_unit_off_datetime: Set(checklist_time(input.deck_unit_off, input.deck_unit_off_datetime)),
        notes: Set(optional_text(input.notes)),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    upsert_phase(db, cast_id, Stage::PostCast, post_cast::Column::CtdCastLogId, record).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(columns: Vec<impl IdenStatic>) -> Vec<String> {
        columns.into_iter().map(|c| c.as_str().to_owned()).collect()
    }

    #[test]
    fn replace_covers_every_non_key_column() {
        let columns = names(replaced_columns::<on_deck_position::Entity>(
            on_deck_position::Column::CastLogId,
        ));
        assert_eq!(
            columns,
            [
                "on_deck_datetime",
                "on_deck_latitude",
                "on_deck_longitude",
                "notes",
                "updated_at"
            ]
        );
    }

    #[test]
    fn post_cast_keys_on_its_own_column() {
        let columns = names(replaced_columns::<post_cast::Entity>(post_cast::Column::CtdCastLogId));
        assert!(!columns.contains(&"ctd_cast_log_id".to_string()));
        assert!(!columns.contains(&"post_cast_id".to_string()));
        assert!(columns.contains(&"deck_unit_off_datetime".to_string()));
    }

    #[test]
    fn checklist_time_stamps_completed_steps() {
        assert!(checklist_time(true, None).is_some());
        assert_eq!(checklist_time(false, None), None);
        let at = Utc::now();
        assert_eq!(checklist_time(true, Some(at)), Some(at));
    }
}
