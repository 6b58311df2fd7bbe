//! Sampling sessions on deck and per-sample-type processing deadlines.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cast;
use crate::entity::{on_deck_position, sample_timing, sampling_session};
use crate::error::{AppError, AppResult};
use crate::reference;
use crate::validation::{optional_text, positive};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OpenSession {
    pub sampling_start_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CloseSession {
    pub sampling_end_datetime: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSampleTiming {
    pub sample_type_id: i32,
    pub time_limit_hours: i32,
    pub set_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimingStatus {
    #[serde(flatten)]
    pub timing: sample_timing::Model,
    pub overdue: bool,
}

#[must_use]
pub fn deadline(set_at: DateTime<Utc>, time_limit_hours: i32) -> DateTime<Utc> {
    set_at + Duration::hours(i64::from(time_limit_hours))
}

#[must_use]
pub fn is_overdue(timing: &sample_timing::Model, now: DateTime<Utc>) -> bool {
    now > timing.deadline_datetime
}

pub async fn get_session(db: &DatabaseConnection, session_id: i32) -> AppResult<sampling_session::Model> {
    sampling_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sampling session {session_id} not found")))
}

/// Sampling starts once the package is back on deck.
pub async fn open_session(
    db: &DatabaseConnection,
    cast_id: i32,
    input: OpenSession,
) -> AppResult<sampling_session::Model> {
    cast::find_cast(db, cast_id).await?;
    let on_deck = on_deck_position::Entity::find()
        .filter(on_deck_position::Column::CastLogId.eq(cast_id))
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::invalid(
                "ctd_cast_log_id",
                "record the on-deck position before opening a sampling session",
            )
        })?;

    let session = sampling_session::ActiveModel {
        ctd_cast_log_id: Set(cast_id),
        on_deck_position_id: Set(Some(on_deck.on_deck_id)),
        sampling_start_datetime: Set(input.sampling_start_datetime.unwrap_or_else(Utc::now)),
        sampling_end_datetime: Set(None),
        notes: Set(optional_text(input.notes)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(cast_id, session_id = session.session_id, "sampling_session_opened");
    Ok(session)
}

pub async fn close_session(
    db: &DatabaseConnection,
    session_id: i32,
    input: CloseSession,
) -> AppResult<sampling_session::Model> {
    let session = get_session(db, session_id).await?;
    let end = input.sampling_end_datetime.unwrap_or_else(Utc::now);
    if end < session.sampling_start_datetime {
        return Err(AppError::invalid(
            "sampling_end_datetime",
            "must not precede the session start",
        ));
    }

    let mut am: sampling_session::ActiveModel = session.into();
    am.sampling_end_datetime = Set(Some(end));
    let session = am.update(db).await?;

    tracing::info!(session_id, "sampling_session_closed");
    Ok(session)
}

pub async fn list_sessions(db: &DatabaseConnection, cast_id: i32) -> AppResult<Vec<sampling_session::Model>> {
    cast::find_cast(db, cast_id).await?;
    Ok(sampling_session::Entity::find()
        .filter(sampling_session::Column::CtdCastLogId.eq(cast_id))
        .order_by_asc(sampling_session::Column::SamplingStartDatetime)
        .all(db)
        .await?)
}

pub async fn set_sample_timing(
    db: &DatabaseConnection,
    session_id: i32,
    set_by_user_id: i32,
    input: NewSampleTiming,
) -> AppResult<sample_timing::Model> {
    let hours = positive("time_limit_hours", input.time_limit_hours)?;
    get_session(db, session_id).await?;
    reference::get_sample_type(db, input.sample_type_id).await?;

    let set_at = input.set_datetime.unwrap_or_else(Utc::now);
    let timing = sample_timing::ActiveModel {
        sample_type_id: Set(input.sample_type_id),
        session_id: Set(session_id),
        set_by_user_id: Set(set_by_user_id),
        time_limit_hours: Set(hours),
        deadline_datetime: Set(deadline(set_at, hours)),
        set_datetime: Set(set_at),
        notes: Set(optional_text(input.notes)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        session_id,
        sample_type_id = timing.sample_type_id,
        deadline = %timing.deadline_datetime,
        "sample_deadline_set"
    );
    Ok(timing)
}

/// Deadlines of a session, soonest first.
pub async fn list_timings(db: &DatabaseConnection, session_id: i32) -> AppResult<Vec<TimingStatus>> {
    get_session(db, session_id).await?;
    let now = Utc::now();

    Ok(sample_timing::Entity::find()
        .filter(sample_timing::Column::SessionId.eq(session_id))
        .order_by_asc(sample_timing::Column::DeadlineDatetime)
        .all(db)
        .await?
        .into_iter()
        .map(|timing| TimingStatus {
            overdue: is_overdue(&timing, now),
            timing,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deadline_adds_whole_hours() {
        let set_at = Utc.with_ymd_and_hms(2024, 3, 1, 22, 30, 0).unwrap();
        assert_eq!(
            deadline(set_at, 6),
            Utc.with_ymd_and_hms(2024, 3, 2, 4, 30, 0).unwrap()
        );
    }

    #[test]
    fn overdue_only_after_deadline() {
        let set_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let timing = sample_timing::Model {
            timing_id: 1,
            sample_type_id: 1,
            session_id: 1,
            set_by_user_id: 1,
            time_limit_hours: 2,
            deadline_datetime: deadline(set_at, 2),
            set_datetime: set_at,
            notes: None,
        };

        assert!(!is_overdue(&timing, set_at + Duration::hours(2)));
        assert!(is_overdue(&timing, set_at + Duration::minutes(121)));
    }
}
