//! Sample pressures: one row per Niskin firing, never overwritten.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::cast;
use crate::entity::{niskin_bottles, sample_pressure, station_target_depths};
use crate::error::{AppError, AppResult};
use crate::reference;
use crate::validation::{non_negative, optional_text};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SampleCaptureInput {
    pub niskin_id: i32,
    pub target_depth_id: Option<i32>,
    /// Pressure at which the bottle actually closed (dbar)
    pub sample_pressure_value: f64,
    #[serde(default)]
    pub sample_captured: bool,
    pub sample_captured_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CaptureSummaryRow {
    pub sample_pressure_id: i32,
    pub niskin_id: i32,
    pub niskin_number: i32,
    pub target_depth_id: Option<i32>,
    pub sequence_order: Option<i32>,
    pub target_pressure: Option<f64>,
    pub actual_pressure: f64,
    /// `actual - target`; absent when the capture has no target depth
    pub variance: Option<f64>,
    pub sample_captured: bool,
    pub sample_captured_datetime: Option<DateTime<Utc>>,
}

/// Append a capture. Nothing is written if any reference fails to resolve.
pub async fn record_sample_capture(
    db: &DatabaseConnection,
    cast_id: i32,
    input: SampleCaptureInput,
) -> AppResult<sample_pressure::Model> {
    let pressure = non_negative("sample_pressure_value", input.sample_pressure_value)?;
    let cast = cast::find_cast(db, cast_id).await?;
    let niskin = reference::get_niskin(db, input.niskin_id).await?;

    if let Some(target_id) = input.target_depth_id {
        let target = station_target_depths::Entity::find_by_id(target_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Target depth {target_id} not found")))?;
        if target.station_id != cast.station_id {
            return Err(AppError::invalid(
                "target_depth_id",
                "target depth belongs to a different station than the cast",
            ));
        }
    }

    let row = sample_pressure::ActiveModel {
        cast_log_id: Set(cast_id),
        niskin_id: Set(niskin.niskin_id),
        target_depth_id: Set(input.target_depth_id),
        sample_pressure_value: Set(pressure),
        sample_captured: Set(input.sample_captured),
        sample_captured_datetime: Set(Some(input.sample_captured_datetime.unwrap_or_else(Utc::now))),
        notes: Set(optional_text(input.notes)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        cast_id,
        niskin_number = niskin.niskin_number,
        target_depth_id = ?row.target_depth_id,
        pressure,
        "sample_pressure_recorded"
    );
    Ok(row)
}

/// Every capture of a cast in the order it was recorded.
pub async fn list_sample_captures(db: &DatabaseConnection, cast_id: i32) -> AppResult<Vec<sample_pressure::Model>> {
    cast::find_cast(db, cast_id).await?;
    Ok(sample_pressure::Entity::find()
        .filter(sample_pressure::Column::CastLogId.eq(cast_id))
        .order_by_asc(sample_pressure::Column::SamplePressureId)
        .all(db)
        .await?)
}

fn summary_row(
    capture: sample_pressure::Model,
    niskin_number: i32,
    target: Option<&station_target_depths::Model>,
) -> CaptureSummaryRow {
    CaptureSummaryRow {
        sample_pressure_id: capture.sample_pressure_id,
        niskin_id: capture.niskin_id,
        niskin_number,
        target_depth_id: capture.target_depth_id,
        sequence_order: target.map(|t| t.sequence_order),
        target_pressure: target.map(|t| t.target_pressure),
        actual_pressure: capture.sample_pressure_value,
        variance: target.map(|t| capture.sample_pressure_value - t.target_pressure),
        sample_captured: capture.sample_captured,
        sample_captured_datetime: capture.sample_captured_datetime,
    }
}

/// Planned sequence first (untargeted rows last), then Niskin number, then
/// recording order.
fn summary_order(a: &CaptureSummaryRow, b: &CaptureSummaryRow) -> Ordering {
    let sequence = match (a.sequence_order, b.sequence_order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    sequence
        .then(a.niskin_number.cmp(&b.niskin_number))
        .then(a.sample_pressure_id.cmp(&b.sample_pressure_id))
}

/// Target versus actual pressure for every capture of a cast.
pub async fn capture_summary(db: &DatabaseConnection, cast_id: i32) -> AppResult<Vec<CaptureSummaryRow>> {
    let captures = list_sample_captures(db, cast_id).await?;

    let niskins: HashMap<i32, i32> = niskin_bottles::Entity::find()
        .filter(niskin_bottles::Column::NiskinId.is_in(captures.iter().map(|c| c.niskin_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|n| (n.niskin_id, n.niskin_number))
        .collect();

    let targets: HashMap<i32, station_target_depths::Model> = station_target_depths::Entity::find()
        .filter(
            station_target_depths::Column::TargetDepthId
                .is_in(captures.iter().filter_map(|c| c.target_depth_id)),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.target_depth_id, t))
        .collect();

    let mut rows = Vec::with_capacity(captures.len());
    for capture in captures {
        let niskin_number = *niskins.get(&capture.niskin_id).ok_or_else(|| {
            AppError::Internal(format!("niskin {} missing for capture", capture.niskin_id))
        })?;
        let target = capture.target_depth_id.and_then(|id| targets.get(&id));
        rows.push(summary_row(capture, niskin_number, target));
    }

    rows.sort_by(summary_order);
    Ok(rows)
}

/// Render a capture summary as CSV with a header row.
pub fn capture_summary_csv(rows: &[CaptureSummaryRow]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::Internal(format!("csv encode failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("csv flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("csv not utf-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(id: i32, niskin_id: i32, target_depth_id: Option<i32>, value: f64) -> sample_pressure::Model {
        sample_pressure::Model {
            sample_pressure_id: id,
            cast_log_id: 1,
            niskin_id,
            target_depth_id,
            sample_pressure_value: value,
            sample_captured: true,
            sample_captured_datetime: None,
            notes: None,
        }
    }

    fn target(id: i32, sequence_order: i32, target_pressure: f64) -> station_target_depths::Model {
        station_target_depths::Model {
            target_depth_id: id,
            station_id: 1,
            target_pressure,
            sequence_order,
            niskin_position: None,
            notes: None,
        }
    }

    #[test]
    fn variance_only_with_a_target() {
        let planned = target(10, 1, 500.0);
        let with = summary_row(capture(1, 3, Some(10), 505.0), 3, Some(&planned));
        let without = summary_row(capture(2, 4, None, 200.0), 4, None);

        assert_eq!(with.variance, Some(5.0));
        assert_eq!(without.variance, None);
        assert_eq!(without.target_pressure, None);
    }

    #[test]
    fn negative_variance_when_shallow() {
        let planned = target(10, 1, 100.0);
        let row = summary_row(capture(1, 1, Some(10), 98.5), 1, Some(&planned));
        assert_eq!(row.variance, Some(-1.5));
    }

    #[test]
    fn ordering_by_sequence_then_niskin_then_id() {
        let deep = target(1, 1, 1000.0);
        let shallow = target(2, 2, 10.0);
        let mut rows = vec![
            summary_row(capture(1, 7, None, 50.0), 7, None),
            summary_row(capture(2, 5, Some(2), 11.0), 5, Some(&shallow)),
            summary_row(capture(3, 2, None, 60.0), 2, None),
            summary_row(capture(4, 9, Some(1), 1001.0), 9, Some(&deep)),
            summary_row(capture(5, 1, Some(2), 9.0), 1, Some(&shallow)),
            summary_row(capture(6, 2, None, 61.0), 2, None),
        ];
        rows.sort_by(summary_order);

        let ids: Vec<_> = rows.iter().map(|r| r.sample_pressure_id).collect();
        assert_eq!(ids, [4, 5, 2, 3, 6, 1]);
    }

    #[test]
    fn csv_has_header_and_blank_missing_values() {
        let rows = vec![summary_row(capture(1, 4, None, 200.0), 4, None)];
        let csv = capture_summary_csv(&rows).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some(
                "sample_pressure_id,niskin_id,niskin_number,target_depth_id,sequence_order,\
                 target_pressure,actual_pressure,variance,sample_captured,sample_captured_datetime"
            )
        );
        assert_eq!(lines.next(), Some("1,4,4,,,,200.0,,true,"));
    }
}
