mod common;

use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};

use ctd_log::cast::{self, BeginningPositionInput, OnDeckInput};
use ctd_log::entity::bottles::BottleStatus;
use ctd_log::entity::sample_pressure;
use ctd_log::error::AppError;
use ctd_log::reference::{self, NewStation, NewTargetDepth};
use ctd_log::sampling::{
    self, BottleReplacementInput, CloseSession, NewBottle, NewSampleTiming, OpenSession, SampleCaptureInput,
};

fn capture(niskin_id: i32, target_depth_id: Option<i32>, pressure: f64) -> SampleCaptureInput {
    SampleCaptureInput {
        niskin_id,
        target_depth_id,
        sample_pressure_value: pressure,
        sample_captured: true,
        sample_captured_datetime: None,
        notes: None,
    }
}

fn target(pressure: f64, sequence_order: i32) -> NewTargetDepth {
    NewTargetDepth {
        target_pressure: pressure,
        sequence_order,
        niskin_position: None,
        notes: None,
    }
}

#[tokio::test]
async fn end_to_end_capture_variance() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;

    let cast = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap();
    let cast_id = cast.ctd_cast_log_id;
    assert_eq!(cast.cruise_name, "AB-24");
    assert_eq!(cast.station_number, "STN1");

    let begin = cast::save_beginning_position(
        &db,
        cast_id,
        BeginningPositionInput {
            begin_latitude: Some(10.01),
            begin_longitude: Some(-20.01),
            begin_depth: Some(0.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(begin.record.begin_latitude, Some(10.01));

    let depth = reference::add_target_depth(&db, voyage.station_id, target(500.0, 1))
        .await
        .unwrap();

    sampling::record_sample_capture(&db, cast_id, capture(voyage.niskin_ids[2], Some(depth.target_depth_id), 505.0))
        .await
        .unwrap();

    let summary = sampling::capture_summary(&db, cast_id).await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].niskin_number, 3);
    assert_eq!(summary[0].target_pressure, Some(500.0));
    assert_eq!(summary[0].actual_pressure, 505.0);
    assert_eq!(summary[0].variance, Some(5.0));

    let csv = sampling::capture_summary_csv(&summary).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().contains("505.0"));
}

#[tokio::test]
async fn missing_niskin_inserts_nothing() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    let err = sampling::record_sample_capture(&db, cast_id, capture(9_999, None, 100.0))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = sampling::record_sample_capture(&db, cast_id, capture(voyage.niskin_ids[0], None, -1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "sample_pressure_value"));

    assert_eq!(sample_pressure::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn target_depth_must_match_the_cast_station() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    let elsewhere = reference::create_station(
        &db,
        NewStation {
            cruise_id: voyage.cruise_id,
            station_number: "STN2".into(),
            station_name: "Station Two".into(),
            station_abbreviation: None,
            latitude: None,
            longitude: None,
        },
    )
    .await
    .unwrap();
    let foreign = reference::add_target_depth(&db, elsewhere.station_id, target(200.0, 1))
        .await
        .unwrap();

    let err = sampling::record_sample_capture(
        &db,
        cast_id,
        capture(voyage.niskin_ids[0], Some(foreign.target_depth_id), 200.0),
    )
    .await
    .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(sample_pressure::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn summary_orders_by_sequence_then_untargeted() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    let deep = reference::add_target_depth(&db, voyage.station_id, target(1000.0, 1))
        .await
        .unwrap();
    let shallow = reference::add_target_depth(&db, voyage.station_id, target(50.0, 2))
        .await
        .unwrap();

    let n = &voyage.niskin_ids;
    sampling::record_sample_capture(&db, cast_id, capture(n[3], None, 10.0)).await.unwrap();
    sampling::record_sample_capture(&db, cast_id, capture(n[1], Some(shallow.target_depth_id), 48.0))
        .await
        .unwrap();
    sampling::record_sample_capture(&db, cast_id, capture(n[0], Some(deep.target_depth_id), 1003.5))
        .await
        .unwrap();
    sampling::record_sample_capture(&db, cast_id, capture(n[2], None, 12.0)).await.unwrap();

    let summary = sampling::capture_summary(&db, cast_id).await.unwrap();
    let niskins: Vec<i32> = summary.iter().map(|r| r.niskin_number).collect();
    assert_eq!(niskins, vec![1, 2, 3, 4]);
    assert_eq!(summary[0].variance, Some(3.5));
    assert_eq!(summary[1].variance, Some(-2.0));
    assert_eq!(summary[2].variance, None);

    // Captures are listed in recording order
    let raw = sampling::list_sample_captures(&db, cast_id).await.unwrap();
    assert_eq!(raw.len(), 4);
    assert_eq!(raw[0].niskin_id, n[3]);
}

#[tokio::test]
async fn bottle_status_moves_forward_one_step() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;
    let oxygen = reference::list_sample_types(&db, false).await.unwrap()[0].sample_type_id;

    sampling::record_sample_capture(&db, cast_id, capture(voyage.niskin_ids[0], None, 20.0))
        .await
        .unwrap();

    let new_bottle = |bottle_number| NewBottle {
        niskin_id: voyage.niskin_ids[0],
        sample_type_id: oxygen,
        bottle_number,
        is_duplicate: false,
        duplicate_sequence: None,
        capacity_ml: Some(125),
    };

    let bottle = sampling::create_bottle(&db, new_bottle(2)).await.unwrap();
    assert_eq!(bottle.status, BottleStatus::Empty);
    assert!(bottle.collected_datetime.is_none());

    let err = sampling::update_bottle_status(&db, bottle.bottle_id, BottleStatus::Processed)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let filled = sampling::update_bottle_status(&db, bottle.bottle_id, BottleStatus::Filled)
        .await
        .unwrap();
    assert_eq!(filled.status, BottleStatus::Filled);
    let collected = filled.collected_datetime.unwrap();

    // Same status again changes nothing
    let again = sampling::update_bottle_status(&db, bottle.bottle_id, BottleStatus::Filled)
        .await
        .unwrap();
    assert_eq!(again.collected_datetime, Some(collected));

    let err = sampling::update_bottle_status(&db, bottle.bottle_id, BottleStatus::Empty)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let other = sampling::create_bottle(&db, new_bottle(1)).await.unwrap();
    let listed = sampling::bottles_for_cast(&db, cast_id).await.unwrap();
    let numbers: Vec<i32> = listed.iter().map(|b| b.bottle.bottle_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(listed[0].niskin_number, 1);

    let replacement = sampling::replace_bottle(
        &db,
        bottle.bottle_id,
        BottleReplacementInput {
            replacement_bottle_id: other.bottle_id,
            replacement_datetime: None,
            reason: Some("cracked cap".into()),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(replacement.original_bottle_id, bottle.bottle_id);
    assert_eq!(sampling::list_replacements(&db, other.bottle_id).await.unwrap().len(), 1);

    let err = sampling::replace_bottle(
        &db,
        bottle.bottle_id,
        BottleReplacementInput {
            replacement_bottle_id: bottle.bottle_id,
            replacement_datetime: None,
            reason: None,
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(err.is_validation());

    // Duplicate sequence needs a duplicate bottle
    let mut bad = new_bottle(3);
    bad.duplicate_sequence = Some(1);
    assert!(sampling::create_bottle(&db, bad).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn sessions_need_the_package_on_deck() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    let err = sampling::open_session(&db, cast_id, OpenSession::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let on_deck = cast::save_on_deck(
        &db,
        cast_id,
        OnDeckInput {
            on_deck_latitude: Some(10.0),
            on_deck_longitude: Some(-20.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let start = Utc::now() - Duration::hours(3);
    let session = sampling::open_session(
        &db,
        cast_id,
        OpenSession {
            sampling_start_datetime: Some(start),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(session.on_deck_position_id, Some(on_deck.record.on_deck_id));

    let err = sampling::close_session(
        &db,
        session.session_id,
        CloseSession {
            sampling_end_datetime: Some(start - Duration::minutes(1)),
        },
    )
    .await
    .unwrap_err();
    assert!(err.is_validation());

    let sample_types = reference::list_sample_types(&db, false).await.unwrap();
    sampling::set_sample_timing(
        &db,
        session.session_id,
        voyage.observer_id,
        NewSampleTiming {
            sample_type_id: sample_types[0].sample_type_id,
            time_limit_hours: 2,
            set_datetime: Some(start),
            notes: None,
        },
    )
    .await
    .unwrap();
    let timing = sampling::set_sample_timing(
        &db,
        session.session_id,
        voyage.observer_id,
        NewSampleTiming {
            sample_type_id: sample_types[1].sample_type_id,
            time_limit_hours: 24,
            set_datetime: Some(start),
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(timing.deadline_datetime, start + Duration::hours(24));

    let timings = sampling::list_timings(&db, session.session_id).await.unwrap();
    assert_eq!(timings.len(), 2);
    assert!(timings[0].overdue);
    assert!(!timings[1].overdue);

    let closed = sampling::close_session(&db, session.session_id, CloseSession::default())
        .await
        .unwrap();
    assert!(closed.sampling_end_datetime.is_some());

    // Deleting the cast takes its sessions and deadlines with it
    let removed = cast::delete_cast(&db, cast_id).await.unwrap();
    assert_eq!(removed.sampling_sessions, 1);
    assert_eq!(removed.sample_timings, 2);
}
