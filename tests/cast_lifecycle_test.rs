mod common;

use sea_orm::{EntityTrait, PaginatorTrait};

use ctd_log::cast::{
    self, BeginningPositionInput, CastState, EndingPositionInput, OnDeckInput, PostCastInput, PreCastInput,
    Stage,
};
use ctd_log::entity::{beginning_position, niskin_bottles, sample_pressure, sample_types, ships};
use ctd_log::error::AppError;
use ctd_log::sampling::{self, SampleCaptureInput};

fn beginning(lat: f64, lon: f64) -> BeginningPositionInput {
    BeginningPositionInput {
        begin_latitude: Some(lat),
        begin_longitude: Some(lon),
        begin_depth: Some(0.0),
        ..Default::default()
    }
}

#[tokio::test]
async fn coordinates_round_trip_exactly() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let created = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap();

    let saved = cast::save_beginning_position(&db, created.ctd_cast_log_id, beginning(10.01, -20.01))
        .await
        .unwrap();
    assert_eq!(saved.record.begin_latitude, Some(10.01));
    assert_eq!(saved.record.begin_longitude, Some(-20.01));

    let detail = cast::get_cast(&db, created.ctd_cast_log_id).await.unwrap();
    let stored = detail.phases.beginning_position.unwrap();
    assert_eq!(stored.begin_latitude, Some(10.01));
    assert_eq!(stored.begin_longitude, Some(-20.01));
    assert_eq!(stored.begin_depth, Some(0.0));
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let created = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap();
    let cast_id = created.ctd_cast_log_id;

    let err = cast::save_beginning_position(&db, cast_id, beginning(90.5, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "begin_latitude"));

    let err = cast::save_ending_position(
        &db,
        cast_id,
        EndingPositionInput {
            end_latitude: Some(0.0),
            end_longitude: Some(-180.5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "end_longitude"));

    // Required on deck
    let err = cast::save_on_deck(&db, cast_id, OnDeckInput::default()).await.unwrap_err();
    assert!(err.is_validation());

    // Boundaries are inclusive
    cast::save_beginning_position(&db, cast_id, beginning(-90.0, 180.0))
        .await
        .unwrap();

    assert_eq!(
        beginning_position::Entity::find().count(&db).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn second_save_replaces_the_whole_record() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    cast::save_beginning_position(
        &db,
        cast_id,
        BeginningPositionInput {
            begin_latitude: Some(10.0),
            begin_longitude: Some(-20.0),
            begin_depth: Some(5.0),
            notes: Some("first fix".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let second = cast::save_beginning_position(
        &db,
        cast_id,
        BeginningPositionInput {
            begin_latitude: Some(10.5),
            begin_longitude: Some(-20.5),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(second.record.begin_latitude, Some(10.5));
    assert_eq!(second.record.begin_depth, None);
    assert_eq!(second.record.notes, None);

    let rows = beginning_position::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].begin_longitude, Some(-20.5));
}

#[tokio::test]
async fn phases_out_of_order_succeed_with_warnings() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    let saved = cast::save_on_deck(
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

    assert_eq!(saved.state, CastState::OnDeckRecorded);
    assert!(saved.warnings.iter().any(|w| w.contains(Stage::PreCast.label())));
    assert!(saved.warnings.iter().any(|w| w.contains(Stage::Ending.label())));

    let pre = cast::save_pre_cast(&db, cast_id, PreCastInput::default()).await.unwrap();
    assert!(pre.warnings.is_empty());
    // The furthest stage still decides the state
    assert_eq!(pre.state, CastState::OnDeckRecorded);
}

#[tokio::test]
async fn state_follows_recorded_phases() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(3)).await.unwrap().ctd_cast_log_id;

    let detail = cast::get_cast(&db, cast_id).await.unwrap();
    assert_eq!(detail.state, CastState::Created);
    assert_eq!(detail.next_stage, Some(Stage::PreCast));
    assert_eq!(detail.summary.cruise_name, "AB-24");
    assert_eq!(detail.summary.observer_name, "Test observer");

    cast::save_pre_cast(&db, cast_id, PreCastInput::default()).await.unwrap();
    let saved = cast::save_beginning_position(&db, cast_id, beginning(10.0, -20.0))
        .await
        .unwrap();
    assert!(saved.warnings.is_empty());
    assert_eq!(saved.state, CastState::BeginningPositionRecorded);

    let post = cast::save_post_cast(
        &db,
        cast_id,
        PostCastInput {
            deck_unit_off: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(post.state, CastState::PostCastRecorded);
    assert!(post.record.deck_unit_off_datetime.is_some());
    assert!(post.state.is_terminal());
}

#[tokio::test]
async fn station_must_belong_to_cruise() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;

    let other = ctd_log::reference::create_cruise(
        &db,
        ctd_log::reference::NewCruise {
            cruise_number: 25,
            cruise_name: "AB-25".into(),
            cruise_abbreviation: None,
        },
    )
    .await
    .unwrap();

    let mut new = voyage.new_cast(1);
    new.cruise_id = other.cruise_id;
    assert!(cast::create_cast(&db, new).await.unwrap_err().is_validation());

    let mut new = voyage.new_cast(1);
    new.ship_id = 9_999;
    assert!(cast::create_cast(&db, new).await.unwrap_err().is_not_found());

    let mut new = voyage.new_cast(0);
    new.notes = Some("bad number".into());
    assert!(cast::create_cast(&db, new).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn saving_a_phase_for_a_missing_cast_is_not_found() {
    let db = common::setup_db().await;
    let err = cast::save_pre_cast(&db, 42, PreCastInput::default()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_a_cast_keeps_reference_data() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    let cast_id = cast::create_cast(&db, voyage.new_cast(1)).await.unwrap().ctd_cast_log_id;

    cast::save_pre_cast(&db, cast_id, PreCastInput::default()).await.unwrap();
    cast::save_beginning_position(&db, cast_id, beginning(10.0, -20.0))
        .await
        .unwrap();
    for (i, niskin_id) in voyage.niskin_ids.iter().enumerate() {
        sampling::record_sample_capture(
            &db,
            cast_id,
            SampleCaptureInput {
                niskin_id: *niskin_id,
                target_depth_id: None,
                sample_pressure_value: 100.0 * (i as f64 + 1.0),
                sample_captured: true,
                sample_captured_datetime: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    let ships_before = ships::Entity::find().count(&db).await.unwrap();
    let types_before = sample_types::Entity::find().count(&db).await.unwrap();

    let removed = cast::delete_cast(&db, cast_id).await.unwrap();
    assert_eq!(removed.phase_records, 2);
    assert_eq!(removed.sample_pressures, 4);

    assert!(cast::get_cast(&db, cast_id).await.unwrap_err().is_not_found());
    assert_eq!(beginning_position::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(sample_pressure::Entity::find().count(&db).await.unwrap(), 0);

    assert_eq!(ships::Entity::find().count(&db).await.unwrap(), ships_before);
    assert_eq!(sample_types::Entity::find().count(&db).await.unwrap(), types_before);
    assert_eq!(niskin_bottles::Entity::find().count(&db).await.unwrap(), 4);

    assert!(cast::delete_cast(&db, cast_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn recent_casts_are_newest_first() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    for n in 1..=3 {
        cast::create_cast(&db, voyage.new_cast(n)).await.unwrap();
    }

    let recent = cast::list_recent_casts(&db, 2).await.unwrap();
    let numbers: Vec<i32> = recent.iter().map(|c| c.cast_number).collect();
    assert_eq!(numbers, vec![3, 2]);
}
