//! Ships, cruises, stations and their planned sampling depths.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entity::{cruises, ships, station_target_depths, stations};
use crate::error::{AppError, AppResult};
use crate::validation::{
    non_negative, optional_latitude, optional_longitude, optional_positive, optional_text, positive,
    required_text,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewShip {
    pub ship_name: String,
    pub ship_number: Option<i32>,
    pub ship_abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCruise {
    pub cruise_number: i32,
    pub cruise_name: String,
    pub cruise_abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewStation {
    pub cruise_id: i32,
    /// Sequence label, unique within the cruise
    pub station_number: String,
    pub station_name: String,
    pub station_abbreviation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTargetDepth {
    pub target_pressure: f64,
    pub sequence_order: i32,
    pub niskin_position: Option<i32>,
    pub notes: Option<String>,
}

pub async fn create_ship(db: &DatabaseConnection, new: NewShip) -> AppResult<ships::Model> {
    let ship = ships::ActiveModel {
        ship_name: Set(required_text("ship_name", &new.ship_name)?),
        ship_number: Set(optional_positive("ship_number", new.ship_number)?),
        ship_abbreviation: Set(optional_text(new.ship_abbreviation)),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("ship_name"))?;

    tracing::info!(ship_id = ship.ship_id, ship_name = %ship.ship_name, "ship_created");
    Ok(ship)
}

pub async fn list_ships(db: &DatabaseConnection, include_inactive: bool) -> AppResult<Vec<ships::Model>> {
    let mut query = ships::Entity::find();
    if !include_inactive {
        query = query.filter(ships::Column::Active.eq(true));
    }
    Ok(query.order_by_asc(ships::Column::ShipName).all(db).await?)
}

pub async fn get_ship(db: &DatabaseConnection, ship_id: i32) -> AppResult<ships::Model> {
    ships::Entity::find_by_id(ship_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ship {ship_id} not found")))
}

pub async fn create_cruise(db: &DatabaseConnection, new: NewCruise) -> AppResult<cruises::Model> {
    let cruise = cruises::ActiveModel {
        cruise_number: Set(positive("cruise_number", new.cruise_number)?),
        cruise_name: Set(required_text("cruise_name", &new.cruise_name)?),
        cruise_abbreviation: Set(optional_text(new.cruise_abbreviation)),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(cruise_id = cruise.cruise_id, cruise_name = %cruise.cruise_name, "cruise_created");
    Ok(cruise)
}

pub async fn list_cruises(db: &DatabaseConnection, include_inactive: bool) -> AppResult<Vec<cruises::Model>> {
    let mut query = cruises::Entity::find();
    if !include_inactive {
        query = query.filter(cruises::Column::Active.eq(true));
    }
    Ok(query.order_by_asc(cruises::Column::CruiseName).all(db).await?)
}

pub async fn get_cruise(db: &DatabaseConnection, cruise_id: i32) -> AppResult<cruises::Model> {
    cruises::Entity::find_by_id(cruise_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Cruise {cruise_id} not found")))
}

pub async fn create_station(db: &DatabaseConnection, new: NewStation) -> AppResult<stations::Model> {
    let station_number = required_text("station_number", &new.station_number)?;
    let station_name = required_text("station_name", &new.station_name)?;
    let latitude = optional_latitude("latitude", new.latitude)?;
    let longitude = optional_longitude("longitude", new.longitude)?;
    get_cruise(db, new.cruise_id).await?;

    let station = stations::ActiveModel {
        cruise_id: Set(new.cruise_id),
        station_number: Set(station_number),
        station_name: Set(station_name),
        station_abbreviation: Set(optional_text(new.station_abbreviation)),
        latitude: Set(latitude),
        longitude: Set(longitude),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("station_number"))?;

    tracing::info!(
        station_id = station.station_id,
        cruise_id = station.cruise_id,
        station_number = %station.station_number,
        "station_created"
    );
    Ok(station)
}

/// Stations ordered by name, optionally narrowed to one cruise.
pub async fn list_stations(
    db: &DatabaseConnection,
    cruise_id: Option<i32>,
    include_inactive: bool,
) -> AppResult<Vec<stations::Model>> {
    let mut query = stations::Entity::find();
    if let Some(cruise_id) = cruise_id {
        query = query.filter(stations::Column::CruiseId.eq(cruise_id));
    }
    if !include_inactive {
        query = query.filter(stations::Column::Active.eq(true));
    }
    Ok(query.order_by_asc(stations::Column::StationName).all(db).await?)
}

pub async fn get_station(db: &DatabaseConnection, station_id: i32) -> AppResult<stations::Model> {
    stations::Entity::find_by_id(station_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Station {station_id} not found")))
}

pub async fn add_target_depth(
    db: &DatabaseConnection,
    station_id: i32,
    new: NewTargetDepth,
) -> AppResult<station_target_depths::Model> {
    let target_pressure = non_negative("target_pressure", new.target_pressure)?;
    let sequence_order = positive("sequence_order", new.sequence_order)?;
    let niskin_position = optional_positive("niskin_position", new.niskin_position)?;
    get_station(db, station_id).await?;

    let depth = station_target_depths::ActiveModel {
        station_id: Set(station_id),
        target_pressure: Set(target_pressure),
        sequence_order: Set(sequence_order),
        niskin_position: Set(niskin_position),
        notes: Set(optional_text(new.notes)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("sequence_order"))?;

    tracing::info!(
        station_id,
        target_depth_id = depth.target_depth_id,
        target_pressure,
        sequence_order,
        "target_depth_added"
    );
    Ok(depth)
}

/// The sampling plan of a station in sequence order.
pub async fn list_target_depths(
    db: &DatabaseConnection,
    station_id: i32,
) -> AppResult<Vec<station_target_depths::Model>> {
    get_station(db, station_id).await?;
    Ok(station_target_depths::Entity::find()
        .filter(station_target_depths::Column::StationId.eq(station_id))
        .order_by_asc(station_target_depths::Column::SequenceOrder)
        .all(db)
        .await?)
}
