//! Sensors, Niskin bottles and sample types.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::entity::niskin_bottles::{self, NiskinStatus};
use crate::entity::sample_types;
use crate::entity::sensor_inventory::{self, SensorStatus};
use crate::error::{AppError, AppResult};
use crate::validation::{optional_text, positive, required_text};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSensor {
    pub sensor_type: String,
    pub vin_number: Option<String>,
    pub status: Option<SensorStatus>,
    #[serde(default)]
    pub backup_available: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewNiskin {
    pub niskin_number: i32,
    pub status: Option<NiskinStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewSampleType {
    pub type_name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
}

pub async fn create_sensor(db: &DatabaseConnection, new: NewSensor) -> AppResult<sensor_inventory::Model> {
    let sensor = sensor_inventory::ActiveModel {
        sensor_type: Set(required_text("sensor_type", &new.sensor_type)?),
        vin_number: Set(optional_text(new.vin_number)),
        status: Set(new.status.unwrap_or(SensorStatus::Operational)),
        in_use: Set(false),
        backup_available: Set(new.backup_available),
        active: Set(true),
        notes: Set(optional_text(new.notes)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("vin_number"))?;

    tracing::info!(sensor_id = sensor.sensor_id, sensor_type = %sensor.sensor_type, "sensor_created");
    Ok(sensor)
}

pub async fn list_sensors(db: &DatabaseConnection, include_inactive: bool) -> AppResult<Vec<sensor_inventory::Model>> {
    let mut query = sensor_inventory::Entity::find();
    if !include_inactive {
        query = query.filter(sensor_inventory::Column::Active.eq(true));
    }
    Ok(query
        .order_by_asc(sensor_inventory::Column::SensorType)
        .order_by_asc(sensor_inventory::Column::SensorId)
        .all(db)
        .await?)
}

/// Sensors that can be mounted on a package right now.
pub async fn list_available_sensors(db: &DatabaseConnection) -> AppResult<Vec<sensor_inventory::Model>> {
    Ok(sensor_inventory::Entity::find()
        .filter(sensor_inventory::Column::Status.eq(SensorStatus::Operational))
        .filter(sensor_inventory::Column::Active.eq(true))
        .order_by_asc(sensor_inventory::Column::SensorType)
        .all(db)
        .await?)
}

pub async fn get_sensor(db: &DatabaseConnection, sensor_id: i32) -> AppResult<sensor_inventory::Model> {
    sensor_inventory::Entity::find_by_id(sensor_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sensor {sensor_id} not found")))
}

pub async fn set_sensor_status(
    db: &DatabaseConnection,
    sensor_id: i32,
    status: SensorStatus,
) -> AppResult<sensor_inventory::Model> {
    let mut am: sensor_inventory::ActiveModel = get_sensor(db, sensor_id).await?.into();
    am.status = Set(status);
    let sensor = am.update(db).await?;

    tracing::info!(sensor_id, status = ?status, "sensor_status_changed");
    Ok(sensor)
}

pub async fn create_niskin(db: &DatabaseConnection, new: NewNiskin) -> AppResult<niskin_bottles::Model> {
    let niskin = niskin_bottles::ActiveModel {
        niskin_number: Set(positive("niskin_number", new.niskin_number)?),
        active: Set(true),
        status: Set(new.status.unwrap_or(NiskinStatus::Ready)),
        notes: Set(optional_text(new.notes)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("niskin_number"))?;

    tracing::info!(niskin_id = niskin.niskin_id, niskin_number = niskin.niskin_number, "niskin_created");
    Ok(niskin)
}

/// Niskins ordered by their rosette number.
pub async fn list_niskins(db: &DatabaseConnection, include_inactive: bool) -> AppResult<Vec<niskin_bottles::Model>> {
    let mut query = niskin_bottles::Entity::find();
    if !include_inactive {
        query = query.filter(niskin_bottles::Column::Active.eq(true));
    }
    Ok(query.order_by_asc(niskin_bottles::Column::NiskinNumber).all(db).await?)
}

pub async fn get_niskin(db: &DatabaseConnection, niskin_id: i32) -> AppResult<niskin_bottles::Model> {
    niskin_bottles::Entity::find_by_id(niskin_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Niskin bottle {niskin_id} not found")))
}

pub async fn set_niskin_status(
    db: &DatabaseConnection,
    niskin_id: i32,
    status: NiskinStatus,
) -> AppResult<niskin_bottles::Model> {
    let mut am: niskin_bottles::ActiveModel = get_niskin(db, niskin_id).await?.into();
    am.status = Set(status);
    let niskin = am.update(db).await?;

    tracing::info!(niskin_id, status = ?status, "niskin_status_changed");
    Ok(niskin)
}

pub async fn create_sample_type(db: &DatabaseConnection, new: NewSampleType) -> AppResult<sample_types::Model> {
    let sample_type = sample_types::ActiveModel {
        type_name: Set(required_text("type_name", &new.type_name)?),
        abbreviation: Set(optional_text(new.abbreviation)),
        description: Set(optional_text(new.description)),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_unique("type_name"))?;

    tracing::info!(sample_type_id = sample_type.sample_type_id, type_name = %sample_type.type_name, "sample_type_created");
    Ok(sample_type)
}

pub async fn list_sample_types(db: &DatabaseConnection, include_inactive: bool) -> AppResult<Vec<sample_types::Model>> {
    let mut query = sample_types::Entity::find();
    if !include_inactive {
        query = query.filter(sample_types::Column::Active.eq(true));
    }
    Ok(query.order_by_asc(sample_types::Column::TypeName).all(db).await?)
}

pub async fn get_sample_type(db: &DatabaseConnection, sample_type_id: i32) -> AppResult<sample_types::Model> {
    sample_types::Entity::find_by_id(sample_type_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sample type {sample_type_id} not found")))
}
