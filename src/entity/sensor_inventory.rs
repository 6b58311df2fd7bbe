use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[sea_orm(string_value = "operational")]
    Operational,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "broken")]
    Broken,
    #[sea_orm(string_value = "retired")]
    Retired,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sensor_inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sensor_id: i32,
    pub sensor_type: String,
    #[sea_orm(unique)]
    pub vin_number: Option<String>,
    pub status: SensorStatus,
    pub in_use: bool,
    pub backup_available: bool,
    pub active: bool,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cast_sensors::Entity")]
    CastSensors,
}

impl Related<super::cast_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CastSensors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
