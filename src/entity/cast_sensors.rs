use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cast_sensors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cast_sensor_id: i32,
    pub cast_log_id: i32,
    pub sensor_id: i32,
    pub position_order: i32,
    pub sequence_number: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ctd_cast_log::Entity",
        from = "Column::CastLogId",
        to = "super::ctd_cast_log::Column::CtdCastLogId",
        on_delete = "Cascade"
    )]
    Cast,
    #[sea_orm(
        belongs_to = "super::sensor_inventory::Entity",
        from = "Column::SensorId",
        to = "super::sensor_inventory::Column::SensorId"
    )]
    Sensor,
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cast.def()
    }
}

impl Related<super::sensor_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
