use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One Niskin firing during a cast. Rows are append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sample_pressure")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sample_pressure_id: i32,
    pub cast_log_id: i32,
    pub niskin_id: i32,
    pub target_depth_id: Option<i32>,
    pub sample_pressure_value: f64,
    pub sample_captured: bool,
    pub sample_captured_datetime: Option<DateTime<Utc>>,
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
        belongs_to = "super::niskin_bottles::Entity",
        from = "Column::NiskinId",
        to = "super::niskin_bottles::Column::NiskinId"
    )]
    Niskin,
    #[sea_orm(
        belongs_to = "super::station_target_depths::Entity",
        from = "Column::TargetDepthId",
        to = "super::station_target_depths::Column::TargetDepthId",
        on_delete = "SetNull"
    )]
    TargetDepth,
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cast.def()
    }
}

impl Related<super::niskin_bottles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Niskin.def()
    }
}

impl Related<super::station_target_depths::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetDepth.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
