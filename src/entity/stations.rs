use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub station_id: i32,
    pub cruise_id: i32,
    /// Sequence label, unique within the cruise
    pub station_number: String,
    pub station_name: String,
    pub station_abbreviation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cruises::Entity",
        from = "Column::CruiseId",
        to = "super::cruises::Column::CruiseId"
    )]
    Cruise,
    #[sea_orm(has_many = "super::station_target_depths::Entity")]
    TargetDepths,
    #[sea_orm(has_many = "super::ctd_cast_log::Entity")]
    Casts,
}

impl Related<super::cruises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cruise.def()
    }
}

impl Related<super::station_target_depths::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetDepths.def()
    }
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Casts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
