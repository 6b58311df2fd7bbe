use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One planned sampling pressure for a station.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "station_target_depths")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub target_depth_id: i32,
    pub station_id: i32,
    pub target_pressure: f64,
    pub sequence_order: i32,
    /// Suggested niskin position for this depth
    pub niskin_position: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stations::Entity",
        from = "Column::StationId",
        to = "super::stations::Column::StationId",
        on_delete = "Cascade"
    )]
    Station,
    #[sea_orm(has_many = "super::sample_pressure::Entity")]
    SamplePressures,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl Related<super::sample_pressure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SamplePressures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
