use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Readings at the bottom of the cast.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bottom_depth_position")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub bottom_position_id: i32,
    #[sea_orm(unique)]
    pub cast_log_id: i32,
    pub bottom_datetime: Option<DateTime<Utc>>,
    pub bottom_latitude: Option<f64>,
    pub bottom_longitude: Option<f64>,
    pub height_above_bottom: Option<f64>,
    pub max_pressure: Option<f64>,
    pub winch_payout: Option<f64>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
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
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
