use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ship position when the cast begins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "beginning_position")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub begin_id: i32,
    #[sea_orm(unique)]
    pub cast_log_id: i32,
    pub begin_datetime: Option<DateTime<Utc>>,
    pub begin_latitude: Option<f64>,
    pub begin_longitude: Option<f64>,
    pub begin_depth: Option<f64>,
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
