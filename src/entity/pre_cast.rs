use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Deck checks before the package goes over the side.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "pre_cast")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub pre_cast_id: i32,
    #[sea_orm(unique)]
    pub cast_log_id: i32,
    pub pre_cast_pressure_test: Option<f64>,
    pub pre_cast_datetime: Option<DateTime<Utc>>,
    pub pre_cast_latitude: Option<f64>,
    pub pre_cast_longitude: Option<f64>,
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
