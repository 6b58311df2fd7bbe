use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shutdown checklist after the cast.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "post_cast")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub post_cast_id: i32,
    #[sea_orm(unique)]
    pub ctd_cast_log_id: i32,
    pub post_cast_pressure_check: Option<f64>,
    pub real_time_data_stop: bool,
    pub real_time_data_stop_datetime: Option<DateTime<Utc>>,
    pub deck_unit_off: bool,
    pub deck_unit_off_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ctd_cast_log::Entity",
        from = "Column::CtdCastLogId",
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
