use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Window during which bottles are drawn from the Niskins of a recovered cast.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sampling_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub session_id: i32,
    pub ctd_cast_log_id: i32,
    pub on_deck_position_id: Option<i32>,
    pub sampling_start_datetime: DateTime<Utc>,
    pub sampling_end_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::on_deck_position::Entity",
        from = "Column::OnDeckPositionId",
        to = "super::on_deck_position::Column::OnDeckId",
        on_delete = "SetNull"
    )]
    OnDeck,
    #[sea_orm(has_many = "super::sample_timing::Entity")]
    Timings,
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cast.def()
    }
}

impl Related<super::sample_timing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
