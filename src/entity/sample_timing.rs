use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Processing deadline for one sample type within a sampling session.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sample_timing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub timing_id: i32,
    pub sample_type_id: i32,
    pub session_id: i32,
    pub set_by_user_id: i32,
    pub time_limit_hours: i32,
    pub deadline_datetime: DateTime<Utc>,
    pub set_datetime: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sampling_session::Entity",
        from = "Column::SessionId",
        to = "super::sampling_session::Column::SessionId",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::sample_types::Entity",
        from = "Column::SampleTypeId",
        to = "super::sample_types::Column::SampleTypeId"
    )]
    SampleType,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SetByUserId",
        to = "super::users::Column::UserId"
    )]
    SetBy,
}

impl Related<super::sampling_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::sample_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
