use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate root of a CTD cast. Every phase record hangs off `ctd_cast_log_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ctd_cast_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ctd_cast_log_id: i32,
    pub ship_id: i32,
    pub station_id: i32,
    pub cruise_id: i32,
    pub observer_user_id: i32,
    pub cast_number: i32,
    pub cast_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ships::Entity",
        from = "Column::ShipId",
        to = "super::ships::Column::ShipId"
    )]
    Ship,
    #[sea_orm(
        belongs_to = "super::stations::Entity",
        from = "Column::StationId",
        to = "super::stations::Column::StationId"
    )]
    Station,
    #[sea_orm(
        belongs_to = "super::cruises::Entity",
        from = "Column::CruiseId",
        to = "super::cruises::Column::CruiseId"
    )]
    Cruise,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ObserverUserId",
        to = "super::users::Column::UserId"
    )]
    Observer,
    #[sea_orm(has_many = "super::cast_sensors::Entity")]
    CastSensors,
    #[sea_orm(has_many = "super::sample_pressure::Entity")]
    SamplePressures,
    #[sea_orm(has_many = "super::sampling_session::Entity")]
    SamplingSessions,
    #[sea_orm(has_one = "super::pre_cast::Entity")]
    PreCast,
    #[sea_orm(has_one = "super::beginning_position::Entity")]
    BeginningPosition,
    #[sea_orm(has_one = "super::at_depth_position::Entity")]
    AtDepthPosition,
    #[sea_orm(has_one = "super::capture_start::Entity")]
    CaptureStart,
    #[sea_orm(has_one = "super::bottom_depth_position::Entity")]
    BottomDepthPosition,
    #[sea_orm(has_one = "super::ending_position::Entity")]
    EndingPosition,
    #[sea_orm(has_one = "super::on_deck_position::Entity")]
    OnDeckPosition,
    #[sea_orm(has_one = "super::post_cast::Entity")]
    PostCast,
}

impl Related<super::ships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ship.def()
    }
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl Related<super::cruises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cruise.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Observer.def()
    }
}

impl Related<super::cast_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CastSensors.def()
    }
}

impl Related<super::sample_pressure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SamplePressures.def()
    }
}

impl Related<super::sampling_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SamplingSessions.def()
    }
}

impl Related<super::pre_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PreCast.def()
    }
}

impl Related<super::beginning_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BeginningPosition.def()
    }
}

impl Related<super::at_depth_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AtDepthPosition.def()
    }
}

impl Related<super::capture_start::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaptureStart.def()
    }
}

impl Related<super::bottom_depth_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BottomDepthPosition.def()
    }
}

impl Related<super::ending_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EndingPosition.def()
    }
}

impl Related<super::on_deck_position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OnDeckPosition.def()
    }
}

impl Related<super::post_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostCast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
