use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cruises")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cruise_id: i32,
    pub cruise_number: i32,
    pub cruise_name: String,
    pub cruise_abbreviation: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stations::Entity")]
    Stations,
    #[sea_orm(has_many = "super::ctd_cast_log::Entity")]
    Casts,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stations.def()
    }
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Casts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
