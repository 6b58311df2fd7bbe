use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ship_id: i32,
    #[sea_orm(unique)]
    pub ship_name: String,
    #[sea_orm(unique)]
    pub ship_number: Option<i32>,
    pub ship_abbreviation: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ctd_cast_log::Entity")]
    Casts,
}

impl Related<super::ctd_cast_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Casts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
