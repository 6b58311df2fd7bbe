use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "sample_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sample_type_id: i32,
    #[sea_orm(unique)]
    pub type_name: String,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bottles::Entity")]
    Bottles,
}

impl Related<super::bottles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bottles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
