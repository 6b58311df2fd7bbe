use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum NiskinStatus {
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "deployed")]
    Deployed,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "broken")]
    Broken,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "niskin_bottles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub niskin_id: i32,
    #[sea_orm(unique)]
    pub niskin_number: i32,
    pub active: bool,
    pub status: NiskinStatus,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sample_pressure::Entity")]
    SamplePressures,
    #[sea_orm(has_many = "super::bottles::Entity")]
    Bottles,
}

impl Related<super::sample_pressure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SamplePressures.def()
    }
}

impl Related<super::bottles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bottles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
