use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bottle_replacements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub replacement_id: i32,
    pub original_bottle_id: i32,
    pub replacement_bottle_id: i32,
    pub replacement_datetime: DateTime<Utc>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bottles::Entity",
        from = "Column::OriginalBottleId",
        to = "super::bottles::Column::BottleId"
    )]
    Original,
    #[sea_orm(
        belongs_to = "super::bottles::Entity",
        from = "Column::ReplacementBottleId",
        to = "super::bottles::Column::BottleId"
    )]
    Replacement,
}

impl ActiveModelBehavior for ActiveModel {}
