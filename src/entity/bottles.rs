use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a sample bottle. Moves forward one step at a time.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum BottleStatus {
    #[sea_orm(string_value = "empty")]
    Empty,
    #[sea_orm(string_value = "filled")]
    Filled,
    #[sea_orm(string_value = "processed")]
    Processed,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl BottleStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Filled => "filled",
            Self::Processed => "processed",
            Self::Archived => "archived",
        }
    }

    /// The only status this one may advance to.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Empty => Some(Self::Filled),
            Self::Filled => Some(Self::Processed),
            Self::Processed => Some(Self::Archived),
            Self::Archived => None,
        }
    }

    #[must_use]
    pub fn can_become(self, target: Self) -> bool {
        target == self || self.next() == Some(target)
    }
}

impl std::fmt::Display for BottleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "bottles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub bottle_id: i32,
    pub niskin_id: i32,
    pub sample_type_id: i32,
    pub bottle_number: i32,
    pub is_duplicate: bool,
    pub duplicate_sequence: Option<i32>,
    pub capacity_ml: Option<i32>,
    pub status: BottleStatus,
    pub collected_datetime: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::niskin_bottles::Entity",
        from = "Column::NiskinId",
        to = "super::niskin_bottles::Column::NiskinId"
    )]
    Niskin,
    #[sea_orm(
        belongs_to = "super::sample_types::Entity",
        from = "Column::SampleTypeId",
        to = "super::sample_types::Column::SampleTypeId"
    )]
    SampleType,
}

impl Related<super::niskin_bottles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Niskin.def()
    }
}

impl Related<super::sample_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::BottleStatus;

    #[test]
    fn status_only_moves_one_step_forward() {
        assert!(BottleStatus::Empty.can_become(BottleStatus::Filled));
        assert!(BottleStatus::Filled.can_become(BottleStatus::Filled));
        assert!(!BottleStatus::Empty.can_become(BottleStatus::Processed));
        assert!(!BottleStatus::Processed.can_become(BottleStatus::Filled));
        assert_eq!(BottleStatus::Archived.next(), None);
    }
}
