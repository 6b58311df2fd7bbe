use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The closed set of roles a crew member can hold.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "bottlecop")]
    Bottlecop,
    #[sea_orm(string_value = "console")]
    Console,
    #[sea_orm(string_value = "observer")]
    Observer,
    #[sea_orm(string_value = "analyst")]
    Analyst,
    #[sea_orm(string_value = "sampler")]
    Sampler,
}

impl RoleName {
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::Bottlecop,
        Self::Console,
        Self::Observer,
        Self::Analyst,
        Self::Sampler,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Bottlecop => "bottlecop",
            Self::Console => "console",
            Self::Observer => "observer",
            Self::Analyst => "analyst",
            Self::Sampler => "sampler",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role '{s}'"))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub role_id: i32,
    #[sea_orm(unique)]
    pub role_name: RoleName,
    pub role_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_roles::Entity")]
    UserRoles,
}

impl Related<super::user_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_names_case_insensitively() {
        assert_eq!("Bottlecop".parse::<RoleName>(), Ok(RoleName::Bottlecop));
        assert_eq!(" observer ".parse::<RoleName>(), Ok(RoleName::Observer));
        assert!("captain".parse::<RoleName>().is_err());
    }

    #[test]
    fn display_matches_stored_value() {
        for role in RoleName::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
