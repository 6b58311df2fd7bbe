//! Lookup data shared by every other component.

mod equipment;
mod vessels;

pub use equipment::*;
pub use vessels::*;

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    bottles, cruises, ctd_cast_log, niskin_bottles, roles, sample_types, sensor_inventory, ships, stations,
    users,
};
use crate::error::{AppError, AppResult};

/// Reference tables that carry an `active` flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Ships,
    Cruises,
    Stations,
    Sensors,
    Niskins,
    SampleTypes,
}

/// Activate or retire a reference row. Retired rows stay referenced by
/// historical casts but drop out of default listings.
pub async fn set_active(db: &DatabaseConnection, kind: ReferenceKind, id: i32, active: bool) -> AppResult<()> {
    let value = Expr::value(active);
    let result = match kind {
        ReferenceKind::Ships => {
            ships::Entity::update_many()
                .col_expr(ships::Column::Active, value)
                .filter(ships::Column::ShipId.eq(id))
                .exec(db)
                .await?
        }
        ReferenceKind::Cruises => {
            cruises::Entity::update_many()
                .col_expr(cruises::Column::Active, value)
                .filter(cruises::Column::CruiseId.eq(id))
                .exec(db)
                .await?
        }
        ReferenceKind::Stations => {
            stations::Entity::update_many()
                .col_expr(stations::Column::Active, value)
                .filter(stations::Column::StationId.eq(id))
                .exec(db)
                .await?
        }
        ReferenceKind::Sensors => {
            sensor_inventory::Entity::update_many()
                .col_expr(sensor_inventory::Column::Active, value)
                .filter(sensor_inventory::Column::SensorId.eq(id))
                .exec(db)
                .await?
        }
        ReferenceKind::Niskins => {
            niskin_bottles::Entity::update_many()
                .col_expr(niskin_bottles::Column::Active, value)
                .filter(niskin_bottles::Column::NiskinId.eq(id))
                .exec(db)
                .await?
        }
        ReferenceKind::SampleTypes => {
            sample_types::Entity::update_many()
                .col_expr(sample_types::Column::Active, value)
                .filter(sample_types::Column::SampleTypeId.eq(id))
                .exec(db)
                .await?
        }
    };

    if result.rows_affected == 0 {
        return Err(AppError::not_found(format!("{kind:?} {id} not found")));
    }
    tracing::info!(?kind, id, active, "reference_active_changed");
    Ok(())
}

pub async fn list_roles(db: &DatabaseConnection) -> AppResult<Vec<roles::Model>> {
    Ok(roles::Entity::find()
        .order_by_asc(roles::Column::RoleName)
        .all(db)
        .await?)
}

/// Entities reachable through free-text search. Each target filters on a
/// single fixed column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchTarget {
    Users,
    Ships,
    Cruises,
    Stations,
    Casts,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SearchHit {
    pub id: i32,
    pub label: String,
}

pub const DEFAULT_SEARCH_LIMIT: u64 = 20;
const MAX_SEARCH_LIMIT: u64 = 100;

/// Escape `%`, `_` and the backslash so they match literally under `ESCAPE '\'`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\')
}

pub async fn search(
    db: &DatabaseConnection,
    target: SearchTarget,
    term: &str,
    limit: u64,
) -> AppResult<Vec<SearchHit>> {
    let term = term.trim();
    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);

    let hits = match target {
        SearchTarget::Users => users::Entity::find()
            .filter(users::Column::Username.like(contains_pattern(term)))
            .order_by_asc(users::Column::Username)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|u| SearchHit {
                id: u.user_id,
                label: format!("{} ({})", u.username, u.full_name()),
            })
            .collect(),
        SearchTarget::Ships => ships::Entity::find()
            .filter(ships::Column::ShipName.like(contains_pattern(term)))
            .order_by_asc(ships::Column::ShipName)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|s| SearchHit {
                id: s.ship_id,
                label: s.ship_name,
            })
            .collect(),
        SearchTarget::Cruises => cruises::Entity::find()
            .filter(cruises::Column::CruiseName.like(contains_pattern(term)))
            .order_by_asc(cruises::Column::CruiseName)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|c| SearchHit {
                id: c.cruise_id,
                label: c.cruise_name,
            })
            .collect(),
        SearchTarget::Stations => stations::Entity::find()
            .filter(stations::Column::StationName.like(contains_pattern(term)))
            .order_by_asc(stations::Column::StationName)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|s| SearchHit {
                id: s.station_id,
                label: format!("{} ({})", s.station_name, s.station_number),
            })
            .collect(),
        SearchTarget::Casts => ctd_cast_log::Entity::find()
            .filter(ctd_cast_log::Column::Notes.like(contains_pattern(term)))
            .order_by_desc(ctd_cast_log::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?
            .into_iter()
            .map(|c| SearchHit {
                id: c.ctd_cast_log_id,
                label: format!("Cast #{} on {}", c.cast_number, c.cast_date),
            })
            .collect(),
    };

    Ok(hits)
}

/// Row counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DatabaseStats {
    pub users: u64,
    pub casts: u64,
    pub bottles: u64,
    pub ships: u64,
    pub cruises: u64,
    pub stations: u64,
}

pub async fn stats(db: &DatabaseConnection) -> AppResult<DatabaseStats> {
    Ok(DatabaseStats {
        users: users::Entity::find()
            .filter(users::Column::Active.eq(true))
            .count(db)
            .await?,
        casts: ctd_cast_log::Entity::find().count(db).await?,
        bottles: bottles::Entity::find().count(db).await?,
        ships: ships::Entity::find()
            .filter(ships::Column::Active.eq(true))
            .count(db)
            .await?,
        cruises: cruises::Entity::find()
            .filter(cruises::Column::Active.eq(true))
            .count(db)
            .await?,
        stations: stations::Entity::find()
            .filter(stations::Column::Active.eq(true))
            .count(db)
            .await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_targets_are_a_closed_set() {
        let parsed: SearchTarget = serde_json::from_str("\"stations\"").unwrap();
        assert_eq!(parsed, SearchTarget::Stations);
        assert!(serde_json::from_str::<SearchTarget>("\"user_roles\"").is_err());
    }

    #[test]
    fn search_terms_match_wildcards_literally() {
        assert_eq!(escape_like("STN_1"), "STN\\_1");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("teth"), "teth");
    }

    #[test]
    fn reference_kinds_use_path_names() {
        let parsed: ReferenceKind = serde_json::from_str("\"sample-types\"").unwrap();
        assert_eq!(parsed, ReferenceKind::SampleTypes);
    }
}
