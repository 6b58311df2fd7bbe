//! Sample bottles drawn from Niskins, their status and replacement audit.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cast;
use crate::entity::bottles::{self, BottleStatus};
use crate::entity::{bottle_replacements, niskin_bottles, sample_pressure, sample_types};
use crate::error::{AppError, AppResult};
use crate::reference;
use crate::validation::{optional_positive, optional_text, positive};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBottle {
    pub niskin_id: i32,
    pub sample_type_id: i32,
    pub bottle_number: i32,
    #[serde(default)]
    pub is_duplicate: bool,
    pub duplicate_sequence: Option<i32>,
    pub capacity_ml: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BottleReplacementInput {
    pub replacement_bottle_id: i32,
    pub replacement_datetime: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// A bottle with the Niskin and sample type it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BottleDetail {
    #[serde(flatten)]
    pub bottle: bottles::Model,
    pub niskin_number: i32,
    pub type_name: String,
    pub abbreviation: Option<String>,
}

pub async fn get_bottle(db: &DatabaseConnection, bottle_id: i32) -> AppResult<bottles::Model> {
    bottles::Entity::find_by_id(bottle_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bottle {bottle_id} not found")))
}

/// New bottles always start out empty.
pub async fn create_bottle(db: &DatabaseConnection, new: NewBottle) -> AppResult<bottles::Model> {
    let bottle_number = positive("bottle_number", new.bottle_number)?;
    let capacity_ml = optional_positive("capacity_ml", new.capacity_ml)?;
    let duplicate_sequence = optional_positive("duplicate_sequence", new.duplicate_sequence)?;
    if duplicate_sequence.is_some() && !new.is_duplicate {
        return Err(AppError::invalid(
            "duplicate_sequence",
            "only duplicate bottles carry a duplicate sequence",
        ));
    }

    reference::get_niskin(db, new.niskin_id).await?;
    reference::get_sample_type(db, new.sample_type_id).await?;

    let bottle = bottles::ActiveModel {
        niskin_id: Set(new.niskin_id),
        sample_type_id: Set(new.sample_type_id),
        bottle_number: Set(bottle_number),
        is_duplicate: Set(new.is_duplicate),
        duplicate_sequence: Set(duplicate_sequence),
        capacity_ml: Set(capacity_ml),
        status: Set(BottleStatus::Empty),
        collected_datetime: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        bottle_id = bottle.bottle_id,
        niskin_id = bottle.niskin_id,
        sample_type_id = bottle.sample_type_id,
        "bottle_created"
    );
    Ok(bottle)
}

/// Move a bottle one step along empty, filled, processed, archived.
///
/// Setting the current status again is a no-op. Skipping ahead or going
/// back is rejected.
pub async fn update_bottle_status(
    db: &DatabaseConnection,
    bottle_id: i32,
    status: BottleStatus,
) -> AppResult<bottles::Model> {
    let bottle = get_bottle(db, bottle_id).await?;

    if bottle.status == status {
        return Ok(bottle);
    }
    if !bottle.status.can_become(status) {
        let message = match bottle.status.next() {
            Some(next) => format!("a {} bottle can only become {next}", bottle.status),
            None => format!("a {} bottle cannot change status", bottle.status),
        };
        return Err(AppError::invalid("status", message));
    }

    let previous = bottle.status;
    let mut am: bottles::ActiveModel = bottle.into();
    am.status = Set(status);
    if status == BottleStatus::Filled {
        am.collected_datetime = Set(Some(Utc::now()));
    }
    let bottle = am.update(db).await?;

    tracing::info!(bottle_id, from = %previous, to = %status, "bottle_status_advanced");
    Ok(bottle)
}

/// Record that `original_id` was swapped out. Neither bottle is modified.
pub async fn replace_bottle(
    db: &DatabaseConnection,
    original_id: i32,
    input: BottleReplacementInput,
) -> AppResult<bottle_replacements::Model> {
    if original_id == input.replacement_bottle_id {
        return Err(AppError::invalid(
            "replacement_bottle_id",
            "a bottle cannot replace itself",
        ));
    }
    get_bottle(db, original_id).await?;
    get_bottle(db, input.replacement_bottle_id).await?;

    let replacement = bottle_replacements::ActiveModel {
        original_bottle_id: Set(original_id),
        replacement_bottle_id: Set(input.replacement_bottle_id),
        replacement_datetime: Set(input.replacement_datetime.unwrap_or_else(Utc::now)),
        reason: Set(optional_text(input.reason)),
        notes: Set(optional_text(input.notes)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        original_bottle_id = original_id,
        replacement_bottle_id = input.replacement_bottle_id,
        "bottle_replaced"
    );
    Ok(replacement)
}

/// Replacements where the bottle was either the original or the substitute.
pub async fn list_replacements(
    db: &DatabaseConnection,
    bottle_id: i32,
) -> AppResult<Vec<bottle_replacements::Model>> {
    get_bottle(db, bottle_id).await?;
    Ok(bottle_replacements::Entity::find()
        .filter(
            bottle_replacements::Column::OriginalBottleId
                .eq(bottle_id)
                .or(bottle_replacements::Column::ReplacementBottleId.eq(bottle_id)),
        )
        .order_by_asc(bottle_replacements::Column::ReplacementDatetime)
        .order_by_asc(bottle_replacements::Column::ReplacementId)
        .all(db)
        .await?)
}

/// Bottles drawn from any Niskin that was fired on the cast.
pub async fn bottles_for_cast(db: &DatabaseConnection, cast_id: i32) -> AppResult<Vec<BottleDetail>> {
    cast::find_cast(db, cast_id).await?;

    let sampled_niskins: Vec<i32> = sample_pressure::Entity::find()
        .select_only()
        .column(sample_pressure::Column::NiskinId)
        .distinct()
        .filter(sample_pressure::Column::CastLogId.eq(cast_id))
        .into_tuple()
        .all(db)
        .await?;

    let rows = bottles::Entity::find()
        .filter(bottles::Column::NiskinId.is_in(sampled_niskins))
        .find_also_related(sample_types::Entity)
        .all(db)
        .await?;

    let niskin_numbers: HashMap<i32, i32> = niskin_bottles::Entity::find()
        .filter(niskin_bottles::Column::NiskinId.is_in(rows.iter().map(|(b, _)| b.niskin_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|n| (n.niskin_id, n.niskin_number))
        .collect();

    let mut details: Vec<BottleDetail> = rows
        .into_iter()
        .filter_map(|(bottle, sample_type)| {
            let sample_type = sample_type?;
            let niskin_number = *niskin_numbers.get(&bottle.niskin_id)?;
            Some(BottleDetail {
                bottle,
                niskin_number,
                type_name: sample_type.type_name,
                abbreviation: sample_type.abbreviation,
            })
        })
        .collect();

    details.sort_by_key(|d| (d.niskin_number, d.bottle.bottle_number, d.bottle.bottle_id));
    Ok(details)
}
