//! User administration.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use super::password::hash_password;
use crate::config::Config;
use crate::entity::roles::{self, RoleName};
use crate::entity::{ctd_cast_log, sample_timing, user_roles, users};
use crate::error::{AppError, AppResult};
use crate::validation::required_text;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<RoleName>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub user_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub active: bool,
    pub roles: Vec<RoleName>,
}

impl UserSummary {
    fn new(user: users::Model, roles: impl IntoIterator<Item = RoleName>) -> Self {
        let roles: BTreeSet<_> = roles.into_iter().collect();
        Self {
            full_name: user.full_name(),
            user_id: user.user_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            active: user.active,
            roles: roles.into_iter().collect(),
        }
    }
}

async fn find_user<C: ConnectionTrait>(db: &C, user_id: i32) -> AppResult<users::Model> {
    users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
}

/// Replace the role assignments of `user_id` with `wanted`.
async fn assign_roles<C: ConnectionTrait>(db: &C, user_id: i32, wanted: &[RoleName]) -> AppResult<()> {
    let wanted: BTreeSet<_> = wanted.iter().copied().collect();
    let available = roles::Entity::find().all(db).await?;

    let mut role_ids = Vec::with_capacity(wanted.len());
    for name in &wanted {
        let role = available
            .iter()
            .find(|r| r.role_name == *name)
            .ok_or_else(|| AppError::invalid("roles", format!("role '{name}' is not configured")))?;
        role_ids.push(role.role_id);
    }

    user_roles::Entity::delete_many()
        .filter(user_roles::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if role_ids.is_empty() {
        return Ok(());
    }

    user_roles::Entity::insert_many(role_ids.into_iter().map(|role_id| user_roles::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role_id),
        ..Default::default()
    }))
    .exec(db)
    .await?;

    Ok(())
}

async fn summary<C: ConnectionTrait>(db: &C, user: users::Model) -> AppResult<UserSummary> {
    let roles = super::roles_of(db, user.user_id).await?;
    Ok(UserSummary::new(user, roles))
}

pub async fn create_user(db: &DatabaseConnection, new: NewUser, bcrypt_cost: u32) -> AppResult<UserSummary> {
    let username = required_text("username", &new.username)?;
    let first_name = required_text("first_name", &new.first_name)?;
    let last_name = required_text("last_name", &new.last_name)?;
    if new.password.is_empty() {
        return Err(AppError::invalid("password", "is required"));
    }

    let hash = hash_password(new.password, bcrypt_cost).await?;

    let txn = db.begin().await?;
    let user = users::ActiveModel {
        username: Set(username),
        password: Set(hash),
        first_name: Set(first_name),
        last_name: Set(last_name),
        active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(AppError::from_unique("username"))?;

    assign_roles(&txn, user.user_id, &new.roles).await?;
    let created = summary(&txn, user).await?;
    txn.commit().await?;

    tracing::info!(user_id = created.user_id, username = %created.username, roles = ?created.roles, "user_created");
    Ok(created)
}

/// All users ordered by username, with their role names.
pub async fn list_users(db: &DatabaseConnection) -> AppResult<Vec<UserSummary>> {
    let rows = users::Entity::find()
        .order_by_asc(users::Column::Username)
        .find_with_related(roles::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(user, roles)| UserSummary::new(user, roles.into_iter().map(|r| r.role_name)))
        .collect())
}

pub async fn get_user(db: &DatabaseConnection, user_id: i32) -> AppResult<UserSummary> {
    let user = find_user(db, user_id).await?;
    summary(db, user).await
}

pub async fn set_user_roles(db: &DatabaseConnection, user_id: i32, roles: &[RoleName]) -> AppResult<UserSummary> {
    let txn = db.begin().await?;
    let user = find_user(&txn, user_id).await?;
    assign_roles(&txn, user_id, roles).await?;
    let updated = summary(&txn, user).await?;
    txn.commit().await?;

    tracing::info!(user_id, roles = ?updated.roles, "user_roles_replaced");
    Ok(updated)
}

pub async fn set_user_active(db: &DatabaseConnection, user_id: i32, active: bool) -> AppResult<UserSummary> {
    let user = find_user(db, user_id).await?;
    let mut am: users::ActiveModel = user.into();
    am.active = Set(active);
    let user = am.update(db).await?;

    tracing::info!(user_id, active, "user_status_changed");
    summary(db, user).await
}

pub async fn change_password(db: &DatabaseConnection, user_id: i32, new_password: String, bcrypt_cost: u32) -> AppResult<()> {
    if new_password.is_empty() {
        return Err(AppError::invalid("password", "is required"));
    }
    let user = find_user(db, user_id).await?;
    let hash = hash_password(new_password, bcrypt_cost).await?;

    let mut am: users::ActiveModel = user.into();
    am.password = Set(hash);
    am.update(db).await?;

    tracing::info!(user_id, "password_changed");
    Ok(())
}

/// Delete an account that has no operational history.
///
/// Users who observed casts or set sample deadlines must be deactivated
/// instead so the log keeps its attribution.
pub async fn delete_user(db: &DatabaseConnection, acting_user_id: i32, user_id: i32) -> AppResult<()> {
    if acting_user_id == user_id {
        return Err(AppError::invalid("user_id", "you cannot delete your own account"));
    }

    let user = find_user(db, user_id).await?;

    let observed = ctd_cast_log::Entity::find()
        .filter(ctd_cast_log::Column::ObserverUserId.eq(user_id))
        .count(db)
        .await?;
    let timings = sample_timing::Entity::find()
        .filter(sample_timing::Column::SetByUserId.eq(user_id))
        .count(db)
        .await?;
    if observed + timings > 0 {
        return Err(AppError::invalid(
            "user_id",
            "user is referenced by cast records; deactivate the account instead",
        ));
    }

    users::Entity::delete_by_id(user.user_id).exec(db).await?;
    tracing::info!(user_id, username = %user.username, "user_deleted");
    Ok(())
}

/// Create the configured admin account when no active admin exists.
///
/// Does nothing unless a default admin password is configured. Returns the
/// id of the account it created.
pub async fn ensure_default_admin(db: &DatabaseConnection, config: &Config) -> AppResult<Option<i32>> {
    let Some(password) = config.default_admin_password.clone() else {
        return Ok(None);
    };

    let active_admins = users::Entity::find()
        .filter(users::Column::Active.eq(true))
        .find_with_related(roles::Entity)
        .all(db)
        .await?
        .into_iter()
        .filter(|(_, roles)| roles.iter().any(|r| r.role_name == RoleName::Admin))
        .count();
    if active_admins > 0 {
        return Ok(None);
    }

    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(config.default_admin_username.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        tracing::warn!(
            username = %config.default_admin_username,
            "default admin username taken by a non-admin account; not creating"
        );
        return Ok(None);
    }

    let created = create_user(
        db,
        NewUser {
            username: config.default_admin_username.clone(),
            password,
            first_name: "System".into(),
            last_name: "Administrator".into(),
            roles: vec![RoleName::Admin],
        },
        config.bcrypt_cost,
    )
    .await?;

    tracing::warn!(username = %created.username, "default admin account created; change its password");
    Ok(Some(created.user_id))
}
