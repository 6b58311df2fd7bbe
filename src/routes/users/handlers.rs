use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::common::{AppState, RequestContext};
use crate::entity::roles;
use crate::error::AppResult;
use crate::identity::accounts::{self, NewUser, UserSummary};
use crate::identity::permissions::Permission;
use crate::reference;

use super::types::{ActiveUpdate, PasswordUpdate, RolesUpdate};

/// List every account with its roles
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = Vec<UserSummary>),
        (status = 403, description = "Requires manage_users"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>, ctx: RequestContext) -> AppResult<Json<Vec<UserSummary>>> {
    ctx.require(Permission::ManageUsers)?;
    Ok(Json(accounts::list_users(&state.db).await?))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = UserSummary),
        (status = 422, description = "Invalid input or username taken"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(new): Json<NewUser>,
) -> AppResult<(StatusCode, Json<UserSummary>)> {
    ctx.require(Permission::ManageUsers)?;
    let user = accounts::create_user(&state.db, new, state.config.bcrypt_cost).await?;
    tracing::info!(user_id = user.user_id, created_by = ctx.user_id(), "user_created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user's roles
#[utoipa::path(
    put,
    path = "/api/users/{user_id}/roles",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = RolesUpdate,
    responses(
        (status = 200, description = "Roles replaced", body = UserSummary),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn set_roles(
    State(state): State<AppState>,
    mut ctx: RequestContext,
    Path(user_id): Path<i32>,
    Json(update): Json<RolesUpdate>,
) -> AppResult<(HeaderMap, Json<UserSummary>)> {
    ctx.require(Permission::ManageUsers)?;
    let user = accounts::set_user_roles(&state.db, user_id, &update.roles).await?;
    state.sessions.revoke_user(user_id);
    ctx.notify(format!("{} must log in again", user.username));
    Ok((ctx.notice_headers(), Json(user)))
}

/// Activate or deactivate an account
#[utoipa::path(
    put,
    path = "/api/users/{user_id}/active",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = ActiveUpdate,
    responses(
        (status = 200, description = "Status changed", body = UserSummary),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn set_active(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(user_id): Path<i32>,
    Json(update): Json<ActiveUpdate>,
) -> AppResult<Json<UserSummary>> {
    ctx.require(Permission::ManageUsers)?;
    let user = accounts::set_user_active(&state.db, user_id, update.active).await?;
    state.sessions.revoke_user(user_id);
    Ok(Json(user))
}

/// Set a new password. Users may always change their own.
#[utoipa::path(
    put,
    path = "/api/users/{user_id}/password",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = PasswordUpdate,
    responses(
        (status = 204, description = "Password changed; the user's sessions are closed"),
        (status = 403, description = "Not your account and no manage_users"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn change_password(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(user_id): Path<i32>,
    Json(update): Json<PasswordUpdate>,
) -> AppResult<StatusCode> {
    if user_id != ctx.user_id() {
        ctx.require(Permission::ManageUsers)?;
    }
    accounts::change_password(&state.db, user_id, update.password, state.config.bcrypt_cost).await?;
    state.sessions.revoke_user(user_id);
    tracing::info!(user_id, changed_by = ctx.user_id(), "password_changed");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an account that nothing references
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Own account, or referenced by casts; deactivate instead"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(user_id): Path<i32>,
) -> AppResult<StatusCode> {
    ctx.require(Permission::ManageUsers)?;
    accounts::delete_user(&state.db, ctx.user_id(), user_id).await?;
    state.sessions.revoke_user(user_id);
    tracing::info!(user_id, deleted_by = ctx.user_id(), "user_deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Roles that can be assigned
#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "Roles", body = Vec<roles::Model>),
        (status = 401, description = "Not logged in"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_roles(State(state): State<AppState>, _ctx: RequestContext) -> AppResult<Json<Vec<roles::Model>>> {
    Ok(Json(reference::list_roles(&state.db).await?))
}
