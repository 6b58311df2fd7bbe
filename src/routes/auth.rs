use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::{AppState, RequestContext};
use crate::error::AppResult;
use crate::identity::permissions::PermissionSet;
use crate::identity::{self, Identity};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: Uuid,
    pub user: Identity,
    pub permissions: PermissionSet,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: Identity,
    pub permissions: PermissionSet,
}

/// Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
        (status = 429, description = "Too many login attempts"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = identity::authenticate(
        &state.db,
        request.username.trim(),
        &request.password,
        state.config.bcrypt_cost,
    )
    .await?;
    let identity = identity::load_identity(&state.db, &user).await?;
    let permissions = PermissionSet::from_roles(&identity.roles);
    let token = state.sessions.open(identity.clone()).await;

    tracing::info!(user_id = identity.user_id, username = %identity.username, "login");

    Ok(Json(LoginResponse {
        token,
        user: identity,
        permissions,
    }))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Not logged in"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn logout(State(state): State<AppState>, ctx: RequestContext) -> StatusCode {
    state.sessions.close(ctx.token).await;
    tracing::info!(user_id = ctx.user_id(), "logout");
    StatusCode::NO_CONTENT
}

/// The caller's identity and permissions
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Not logged in"),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me(ctx: RequestContext) -> Json<MeResponse> {
    Json(MeResponse {
        user: ctx.identity,
        permissions: ctx.permissions,
    })
}
