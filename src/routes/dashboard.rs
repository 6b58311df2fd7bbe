use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::cast::{self, CastSummary};
use crate::common::{AppState, RequestContext};
use crate::error::AppResult;
use crate::identity::Identity;
use crate::identity::permissions::{Permission, QuickAction, navigation};
use crate::reference::{self, DatabaseStats};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: Identity,
    pub stats: DatabaseStats,
    pub quick_actions: Vec<QuickAction>,
    pub recent_casts: Vec<CastSummary>,
}

/// Landing page data: counts, shortcuts for the caller's roles and the latest casts
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Not logged in"),
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<DashboardResponse>> {
    let stats = reference::stats(&state.db).await?;
    let quick_actions = navigation(&ctx.identity.roles, &ctx.permissions);

    let recent_casts = if ctx.permissions.allows(Permission::ViewData) {
        cast::list_recent_casts(&state.db, state.config.recent_casts_limit).await?
    } else {
        Vec::new()
    };

    Ok(Json(DashboardResponse {
        user: ctx.identity,
        stats,
        quick_actions,
        recent_casts,
    }))
}
