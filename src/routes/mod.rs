pub mod auth;
pub mod casts;
pub mod dashboard;
pub mod health;
mod rate_limit;
pub mod reference;
pub mod sampling;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::common::context::NOTICE_HEADER;
use rate_limit::LoginIpKeyExtractor;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("UUID")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::login,
        auth::logout,
        auth::me,
        dashboard::dashboard,
        users::list_users,
        users::create_user,
        users::set_roles,
        users::set_active,
        users::change_password,
        users::delete_user,
        users::list_roles,
        reference::list_ships,
        reference::get_ship,
        reference::create_ship,
        reference::list_cruises,
        reference::get_cruise,
        reference::create_cruise,
        reference::list_stations,
        reference::get_station,
        reference::create_station,
        reference::list_target_depths,
        reference::add_target_depth,
        reference::list_sensors,
        reference::get_sensor,
        reference::create_sensor,
        reference::set_sensor_status,
        reference::list_niskins,
        reference::get_niskin,
        reference::create_niskin,
        reference::set_niskin_status,
        reference::list_sample_types,
        reference::get_sample_type,
        reference::create_sample_type,
        reference::set_active,
        reference::search,
        casts::list_casts,
        casts::create_cast,
        casts::get_cast,
        casts::delete_cast,
        casts::list_cast_sensors,
        casts::attach_sensor,
        casts::save_pre_cast,
        casts::save_beginning_position,
        casts::save_at_depth,
        casts::save_capture_start,
        casts::save_bottom_depth,
        casts::save_ending_position,
        casts::save_on_deck,
        casts::save_post_cast,
        sampling::list_samples,
        sampling::record_sample,
        sampling::capture_summary,
        sampling::bottles_for_cast,
        sampling::get_bottle,
        sampling::create_bottle,
        sampling::update_bottle_status,
        sampling::replace_bottle,
        sampling::list_replacements,
        sampling::list_sessions,
        sampling::open_session,
        sampling::close_session,
        sampling::list_timings,
        sampling::set_timing,
    ),
    components(
        schemas(
            crate::identity::permissions::Permission,
            crate::entity::roles::RoleName,
            crate::cast::CastState,
            crate::cast::Stage,
            crate::reference::ReferenceKind,
            crate::reference::SearchTarget,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login and sessions"),
        (name = "dashboard", description = "Landing page data"),
        (name = "users", description = "Accounts and roles"),
        (name = "reference", description = "Ships, cruises, stations, sensors, Niskins and sample types"),
        (name = "casts", description = "CTD cast logs"),
        (name = "phases", description = "Per-phase cast records"),
        (name = "sampling", description = "Niskin captures"),
        (name = "bottles", description = "Sample bottles"),
        (name = "sessions", description = "Sampling sessions and processing deadlines"),
    ),
    info(
        title = "CTD Cast Log API",
        description = "Operations log for CTD casts and water sampling aboard research vessels",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

fn login_routes(state: &AppState) -> Router<AppState> {
    let config = &state.config;
    let login = Router::new().route("/auth/login", post(auth::login));

    if config.disable_rate_limiting {
        tracing::warn!("Login rate limiting DISABLED");
        return login;
    }

    let limiter = GovernorConfigBuilder::default()
        .key_extractor(LoginIpKeyExtractor {
            trust_proxy_headers: config.trust_proxy_headers,
        })
        .per_second(config.login_rate_limit_per_second.max(1))
        .burst_size(config.login_rate_limit_burst.max(1))
        .finish();

    match limiter {
        Some(limiter) => {
            tracing::info!(
                login_rate = %format!("{}/s burst {}", config.login_rate_limit_per_second, config.login_rate_limit_burst),
                "Login rate limiting configured"
            );
            login.layer(GovernorLayer {
                config: Arc::new(limiter),
            })
        }
        None => {
            tracing::error!("Login rate limiter rejected its settings; serving login unthrottled");
            login
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cast_routes = Router::new()
        .route("/casts", get(casts::list_casts).post(casts::create_cast))
        .route("/casts/{cast_id}", get(casts::get_cast).delete(casts::delete_cast))
        .route(
            "/casts/{cast_id}/sensors",
            get(casts::list_cast_sensors).post(casts::attach_sensor),
        )
        .route("/casts/{cast_id}/phases/pre-cast", put(casts::save_pre_cast))
        .route("/casts/{cast_id}/phases/beginning", put(casts::save_beginning_position))
        .route("/casts/{cast_id}/phases/at-depth", put(casts::save_at_depth))
        .route("/casts/{cast_id}/phases/capture-start", put(casts::save_capture_start))
        .route("/casts/{cast_id}/phases/bottom-depth", put(casts::save_bottom_depth))
        .route("/casts/{cast_id}/phases/ending", put(casts::save_ending_position))
        .route("/casts/{cast_id}/phases/on-deck", put(casts::save_on_deck))
        .route("/casts/{cast_id}/phases/post-cast", put(casts::save_post_cast));

    let sampling_routes = Router::new()
        .route(
            "/casts/{cast_id}/samples",
            get(sampling::list_samples).post(sampling::record_sample),
        )
        .route("/casts/{cast_id}/capture-summary", get(sampling::capture_summary))
        .route("/casts/{cast_id}/bottles", get(sampling::bottles_for_cast))
        .route(
            "/casts/{cast_id}/sessions",
            get(sampling::list_sessions).post(sampling::open_session),
        )
        .route("/bottles", post(sampling::create_bottle))
        .route("/bottles/{bottle_id}", get(sampling::get_bottle))
        .route("/bottles/{bottle_id}/status", put(sampling::update_bottle_status))
        .route(
            "/bottles/{bottle_id}/replacements",
            get(sampling::list_replacements).post(sampling::replace_bottle),
        )
        .route("/sessions/{session_id}/close", put(sampling::close_session))
        .route(
            "/sessions/{session_id}/timings",
            get(sampling::list_timings).post(sampling::set_timing),
        );

    let reference_routes = Router::new()
        .route("/ships", get(reference::list_ships).post(reference::create_ship))
        .route("/ships/{ship_id}", get(reference::get_ship))
        .route("/cruises", get(reference::list_cruises).post(reference::create_cruise))
        .route("/cruises/{cruise_id}", get(reference::get_cruise))
        .route("/stations", get(reference::list_stations).post(reference::create_station))
        .route("/stations/{station_id}", get(reference::get_station))
        .route(
            "/stations/{station_id}/target-depths",
            get(reference::list_target_depths).post(reference::add_target_depth),
        )
        .route("/sensors", get(reference::list_sensors).post(reference::create_sensor))
        .route("/sensors/{sensor_id}", get(reference::get_sensor))
        .route("/sensors/{sensor_id}/status", put(reference::set_sensor_status))
        .route("/niskins", get(reference::list_niskins).post(reference::create_niskin))
        .route("/niskins/{niskin_id}", get(reference::get_niskin))
        .route("/niskins/{niskin_id}/status", put(reference::set_niskin_status))
        .route(
            "/sample-types",
            get(reference::list_sample_types).post(reference::create_sample_type),
        )
        .route("/sample-types/{sample_type_id}", get(reference::get_sample_type))
        .route("/reference/{kind}/{id}/active", put(reference::set_active))
        .route("/search", get(reference::search));

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{user_id}", axum::routing::delete(users::delete_user))
        .route("/users/{user_id}/roles", put(users::set_roles))
        .route("/users/{user_id}/active", put(users::set_active))
        .route("/users/{user_id}/password", put(users::change_password))
        .route("/roles", get(users::list_roles));

    let session_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/dashboard", get(dashboard::dashboard));

    let api_routes = Router::new()
        .merge(login_routes(&state))
        .merge(session_routes)
        .merge(user_routes)
        .merge(reference_routes)
        .merge(cast_routes)
        .merge(sampling_routes)
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    // Health check routes (NO rate limiting, NO session)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([NOTICE_HEADER]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
        assert!(doc.paths.paths.contains_key("/api/casts/{cast_id}/phases/post-cast"));
    }
}
