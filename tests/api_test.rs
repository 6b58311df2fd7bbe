mod common;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tower::ServiceExt;

use ctd_log::common::AppState;
use ctd_log::entity::roles::RoleName;
use ctd_log::routes::build_router;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    Reply { status, headers, body }
}

async fn login(app: &Router, username: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": common::PASSWORD })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.json()["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_needs_no_session() {
    let db = common::setup_db().await;
    let app = build_router(AppState::new(db, common::test_config()));

    let reply = send(&app, Method::GET, "/healthz", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn login_and_session_lifecycle() {
    let db = common::setup_db().await;
    common::user(&db, "op", &[RoleName::Console]).await;
    let app = build_router(AppState::new(db, common::test_config()));

    let bad = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "op", "password": "wrong" })),
    )
    .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad.json()["error"], "Invalid username or password");

    let unknown = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "ghost", "password": "wrong" })),
    )
    .await;
    assert_eq!(unknown.body, bad.body);

    assert_eq!(
        send(&app, Method::GET, "/api/auth/me", None, None).await.status,
        StatusCode::UNAUTHORIZED
    );

    let token = login(&app, "op").await;
    let me = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    let me = me.json();
    assert_eq!(me["user"]["username"], "op");
    assert!(me["permissions"].as_array().unwrap().contains(&json!("create_cast")));

    let dashboard = send(&app, Method::GET, "/api/dashboard", Some(&token), None).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    let actions: Vec<String> = dashboard.json()["quick_actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["key"].as_str().unwrap().to_string())
        .collect();
    assert!(actions.contains(&"new_cast".to_string()));
    assert!(!actions.contains(&"users".to_string()));

    let logout = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);
    assert_eq!(
        send(&app, Method::GET, "/api/auth/me", Some(&token), None).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn permissions_gate_endpoints() {
    let db = common::setup_db().await;
    common::user(&db, "op", &[RoleName::Console]).await;
    common::user(&db, "boss", &[RoleName::Admin]).await;
    let app = build_router(AppState::new(db, common::test_config()));

    let op = login(&app, "op").await;
    let boss = login(&app, "boss").await;

    let ship = json!({ "ship_name": "RV Tethys" });
    assert_eq!(
        send(&app, Method::POST, "/api/ships", Some(&op), Some(ship.clone())).await.status,
        StatusCode::FORBIDDEN
    );
    let created = send(&app, Method::POST, "/api/ships", Some(&boss), Some(ship)).await;
    assert_eq!(created.status, StatusCode::CREATED);

    assert_eq!(
        send(&app, Method::GET, "/api/users", Some(&op), None).await.status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        send(&app, Method::GET, "/api/users", Some(&boss), None).await.status,
        StatusCode::OK
    );

    let duplicate = send(
        &app,
        Method::POST,
        "/api/ships",
        Some(&boss),
        Some(json!({ "ship_name": "RV Tethys" })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(duplicate.json()["field"], "ship_name");

    let search = send(&app, Method::GET, "/api/search?target=ships&q=teth", Some(&op), None).await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn role_change_ends_sessions() {
    let db = common::setup_db().await;
    let op = common::user(&db, "op", &[RoleName::Console]).await;
    common::user(&db, "boss", &[RoleName::Admin]).await;
    let app = build_router(AppState::new(db, common::test_config()));

    let op_token = login(&app, "op").await;
    let boss = login(&app, "boss").await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/api/users/{}/roles", op.user_id),
        Some(&boss),
        Some(json!({ "roles": ["observer"] })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.headers.contains_key("x-notice"));

    assert_eq!(
        send(&app, Method::GET, "/api/auth/me", Some(&op_token), None).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn cast_flow_over_http() {
    let db = common::setup_db().await;
    let voyage = common::voyage(&db).await;
    common::user(&db, "op", &[RoleName::Console]).await;
    let app = build_router(AppState::new(db, common::test_config()));
    let op = login(&app, "op").await;

    let created = send(
        &app,
        Method::POST,
        "/api/casts",
        Some(&op),
        Some(json!({
            "ship_id": voyage.ship_id,
            "station_id": voyage.station_id,
            "cruise_id": voyage.cruise_id,
            "cast_number": 1,
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert_eq!(created["observer_name"], "Test op");
    let cast_id = created["ctd_cast_log_id"].as_i64().unwrap();

    let begin = send(
        &app,
        Method::PUT,
        &format!("/api/casts/{cast_id}/phases/beginning"),
        Some(&op),
        Some(json!({ "begin_latitude": 10.01, "begin_longitude": -20.01, "begin_depth": 0.0 })),
    )
    .await;
    assert_eq!(begin.status, StatusCode::OK);
    assert!(begin.headers.get("x-notice").is_some());
    let body = begin.json();
    assert_eq!(body["record"]["begin_latitude"], 10.01);
    assert_eq!(body["state"], "beginning_position_recorded");
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);

    let bad = send(
        &app,
        Method::PUT,
        &format!("/api/casts/{cast_id}/phases/beginning"),
        Some(&op),
        Some(json!({ "begin_latitude": 91.0, "begin_longitude": 0.0 })),
    )
    .await;
    assert_eq!(bad.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(bad.json()["field"], "begin_latitude");

    let sample = send(
        &app,
        Method::POST,
        &format!("/api/casts/{cast_id}/samples"),
        Some(&op),
        Some(json!({ "niskin_id": voyage.niskin_ids[2], "sample_pressure_value": 505.0 })),
    )
    .await;
    assert_eq!(sample.status, StatusCode::CREATED);

    let csv = send(
        &app,
        Method::GET,
        &format!("/api/casts/{cast_id}/capture-summary?format=csv"),
        Some(&op),
        None,
    )
    .await;
    assert_eq!(csv.status, StatusCode::OK);
    assert_eq!(csv.headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(String::from_utf8(csv.body).unwrap().lines().count(), 2);

    let detail = send(&app, Method::GET, &format!("/api/casts/{cast_id}"), Some(&op), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    let detail = detail.json();
    assert_eq!(detail["sample_count"], 1);
    assert_eq!(detail["cruise_name"], "AB-24");

    // Console operators cannot delete casts
    assert_eq!(
        send(&app, Method::DELETE, &format!("/api/casts/{cast_id}"), Some(&op), None)
            .await
            .status,
        StatusCode::FORBIDDEN
    );

    assert_eq!(
        send(&app, Method::GET, "/api/casts/9999", Some(&op), None).await.status,
        StatusCode::NOT_FOUND
    );
}

async fn login_attempts(app: &Router, forwarded_for: impl Fn(usize) -> String) -> Vec<u16> {
    let mut statuses = Vec::new();
    for attempt in 0..6 {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", forwarded_for(attempt))
            .body(Body::from(json!({ "username": "op", "password": "guess" }).to_string()))
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("192.168.1.20:40000".parse::<SocketAddr>().unwrap()));

        let response = app.clone().oneshot(request).await.unwrap();
        statuses.push(response.status().as_u16());
    }
    statuses
}

fn throttled_config() -> ctd_log::config::Config {
    let mut config = common::test_config();
    config.disable_rate_limiting = false;
    config.login_rate_limit_per_second = 60;
    config.login_rate_limit_burst = 2;
    config
}

#[tokio::test]
async fn rotating_forwarded_headers_does_not_escape_the_login_limit() {
    let db = common::setup_db().await;
    common::user(&db, "op", &[RoleName::Console]).await;
    let app = build_router(AppState::new(db, throttled_config()));

    let statuses = login_attempts(&app, |attempt| format!("10.0.0.{attempt}")).await;
    assert_eq!(statuses, [401, 401, 429, 429, 429, 429]);
}

#[tokio::test]
async fn trusted_proxy_headers_separate_clients() {
    let db = common::setup_db().await;
    common::user(&db, "op", &[RoleName::Console]).await;
    let mut config = throttled_config();
    config.trust_proxy_headers = true;
    let app = build_router(AppState::new(db, config));

    let statuses = login_attempts(&app, |attempt| format!("10.0.0.{attempt}")).await;
    assert_eq!(statuses, [401; 6]);

    let statuses = login_attempts(&app, |_| "10.0.0.200".to_string()).await;
    assert_eq!(statuses, [401, 401, 429, 429, 429, 429]);
}
