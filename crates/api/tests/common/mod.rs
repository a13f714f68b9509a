use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use cantina_api::config::ServerConfig;
use cantina_api::routes;
use cantina_api::state::AppState;
use cantina_mailer::{MailMode, ReportDispatcher, SandboxMailer};

/// Shared admin token used by every test app.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed admin token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        time_zone: "America/Sao_Paulo".parse().unwrap(),
        admin_token: Some(ADMIN_TOKEN.to_string()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a sandbox mail transport.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let dispatcher = ReportDispatcher::new(
        Arc::new(SandboxMailer::new()),
        MailMode::Sandbox,
        cantina_core::render::DEFAULT_CSV_SEPARATOR,
    );
    let state = AppState::new(pool, config, dispatcher);

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static("x-admin-token"),
            HeaderName::from_static("x-actor-id"),
            HeaderName::from_static("x-actor-email"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_body(value: &serde_json::Value) -> Body {
    Body::from(serde_json::to_vec(value).unwrap())
}

/// Send a GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a GET request carrying the admin token.
pub async fn get_admin(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Send a POST request with a JSON body and the admin token.
pub async fn post_json_admin(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Send a bodyless POST request without the admin token.
pub async fn post(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a bodyless POST request with the admin token.
pub async fn post_admin(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a PUT request with a JSON body and no admin token.
pub async fn put_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Send a PUT request with a JSON body and the admin token.
pub async fn put_json_admin(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Send a PATCH request with a JSON body and the admin token.
pub async fn patch_json_admin(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Send a PATCH request with a JSON body and no admin token.
pub async fn patch_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(json_body(&body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert an active student directly through the repository.
pub async fn seed_student(
    pool: &PgPool,
    name: &str,
    group: &str,
    code: &str,
    plan: &str,
) -> cantina_db::models::student::Student {
    cantina_db::repositories::StudentRepo::create(
        pool,
        &cantina_db::models::student::CreateStudent {
            name: name.to_string(),
            group_name: group.to_string(),
            enrollment_code: code.to_string(),
            plan: plan.to_string(),
            note: None,
        },
    )
    .await
    .unwrap()
}
