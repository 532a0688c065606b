#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use buildpro_api::app::app;
use buildpro_api::auth::{self, Claims, Role};
use buildpro_api::config::{ApiConfig, AppConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use buildpro_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            cors_origin: None,
        },
        database: DatabaseConfig {
            url: "postgres://postgres@127.0.0.1:5432/buildpro_test".to_string(),
            max_connections: 2,
            acquire_timeout_secs: 1,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_days: 7,
        },
        api: ApiConfig {
            enable_rate_limiting: false,
            rate_limit_requests: 100,
            rate_limit_window_secs: 900,
        },
    }
}

/// Router backed by a lazily-connected pool: nothing touches the store until
/// a handler actually issues a query, so the auth/validation/authorization
/// paths are testable without a live database.
pub fn test_app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    app(AppState::new(pool, config))
}

/// Router over a live pool, for the store-backed tests.
pub fn app_with_pool(pool: sqlx::PgPool) -> Router {
    app(AppState::new(pool, test_config()))
}

/// Mint a bearer token for an arbitrary role, signed with the test secret.
pub fn token_for(role: Role) -> String {
    let security = SecurityConfig {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_days: 7,
    };
    let claims = Claims::new("test-user-1", "tester@example.com", role, 7);
    auth::generate_token(&claims, &security).expect("token")
}

/// Drive one request through the router and decode the JSON body (Null when
/// the body is not JSON).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
