use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{auth, clients, documents, health, inventory, projects, tasks, team};
use crate::middleware::{auth::require_auth, rate_limit::rate_limit};
use crate::state::AppState;

/// Assemble the full router. Request flow: trace -> CORS -> rate limit ->
/// bearer auth (protected routes) -> per-route role gate -> handler.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health));

    let protected = Router::new()
        .route(
            "/auth/profile",
            get(auth::get_profile).put(auth::update_profile),
        )
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/:id",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/:id",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route("/team", get(team::list).post(team::create))
        .route(
            "/team/:id",
            get(team::get).put(team::update).delete(team::delete),
        )
        .route("/documents", get(documents::list).post(documents::create))
        .route(
            "/documents/:id",
            get(documents::get)
                .put(documents::update)
                .delete(documents::delete),
        )
        .route("/clients", get(clients::list).post(clients::create))
        .route(
            "/clients/:id",
            get(clients::get)
                .put(clients::update)
                .delete(clients::delete),
        )
        .route("/inventory", get(inventory::list).post(inventory::create))
        .route(
            "/inventory/:id",
            get(inventory::get)
                .put(inventory::update)
                .delete(inventory::delete),
        )
        .layer(from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .merge(public)
        .merge(protected)
        .layer(from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/", get(health::root))
        .nest("/api/v1", api)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    match &config.server.cors_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!(origin = %origin, "invalid CORS_ORIGIN, falling back to permissive");
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}
