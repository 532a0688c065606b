use axum::response::Json;
use serde_json::{json, Value};

/// GET /api/v1/health - liveness probe, no auth, no store round-trip.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "BuildPro API",
    }))
}

/// GET / - service banner with the endpoint map.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "BuildPro Construction Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/api/v1/health",
            "auth": "/api/v1/auth",
            "projects": "/api/v1/projects",
            "tasks": "/api/v1/tasks",
            "team": "/api/v1/team",
            "documents": "/api/v1/documents",
            "clients": "/api/v1/clients",
            "inventory": "/api/v1/inventory",
        }
    }))
}
