use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Vistara API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Announcements, stories and events for a community feed",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "auth": "/api/auth",
            "announcements": "/api/announcements",
            "comments": "/api/comments",
            "stories": "/api/stories",
            "events": "/api/events"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await
    {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed to reach the database: {}", e);
            "down"
        }
    };

    let status = if database == "up" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(json!({
        "status": if database == "up" { "healthy" } else { "degraded" },
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
