//! Landing page and health check.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::api::AppState;

/// Landing page listing the site sections
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub title: &'static str,
    pub pages: &'static [&'static str],
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn index_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index() -> Json<IndexView> {
    Json(IndexView {
        title: "Лабораторные работы",
        pages: &[
            "/show/url",
            "/show/headers",
            "/show/cookies",
            "/show/form",
            "/phone",
            "/visits",
            "/login",
            "/secret",
            "/users",
            "/change_password",
        ],
    })
}

/// Health check with database connectivity
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, database) = match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: database.status,
        database,
    };

    (status_code, Json(response))
}
