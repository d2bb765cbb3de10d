// handlers/public/health.rs - GET /health handler

use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::middleware::{ApiResponse, RequestContext};

pub async fn health(ctx: RequestContext) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match ctx.db.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
