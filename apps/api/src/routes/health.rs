use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Fixed-shape liveness payload; operational visibility only.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "api",
        "time": chrono::Utc::now().to_rfc3339()
    }))
}
