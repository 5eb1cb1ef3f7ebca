use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::SharedStore;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Diamantes API",
            "version": version,
            "description": "Diamond tool tracking: return in-use items for sharpening",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "solicitar_troca": "GET /solicitar-troca (items in use), POST /solicitar-troca (form field id)",
            }
        }
    }))
}

/// GET /health - Remote store liveness
pub async fn health(Extension(store): Extension<SharedStore>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                    }
                })),
            )
        }
    }
}
