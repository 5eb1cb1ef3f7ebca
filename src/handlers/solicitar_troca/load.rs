use axum::{extract::Extension, response::Json};

use crate::services::{PageData, TrocaService};

/// GET /solicitar-troca - Diamonds in use, for the return form
pub async fn get(Extension(service): Extension<TrocaService>) -> Json<PageData> {
    Json(service.load().await)
}
