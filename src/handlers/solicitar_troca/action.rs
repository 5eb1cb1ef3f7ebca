use axum::{extract::Extension, response::Json};

use crate::error::ApiError;
use crate::middleware::ActionForm;
use crate::services::{ActionSuccess, TrocaService};

/// POST /solicitar-troca - Return a diamond (form field `id`) for sharpening
pub async fn post(
    Extension(service): Extension<TrocaService>,
    form: ActionForm,
) -> Result<Json<ActionSuccess>, ApiError> {
    let result = service.devolver(form.get("id")).await?;
    Ok(Json(result))
}
