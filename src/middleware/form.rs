use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};

use crate::error::ApiError;
use crate::services::troca_service::MSG_SELECT_REQUIRED;

/// Fields of a submitted form action, from either urlencoded or multipart bodies.
///
/// File parts are kept with their content as the value; the first occurrence of a name wins.
#[derive(Debug, Clone, Default)]
pub struct ActionForm {
    fields: Vec<(String, String)>,
}

impl ActionForm {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequest<S> for ActionForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        // A bodiless submission has no fields at all
        if content_type.is_empty() {
            return Ok(Self::default());
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            // An unparseable body carries no usable id
            let fields = match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(fields)) => fields,
                Err(e) => {
                    tracing::debug!("Rejected urlencoded form: {}", e);
                    return Err(ApiError::bad_request(MSG_SELECT_REQUIRED));
                }
            };
            return Ok(Self { fields });
        }

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
                tracing::debug!("Rejected multipart form: {}", e);
                ApiError::bad_request(MSG_SELECT_REQUIRED)
            })?;

            let mut fields = Vec::new();
            loop {
                let field = match multipart.next_field().await {
                    Ok(Some(field)) => field,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::debug!("Malformed multipart body: {}", e);
                        return Err(ApiError::bad_request(MSG_SELECT_REQUIRED));
                    }
                };
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                // A file part still counts as a submitted value; its content stands in for the text
                let value = if field.file_name().is_some() {
                    field
                        .bytes()
                        .await
                        .map(|b| String::from_utf8_lossy(&b).into_owned())
                } else {
                    field.text().await
                };
                let value = value.map_err(|e| {
                    tracing::debug!("Unreadable multipart field {}: {}", name, e);
                    ApiError::bad_request(MSG_SELECT_REQUIRED)
                })?;
                fields.push((name, value));
            }
            return Ok(Self { fields });
        }

        Err(ApiError::unsupported_media_type("Formato de formulário não suportado."))
    }
}
