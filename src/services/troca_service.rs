use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::database::SharedStore;
use crate::error::ApiError;
use crate::types::{Diamante, DiamanteStatus};

pub const MSG_SELECT_REQUIRED: &str = "Selecione um diamante.";
pub const MSG_RETURN_FAILED: &str = "Erro ao processar devolução.";
pub const MSG_RETURN_OK: &str = "Diamante enviado para afiação com sucesso!";

/// Data handed to the "solicitar troca" page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub diamantes: Vec<Diamante>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSuccess {
    pub success: bool,
    pub message: String,
}

/// Return workflow: list what is in use, send an item back for sharpening
#[derive(Clone)]
pub struct TrocaService {
    store: SharedStore,
}

impl TrocaService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Items currently in use, ordered by code.
    ///
    /// A failed query yields an empty list; the page cannot tell the two apart.
    pub async fn load(&self) -> PageData {
        let diamantes = match self.store.list_by_status(DiamanteStatus::EmUso).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Loading in-use diamonds failed: {}", e);
                Vec::new()
            }
        };
        PageData { diamantes }
    }

    /// Move the item `id` to `afiando`.
    ///
    /// There is no guard on the current status: returning an item that is
    /// already being sharpened, or an id with no row, still succeeds.
    pub async fn devolver(&self, id: Option<&str>) -> Result<ActionSuccess, ApiError> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ApiError::bad_request(MSG_SELECT_REQUIRED)),
        };

        if let Err(e) = self.store.set_status(id, DiamanteStatus::Afiando).await {
            warn!("Return of diamond id={} failed: {}", id, e);
            return Err(ApiError::bad_request(MSG_RETURN_FAILED));
        }

        info!("Diamond id={} sent for sharpening", id);
        Ok(ActionSuccess {
            success: true,
            message: MSG_RETURN_OK.to_string(),
        })
    }
}
