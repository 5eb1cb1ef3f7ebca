use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Diamante, DiamanteStatus};

/// Errors from the remote (or in-memory) diamond store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid Supabase URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Remote error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two queries the workflow needs, plus a liveness check.
#[async_trait]
pub trait DiamanteStore: Send + Sync {
    /// Rows with the given status, ordered by `codigo` ascending.
    async fn list_by_status(&self, status: DiamanteStatus) -> Result<Vec<Diamante>, StoreError>;

    /// Set `status` on the row whose id equals `id`. No matching row is not an error.
    async fn set_status(&self, id: &str, status: DiamanteStatus) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn DiamanteStore>;
