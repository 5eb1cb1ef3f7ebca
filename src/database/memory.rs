use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::store::{DiamanteStore, StoreError};
use crate::types::{compare_codigo, Diamante, DiamanteStatus};

/// In-process table used by `--memory` development runs and by tests.
///
/// Failure switches simulate an unreachable backend for the select and
/// update paths independently.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Diamante>>,
    fail_selects: AtomicBool,
    fail_updates: AtomicBool,
    update_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Diamante>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_selects(&self, fail: bool) {
        self.fail_selects.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of update calls received, including failed ones
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub async fn rows(&self) -> Vec<Diamante> {
        self.rows.read().await.clone()
    }

    fn simulated_failure() -> StoreError {
        StoreError::Remote {
            status: 503,
            body: "simulated backend failure".to_string(),
        }
    }
}

#[async_trait]
impl DiamanteStore for MemoryStore {
    async fn list_by_status(&self, status: DiamanteStatus) -> Result<Vec<Diamante>, StoreError> {
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(Self::simulated_failure());
        }

        let rows = self.rows.read().await;
        let mut matching: Vec<Diamante> = rows.iter().filter(|d| d.status == status).cloned().collect();
        // Stable sort keeps insertion order for equal codes
        matching.sort_by(|a, b| compare_codigo(&a.codigo, &b.codigo));
        Ok(matching)
    }

    async fn set_status(&self, id: &str, status: DiamanteStatus) -> Result<(), StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Self::simulated_failure());
        }

        let mut rows = self.rows.write().await;
        for row in rows.iter_mut().filter(|d| d.id.matches(id)) {
            row.status = status;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(Self::simulated_failure());
        }
        Ok(())
    }
}
