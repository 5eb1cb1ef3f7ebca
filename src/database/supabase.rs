use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::config::SupabaseConfig;
use crate::database::query_builder::QueryBuilder;
use crate::database::store::{DiamanteStore, StoreError};
use crate::types::{Diamante, DiamanteStatus};

/// Supabase REST (PostgREST) client for the diamond table
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: Url,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let base = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("PUBLIC_SUPABASE_URL"))?;
        let api_key = config
            .anon_key
            .clone()
            .ok_or(StoreError::ConfigMissing("PUBLIC_SUPABASE_ANON_KEY"))?;

        let rest_url = Self::build_rest_url(base)?;

        // Validate once so per-request builders cannot fail on the name
        QueryBuilder::new(&config.table)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rest_url,
            api_key,
            table: config.table.clone(),
        })
    }

    /// `{base}/rest/v1/`, keeping any path prefix the base URL already has
    fn build_rest_url(base: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(base).map_err(|_| StoreError::InvalidUrl(base.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(StoreError::InvalidUrl(base.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.join("rest/v1/")
            .map_err(|_| StoreError::InvalidUrl(base.to_string()))
    }

    fn query(&self) -> Result<QueryBuilder, StoreError> {
        QueryBuilder::new(&self.table)
    }

    fn request(&self, method: Method, query: &QueryBuilder) -> Result<RequestBuilder, StoreError> {
        let url = self
            .rest_url
            .join(query.table_name())
            .map_err(|_| StoreError::InvalidTable(query.table_name().to_string()))?;

        Ok(self
            .client
            .request(method, url)
            .query(&query.to_params())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key))
    }

    /// Turn a non-2xx response into `StoreError::Remote` with the body text
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Remote { status: status.as_u16(), body })
    }
}

#[async_trait]
impl DiamanteStore for SupabaseStore {
    async fn list_by_status(&self, status: DiamanteStatus) -> Result<Vec<Diamante>, StoreError> {
        let query = self
            .query()?
            .select("*")
            .eq("status", status)
            .order("codigo", true);

        let response = self.request(Method::GET, &query)?.send().await?;
        let bytes = Self::check(response).await?.bytes().await?;
        let rows: Vec<Diamante> = serde_json::from_slice(&bytes)?;

        debug!("Fetched {} {} rows from {}", rows.len(), status, self.table);
        Ok(rows)
    }

    async fn set_status(&self, id: &str, status: DiamanteStatus) -> Result<(), StoreError> {
        let query = self.query()?.eq("id", id);

        let response = self
            .request(Method::PATCH, &query)?
            .header("Prefer", "return=minimal")
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::check(response).await?;

        debug!("Set status {} on {} id={}", status, self.table, id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let query = self.query()?.select("id").limit(1);
        let response = self.request(Method::GET, &query)?.send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
