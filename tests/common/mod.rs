#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use diamantes_api::config::{AppConfig, SupabaseConfig};
use diamantes_api::database::MemoryStore;
use diamantes_api::types::{Diamante, DiamanteStatus};

/// `[{1,"A",em_uso}, {2,"B",afiando}, {3,"C",em_uso}]`
pub fn sample_rows() -> Vec<Diamante> {
    vec![
        Diamante::new(1_i64, "A", DiamanteStatus::EmUso),
        Diamante::new(2_i64, "B", DiamanteStatus::Afiando),
        Diamante::new(3_i64, "C", DiamanteStatus::EmUso),
    ]
}

/// Development defaults with static serving pointed at a directory that does not exist
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.server.static_dir = "__no_static_dir__".to_string();
    config.server.enable_request_logging = false;
    config
}

pub fn memory_app(rows: Vec<Diamante>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_rows(rows));
    let app = diamantes_api::server::app(store.clone(), &test_config());
    (app, store)
}

/// Drive one request through the router; returns status and JSON body (Null when empty)
pub async fn send(app: Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let res = app.oneshot(req).await.context("router call failed")?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
    };
    Ok((status, body))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_urlencoded(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_multipart(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let boundary = "diamantes-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Mock Supabase REST endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub table: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Default)]
struct MockInner {
    rows: Vec<Value>,
    fail: bool,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct MockSupabase {
    pub base_url: String,
    inner: Arc<Mutex<MockInner>>,
}

impl MockSupabase {
    pub async fn spawn(rows: Vec<Value>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock Supabase")?;

        let mock = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            inner: Arc::new(Mutex::new(MockInner { rows, ..MockInner::default() })),
        };

        let app = Router::new()
            .route("/rest/v1/:table", any(handle_table))
            .with_state(mock.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(mock)
    }

    pub fn supabase_config(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: Some(self.base_url.clone()),
            anon_key: Some("test-anon-key".to_string()),
            table: "diamantes".to_string(),
            timeout_secs: 5,
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.inner.lock().unwrap().fail = fail;
    }

    pub fn rows(&self) -> Vec<Value> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

fn eq_filters(query: &[(String, String)]) -> Vec<(String, String)> {
    query
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "select" | "order" | "limit"))
        .filter_map(|(k, v)| v.strip_prefix("eq.").map(|v| (k.clone(), v.to_string())))
        .collect()
}

fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(col, expected)| match row.get(col) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == *expected,
        None => false,
    })
}

async fn handle_table(
    State(mock): State<MockSupabase>,
    method: Method,
    Path(table): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body_json = serde_json::from_slice::<Value>(&body).ok();
    let mut inner = mock.inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        table: table.clone(),
        query: query.clone(),
        headers,
        body: body_json.clone(),
    });

    if inner.fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "XX000", "message": "mock failure" })),
        )
            .into_response();
    }
    if table != "diamantes" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "42P01", "message": format!("relation \"{}\" does not exist", table) })),
        )
            .into_response();
    }

    let filters = eq_filters(&query);
    let params: HashMap<String, String> = query.into_iter().collect();

    match method {
        Method::GET => {
            let mut rows: Vec<Value> = inner
                .rows
                .iter()
                .filter(|r| row_matches(r, &filters))
                .cloned()
                .collect();

            if let Some(order) = params.get("order") {
                let (col, dir) = order.split_once('.').unwrap_or((order.as_str(), "asc"));
                rows.sort_by_key(|r| r.get(col).map(|v| v.to_string()).unwrap_or_default());
                if dir == "desc" {
                    rows.reverse();
                }
            }
            if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
                rows.truncate(limit);
            }
            if params.get("select").map(String::as_str) == Some("id") {
                rows = rows.into_iter().map(|r| json!({ "id": r["id"] })).collect();
            }
            Json(Value::Array(rows)).into_response()
        }
        Method::PATCH => {
            let changes = body_json.and_then(|b| b.as_object().cloned()).unwrap_or_default();
            for row in inner.rows.iter_mut().filter(|r| row_matches(r, &filters)) {
                if let Some(obj) = row.as_object_mut() {
                    for (k, v) in &changes {
                        obj.insert(k.clone(), v.clone());
                    }
                }
            }
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
