use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{MemoryStore, SharedStore, StoreError, SupabaseStore};
use crate::handlers;
use crate::services::TrocaService;

/// Remote Supabase store, or an empty in-process table when `memory` is set
pub fn build_store(config: &AppConfig, memory: bool) -> Result<SharedStore, StoreError> {
    if memory {
        warn!("Using in-memory store; changes are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(SupabaseStore::new(&config.supabase)?))
}

pub fn app(store: SharedStore, config: &AppConfig) -> Router {
    let service = TrocaService::new(store.clone());

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(solicitar_troca_routes());

    if let Some(files) = static_files(&config.server.static_dir) {
        router = router.fallback_service(files);
    }

    router = router.layer(Extension(service)).layer(Extension(store));

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn solicitar_troca_routes() -> Router {
    use handlers::solicitar_troca;

    Router::new()
        .route(
            "/solicitar-troca",
            get(solicitar_troca::solicitar_troca_get).post(solicitar_troca::solicitar_troca_post),
        )
        // Named form action
        .route(
            "/solicitar-troca/solicitarTroca",
            post(solicitar_troca::solicitar_troca_post),
        )
}

/// Pre-rendered pages with the SPA fallback; skipped when no build output exists
fn static_files(dir: &str) -> Option<ServeDir<ServeFile>> {
    let root = Path::new(dir);
    let index = root.join("index.html");
    if !index.is_file() {
        return None;
    }
    info!("Serving static files from {}", root.display());
    Some(ServeDir::new(root).fallback(ServeFile::new(index)))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE]),
    )
}

pub async fn serve(config: &AppConfig, store: SharedStore) -> anyhow::Result<()> {
    let app = app(store, config);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Diamantes API listening on http://{} ({:?})", bind_addr, config.environment);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
