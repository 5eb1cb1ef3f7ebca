use anyhow::Context;
use diamantes_api::{config, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PUBLIC_SUPABASE_URL / PUBLIC_SUPABASE_ANON_KEY
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diamantes_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::config();
    tracing::info!("Starting Diamantes API in {:?} mode", config.environment);

    let memory = std::env::var("DIAMANTES_MEMORY_STORE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let store = server::build_store(config, memory).context("failed to configure the Supabase store")?;
    server::serve(config, store).await
}
