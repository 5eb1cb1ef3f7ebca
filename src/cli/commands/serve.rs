use crate::config::AppConfig;
use crate::database::SharedStore;

pub async fn handle(config: &AppConfig, store: SharedStore, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(port) = port {
        config.server.port = port;
    }
    crate::server::serve(&config, store).await
}
