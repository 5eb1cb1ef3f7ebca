use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_json};
use crate::cli::OutputFormat;
use crate::database::SharedStore;
use crate::services::TrocaService;

pub async fn handle(store: SharedStore, output_format: OutputFormat) -> anyhow::Result<()> {
    let page = TrocaService::new(store).load().await;

    if page.diamantes.is_empty() {
        return output_empty_collection(&output_format, "diamantes", "Nenhum diamante em uso.");
    }

    match output_format {
        OutputFormat::Json => output_json(&json!(page)),
        OutputFormat::Text => {
            println!("{:<12} {:<16} {}", "ID", "CODIGO", "STATUS");
            for d in &page.diamantes {
                let codigo = match &d.codigo {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                println!("{:<12} {:<16} {}", d.id.to_string(), codigo, d.status);
            }
            Ok(())
        }
    }
}
