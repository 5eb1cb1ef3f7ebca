use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::database::SharedStore;
use crate::services::TrocaService;

pub async fn handle(store: SharedStore, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    match TrocaService::new(store).devolver(Some(id)).await {
        Ok(result) => output_success(&output_format, &result.message),
        Err(e) => {
            // Text mode reports through the binary's error path
            if let OutputFormat::Json = output_format {
                output_error(&output_format, e.message())?;
            }
            anyhow::bail!("{}", e.message())
        }
    }
}
