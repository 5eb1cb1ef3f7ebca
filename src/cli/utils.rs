use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            output_json(&json!({
                "success": true,
                "message": message
            }))?;
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            output_json(&json!({
                "success": false,
                "message": message
            }))?;
        }
        OutputFormat::Text => {
            eprintln!("Erro: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&json!({ collection_name: [] })),
        OutputFormat::Text => {
            println!("{}", message);
            Ok(())
        }
    }
}

pub fn output_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
