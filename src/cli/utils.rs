use std::io::Read;

use anyhow::{anyhow, Context};
use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(obj)) = (data, response.as_object_mut()) {
                obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
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
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Print a value as pretty JSON
pub fn output_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line summary of a style: `<id>  <status>  <title>  (updated <ts>)`
pub fn style_summary(style: &Value) -> String {
    let field = |key: &str| style.get(key).and_then(|v| v.as_str()).unwrap_or("-");
    format!(
        "{:<20} {:<14} {}  (updated {})",
        field("id"),
        field("status"),
        field("title"),
        field("updatedAt")
    )
}

/// Parse a JSON object from a reader (stdin for create/update commands)
pub fn read_json_object(mut reader: impl Read) -> anyhow::Result<Value> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read JSON input")?;

    let value: Value = serde_json::from_str(&input).context("input is not valid JSON")?;
    if !value.is_object() {
        return Err(anyhow!("expected a JSON object on input"));
    }
    Ok(value)
}
