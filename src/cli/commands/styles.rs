use clap::Subcommand;
use reqwest::Method;
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_empty_collection, output_json, output_success, read_json_object, style_summary};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum StyleCommands {
    #[command(about = "List all styles, most recently updated first")]
    List,

    #[command(about = "Show a single style")]
    Get {
        #[arg(help = "Style ID (proj-<timestamp>)")]
        id: String,
    },

    #[command(about = "Create style from JSON on stdin")]
    Create,

    #[command(about = "Update style from JSON on stdin (only supplied fields change)")]
    Update {
        #[arg(help = "Style ID to update")]
        id: String,
    },

    #[command(about = "Delete a style")]
    Delete {
        #[arg(help = "Style ID to delete")]
        id: String,
    },
}

pub async fn handle(cmd: StyleCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        StyleCommands::List => {
            let payload = client.api(Method::GET, "/styles", None).await?;
            let styles = payload["data"].as_array().cloned().unwrap_or_default();
            if styles.is_empty() {
                return output_empty_collection(&output_format, "styles", "No styles found");
            }
            match output_format {
                OutputFormat::Json => output_json(&Value::Array(styles)),
                OutputFormat::Text => {
                    for style in &styles {
                        println!("{}", style_summary(style));
                    }
                    Ok(())
                }
            }
        }
        StyleCommands::Get { id } => {
            let payload = client.record(Method::GET, "/styles", &id, None).await?;
            output_style(&output_format, &payload["data"])
        }
        StyleCommands::Create => {
            let body = read_json_object(std::io::stdin())?;
            let payload = client.api(Method::POST, "/styles", Some(&body)).await?;
            output_style(&output_format, &payload["data"])
        }
        StyleCommands::Update { id } => {
            let body = read_json_object(std::io::stdin())?;
            let payload = client
                .record(Method::PATCH, "/styles", &id, Some(&body))
                .await?;
            output_style(&output_format, &payload["data"])
        }
        StyleCommands::Delete { id } => {
            client.record(Method::DELETE, "/styles", &id, None).await?;
            output_success(&output_format, &format!("Style '{}' deleted successfully", id), None)
        }
    }
}

fn output_style(output_format: &OutputFormat, style: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(style),
        OutputFormat::Text => {
            println!("{}", style_summary(style));
            Ok(())
        }
    }
}
