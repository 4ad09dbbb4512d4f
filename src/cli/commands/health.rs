use reqwest::Method;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_json;
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = client.url("/health")?;
    let payload = client.send(Method::GET, url, None).await?;

    match output_format {
        OutputFormat::Json => output_json(&payload),
        OutputFormat::Text => {
            let field = |key: &str| payload.get(key).and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
            println!("Status: {}", field("status"));
            println!("Version: {}", field("version"));
            println!("Environment: {}", field("environment"));
            println!("Store: {}", field("supabase_url"));
            Ok(())
        }
    }
}
