use clap::Subcommand;
use reqwest::Method;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_success, read_json_object};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Update a user profile from JSON on stdin (name, role, section_access, ...)")]
    Update {
        #[arg(help = "Profile ID")]
        id: String,
    },
}

pub async fn handle(cmd: UserCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Update { id } => {
            let body = read_json_object(std::io::stdin())?;
            client
                .record(Method::PATCH, "/users", &id, Some(&body))
                .await?;
            output_success(
                &output_format,
                &format!("Profile '{}' updated", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
