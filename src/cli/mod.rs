pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "fcbl")]
#[command(about = "FCBL CLI - command-line client for the FCBL Production API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "FCBL_API_URL",
        default_value = "http://localhost:8000",
        help = "API server base URL"
    )]
    pub server: String,

    #[arg(
        long,
        global = true,
        env = "API_V1_PREFIX",
        default_value = "/api/v1",
        help = "Versioned API prefix"
    )]
    pub prefix: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Style (project) operations")]
    Styles {
        #[command(subcommand)]
        cmd: commands::styles::StyleCommands,
    },

    #[command(about = "User profile administration")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Check server health status from the /health endpoint")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Text unless `--json` is given
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.server, &cli.prefix)?;

    match cli.command {
        Commands::Styles { cmd } => commands::styles::handle(cmd, &client, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &client, output_format).await,
        Commands::Health => commands::health::handle(&client, output_format).await,
    }
}
