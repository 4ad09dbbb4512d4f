use clap::Parser;
use fcbl_api::{app::app, config::AppConfig, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fcbl-api")]
#[command(about = "FCBL Production API server")]
#[command(version)]
struct ServerArgs {
    #[arg(
        long,
        env = "FCBL_MEMORY_STORE",
        help = "Serve from an in-process store instead of Supabase (data is lost on exit)"
    )]
    memory: bool,
}

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up SUPABASE_URL and the keys
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fcbl_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    if let Err(e) = run(args).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: ServerArgs) -> anyhow::Result<()> {
    let state = if args.memory {
        let config = AppConfig::from_env_without_store()?;
        tracing::warn!("Using the in-memory store; nothing is persisted");
        AppState::in_memory(config)
    } else {
        // Missing credentials stop the process here, before anything binds
        let config = AppConfig::from_env()?;
        tracing::debug!("Store configuration: {:?}", config.store);
        AppState::connect(config)?
    };
    let config = state.config.clone();
    tracing::info!("Starting FCBL API in {:?} mode", config.environment);

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("FCBL API listening on http://{} (api prefix {})", bind_addr, config.api.prefix);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
