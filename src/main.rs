use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use edutrack_api::config::AppConfig;
use edutrack_api::database::{DatabaseManager, PgRepository};
use edutrack_api::routes;
use edutrack_api::state::AppState;

#[derive(Parser)]
#[command(name = "edutrack-api")]
#[command(about = "EduTrack LMS HTTP API")]
#[command(version)]
struct ServerArgs {
    #[arg(long, help = "Interface to bind (overrides EDUTRACK_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides EDUTRACK_PORT/PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("edutrack_api=debug,tower_http=info")),
        )
        .init();

    let args = ServerArgs::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    tracing::info!("Starting EduTrack API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).await?;
    let repo = Arc::new(PgRepository::new(pool));

    let bind_addr = config.bind_addr();
    let app = routes::app(AppState::new(repo, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("EduTrack API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
