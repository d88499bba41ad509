//! DocuQuery Web Server
//!
//! Run with: cargo run -p docuquery-web

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use docuquery_client::{AnalysisBackend, ApiClient, UploadPolicy};
use docuquery_common::Config;
use docuquery_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docuquery_web=info,docuquery_client=info,tower_http=info")),
        )
        .init();

    info!("Starting DocuQuery Web Server...");

    let config = Config::load()?;
    let client = ApiClient::from_config(&config.api)?;
    info!("Analysis endpoint: {}", client.endpoint());

    let state = Arc::new(AppState::new(
        Arc::new(client),
        UploadPolicy::from(&config.upload),
    ));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("🚀 Server listening on http://{}", listener.local_addr()?);
    info!("📱 Open your browser and navigate to http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
