use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use midpoint_server::cache::{CachedFeatureSource, CachedGeocoder};
use midpoint_server::config::ServerConfig;
use midpoint_server::nominatim::NominatimClient;
use midpoint_server::overpass::OverpassClient;
use midpoint_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("midpoint_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let geocoder = CachedGeocoder::new(NominatimClient::new(config.nominatim.clone())?, &config.cache);
    let features =
        CachedFeatureSource::new(OverpassClient::new(config.overpass.clone())?, &config.cache);

    let state = AppState::new(Arc::new(geocoder), Arc::new(features), config.search.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        nominatim = %config.nominatim.base_url,
        overpass = %config.overpass.endpoint,
        "midpoint finder listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
