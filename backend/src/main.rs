use std::{net::SocketAddr, path::PathBuf};

use backend::{AppState, create_router, data};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "Serve a travel itinerary and its photos")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Directory served for every non-API path
    #[arg(long, env = "DOCUMENT_ROOT", default_value = "www/html")]
    document_root: PathBuf,

    /// Itinerary JSON file; created with a sample trip when missing
    #[arg(long, env = "TRAVEL_DATA", default_value = "data/travel_data.json")]
    data: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let travel_data = data::load_or_default(&args.data);
    let state = AppState::new(travel_data, &args.document_root);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("serving {:?} on http://{addr}", args.document_root);
    tracing::info!("API endpoints:");
    tracing::info!("  GET /api/days");
    tracing::info!("  GET /api/routes");
    tracing::info!("  GET /api/locations");
    tracing::info!("  GET /api/location-photos?id=<id>");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
