use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::{
    BackendClient, BaseLayer, DayFilter, DirectRouter, FetchMode, MapSurface, OsrmClient, RoutingService, Scene,
    TravelApi, Viewer, ViewerConfig, config,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Render a travel itinerary to GeoJSON")]
struct Args {
    /// Base URL of the itinerary API
    #[arg(long, env = "TRAVEL_API", default_value = config::DEFAULT_API_BASE)]
    api: String,

    /// Base URL of the OSRM routing service
    #[arg(long, env = "OSRM_URL", default_value = config::DEFAULT_OSRM_URL)]
    osrm_url: String,

    /// OSRM routing profile
    #[arg(long, default_value = "driving")]
    profile: String,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Day to render; 0 renders every day
    #[arg(long, default_value_t = 0)]
    day: u32,

    /// Map zoom level used to size location markers
    #[arg(long, default_value_t = 4.0)]
    zoom: f64,

    #[arg(long, value_enum, default_value_t = BaseLayer::Satellite)]
    style: BaseLayer,

    #[arg(long, value_enum, default_value_t = FetchMode::Sequential)]
    fetch_mode: FetchMode,

    /// Draw straight lines without contacting the routing service
    #[arg(long)]
    offline: bool,

    #[arg(long, short, default_value = "itinerary.geojson")]
    output: PathBuf,
}

impl Args {
    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            api_base: self.api.clone(),
            osrm_url: self.osrm_url.clone(),
            osrm_profile: self.profile.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            fetch_mode: self.fetch_mode,
            base_layer: self.style,
            initial_zoom: self.zoom,
            ..ViewerConfig::default()
        }
    }
}

async fn render<R, A>(router: R, api: A, config: &ViewerConfig, day: u32) -> Scene
where
    R: RoutingService,
    A: TravelApi,
{
    let mut viewer = Viewer::new(Scene::new(config.initial_zoom), router, api, config);
    viewer.filter_handle().select(DayFilter::from_index(day));
    viewer.load().await;
    tracing::info!(
        "rendered {:?} of a {}-day trip with {} routes",
        viewer.current_filter(),
        viewer.total_days(),
        viewer.legend().len()
    );
    viewer.into_surface()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "viewer=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.viewer_config();
    let api = BackendClient::new(&config.api_base, config.request_timeout)?;

    let scene = if args.offline {
        render(DirectRouter, api, &config, args.day).await
    } else {
        let router = OsrmClient::from_config(&config)?;
        render(router, api, &config, args.day).await
    };

    tracing::info!(
        "writing {} overlays at zoom {} to {}",
        scene.len(),
        scene.zoom(),
        args.output.display()
    );
    let geojson = serde_json::to_string_pretty(&scene.to_geojson())?;
    std::fs::write(&args.output, geojson)?;
    Ok(())
}
